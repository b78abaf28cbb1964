//! Controller events and the recorded history.
//!
//! Every public controller operation is an [`Event`]. The controller applies
//! events one at a time; each accepted event is stored as an
//! [`EventRecord`] so a session can be replayed from the seed and the log.

use serde::{Deserialize, Serialize};

use super::state::{GameMode, SpyCountPolicy};
use super::timer::TimerId;
use crate::words::Category;

/// A single input to the round controller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    AddPlayer { name: String, avatar: u8 },
    RemovePlayer { name: String },
    ChooseMode(GameMode),
    ChooseCategory(Category),
    ChooseSpyCountPolicy(SpyCountPolicy),
    StartRound,
    RevealNextPlayer,
    AdvanceQuestionTurn,
    PurchaseAbility { asker: String, target: String },
    StartRapidRound,
    /// Start the countdown for the current rapid-round asker.
    BeginRapidTurn,
    SkipRapidTurn,
    StartVoting,
    ToggleVote { candidate: String },
    ConfirmVote,
    SubmitEscapeGuess { choice: String },
    /// One unit of time for the live timer.
    Tick { timer: TimerId },
    StartNewRound,
    AbortRound,
}

impl Event {
    /// Short name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Event::AddPlayer { .. } => "add_player",
            Event::RemovePlayer { .. } => "remove_player",
            Event::ChooseMode(_) => "choose_mode",
            Event::ChooseCategory(_) => "choose_category",
            Event::ChooseSpyCountPolicy(_) => "choose_spy_count_policy",
            Event::StartRound => "start_round",
            Event::RevealNextPlayer => "reveal_next_player",
            Event::AdvanceQuestionTurn => "advance_question_turn",
            Event::PurchaseAbility { .. } => "purchase_ability",
            Event::StartRapidRound => "start_rapid_round",
            Event::BeginRapidTurn => "begin_rapid_turn",
            Event::SkipRapidTurn => "skip_rapid_turn",
            Event::StartVoting => "start_voting",
            Event::ToggleVote { .. } => "toggle_vote",
            Event::ConfirmVote => "confirm_vote",
            Event::SubmitEscapeGuess { .. } => "submit_escape_guess",
            Event::Tick { .. } => "tick",
            Event::StartNewRound => "start_new_round",
            Event::AbortRound => "abort_round",
        }
    }

    /// Ticks are frequent and carry no decision, so history skips them.
    #[must_use]
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::Tick { .. })
    }
}

/// An accepted event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Round number the event belongs to (0 before the first round).
    pub round: u32,
    /// Position in the session-wide history.
    pub sequence: u32,
    pub event: Event,
}

impl EventRecord {
    #[must_use]
    pub fn new(round: u32, sequence: u32, event: Event) -> Self {
        Self { round, sequence, event }
    }
}

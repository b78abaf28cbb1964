//! Game state: setup data, the roster, and the current round.
//!
//! ## Round
//!
//! Everything scoped to one round: roles, words, turn cycle, rapid round,
//! ballots, accusation, results and escape guesses. Created at round start,
//! dropped at round end or abort.
//!
//! ## GameState
//!
//! The full, cloneable state the controller transitions: phase, mode,
//! category, roster, the optional round, the timer slot, the RNG and the
//! event history. The history is a replay aid covering the latest round
//! request only; it is cleared whenever a round is started. Rosters and history use `im` so a clone is O(1), which the
//! controller relies on to apply each event to a copy and keep the original
//! on rejection.

use im::{OrdSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::EventRecord;
use super::player::Roster;
use super::rng::GameRng;
use super::timer::TimerSlot;
use crate::scoring::{EscapeGuess, RoundResult};
use crate::turns::{QuestionTurn, RapidRound};
use crate::voting::{Accused, Ballot};
use crate::words::Category;

/// Game variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Impostors get no word and must blend in.
    Spy,
    /// One player holds a different word without knowing it.
    Wolf,
}

/// How many spies a Spy round has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpyCountPolicy {
    /// Exactly one impostor.
    #[default]
    Single,
    /// One or two impostors, 50/50, when the roster is large enough.
    Random,
}

impl SpyCountPolicy {
    /// Candidates each voter may pick.
    #[must_use]
    pub fn max_votes(self) -> usize {
        match self {
            SpyCountPolicy::Single => 1,
            SpyCountPolicy::Random => 2,
        }
    }
}

/// Controller phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Menu,
    /// Mode and category selection.
    Setup,
    PlayerSetup,
    SpyCountChoice,
    RoleReveal,
    QuestionTurns,
    RapidRound,
    Voting,
    AccusationReveal,
    EscapeGuess,
    RoundResults,
}

impl Phase {
    /// Phases that `abort_round` may leave.
    #[must_use]
    pub fn is_in_round(self) -> bool {
        matches!(
            self,
            Phase::SpyCountChoice
                | Phase::RoleReveal
                | Phase::QuestionTurns
                | Phase::RapidRound
                | Phase::Voting
                | Phase::AccusationReveal
                | Phase::EscapeGuess
                | Phase::RoundResults
        )
    }
}

/// What a player sees when their role is revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleCard {
    /// Spy mode impostor: no word.
    Spy,
    /// A secret word. Wolf-mode impostors get theirs without being told.
    Word(String),
}

/// Round-scoped data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub mode: GameMode,
    pub policy: SpyCountPolicy,
    pub category: Category,
    pub impostors: Vec<String>,
    pub secret_word: String,
    pub impostor_word: Option<String>,
    /// Registration index of the player viewing their role.
    pub reveal_index: usize,
    pub question_turns: Vec<QuestionTurn>,
    pub turn_index: usize,
    /// Questions bought with the ability.
    pub extra_questions: Vec<QuestionTurn>,
    pub rapid_round: Option<RapidRound>,
    pub ballots: FxHashMap<String, Ballot>,
    /// Registration index of the current voter.
    pub voter_index: usize,
    /// Current voter's in-progress picks.
    pub selection: Ballot,
    pub accused: Option<Accused>,
    pub results: Vec<RoundResult>,
    pub ability_used_by: OrdSet<String>,
    pub guess_options: Vec<String>,
    pub escape_guesses: FxHashMap<String, EscapeGuess>,
    pub base_committed: bool,
    pub escape_committed: bool,
}

impl Round {
    /// A fresh round with roles and words assigned and nothing else done.
    #[must_use]
    pub fn new(
        number: u32,
        mode: GameMode,
        policy: SpyCountPolicy,
        category: Category,
        impostors: Vec<String>,
        secret_word: String,
        impostor_word: Option<String>,
    ) -> Self {
        Self {
            number,
            mode,
            policy,
            category,
            impostors,
            secret_word,
            impostor_word,
            reveal_index: 0,
            question_turns: Vec::new(),
            turn_index: 0,
            extra_questions: Vec::new(),
            rapid_round: None,
            ballots: FxHashMap::default(),
            voter_index: 0,
            selection: Ballot::new(),
            accused: None,
            results: Vec::new(),
            ability_used_by: OrdSet::new(),
            guess_options: Vec::new(),
            escape_guesses: FxHashMap::default(),
            base_committed: false,
            escape_committed: false,
        }
    }

    #[must_use]
    pub fn is_impostor(&self, name: &str) -> bool {
        self.impostors.iter().any(|i| i == name)
    }

    /// Role card for `name`.
    #[must_use]
    pub fn role_card(&self, name: &str) -> RoleCard {
        match (self.mode, self.is_impostor(name)) {
            (GameMode::Spy, true) => RoleCard::Spy,
            (GameMode::Wolf, true) => {
                RoleCard::Word(self.impostor_word.clone().unwrap_or_else(|| self.secret_word.clone()))
            }
            (_, false) => RoleCard::Word(self.secret_word.clone()),
        }
    }

    /// Current fixed-cycle turn, `None` once the cycle is done.
    #[must_use]
    pub fn current_turn(&self) -> Option<&QuestionTurn> {
        self.question_turns.get(self.turn_index)
    }

    #[must_use]
    pub fn cycle_complete(&self) -> bool {
        self.turn_index >= self.question_turns.len()
    }

    /// Impostors the vote did not catch.
    #[must_use]
    pub fn escaped_impostors(&self) -> Vec<String> {
        self.impostors
            .iter()
            .filter(|i| !self.accused.as_ref().is_some_and(|a| a.is(i)))
            .cloned()
            .collect()
    }

    /// Escaped impostors still owing a guess.
    #[must_use]
    pub fn pending_guessers(&self) -> Vec<String> {
        if self.mode != GameMode::Spy {
            return Vec::new();
        }
        self.escaped_impostors()
            .into_iter()
            .filter(|i| !self.escape_guesses.contains_key(i))
            .collect()
    }

    /// Base result for `player`, once committed.
    #[must_use]
    pub fn result_for(&self, player: &str) -> Option<&RoundResult> {
        self.results.iter().find(|r| r.player == player)
    }
}

/// Complete controller state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub mode: GameMode,
    pub category: Category,
    /// Policy of the last started round, reused by `start_new_round`.
    pub policy: SpyCountPolicy,
    pub roster: Roster,
    pub round: Option<Round>,
    pub timers: TimerSlot,
    pub rng: GameRng,
    pub rounds_played: u32,
    /// Accepted events since the last round start.
    pub history: Vector<EventRecord>,
    sequence: u32,
}

impl GameState {
    /// Fresh state at the main menu.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            phase: Phase::Menu,
            mode: GameMode::Spy,
            category: Category::random(),
            policy: SpyCountPolicy::Single,
            roster: Roster::new(),
            round: None,
            timers: TimerSlot::new(),
            rng,
            rounds_played: 0,
            history: Vector::new(),
            sequence: 0,
        }
    }

    /// Player whose input the current phase waits for, if any.
    #[must_use]
    pub fn active_player(&self) -> Option<String> {
        let round = self.round.as_ref()?;
        match self.phase {
            Phase::RoleReveal => self.roster.at(round.reveal_index).map(|p| p.name.clone()),
            Phase::QuestionTurns => round.current_turn().map(|t| t.asker.clone()),
            Phase::RapidRound => round
                .rapid_round
                .as_ref()
                .and_then(|r| r.current_asker())
                .map(str::to_string),
            Phase::Voting => self.roster.at(round.voter_index).map(|p| p.name.clone()),
            _ => None,
        }
    }

    /// Append an accepted event to the history.
    pub fn record(&mut self, record: EventRecord) {
        self.history.push_back(record);
    }

    /// Drop the history and restart sequence numbers.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.sequence = 0;
    }

    /// Next history sequence number.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.sequence;
        self.sequence += 1;
        seq
    }
}

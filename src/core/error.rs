//! Error types.
//!
//! Every error is local and recoverable. A rejected operation leaves the
//! controller exactly as it was, so callers can show the reason and carry on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Phase;

/// Top-level error returned by every controller operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl GameError {
    /// Stable reason code for UI mapping.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Setup(e) => e.code(),
            GameError::Provider(_) => "provider_failed",
            GameError::Transition(e) => e.code(),
        }
    }
}

/// Invalid player roster or category definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum SetupError {
    #[error("player count {count} outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },
    #[error("roster already has {max} players")]
    RosterFull { max: usize },
    #[error("player name must not be empty")]
    EmptyName,
    #[error("player {0:?} already exists")]
    DuplicateName(String),
    #[error("no player named {0:?}")]
    UnknownPlayer(String),
    #[error("category name must not be empty")]
    EmptyCategoryName,
    #[error("category {0:?} already exists")]
    DuplicateCategory(String),
    #[error("category needs at least {min} words, got {count}")]
    TooFewWords { count: usize, min: usize },
    #[error("no category named {0:?}")]
    UnknownCategory(String),
    #[error("built-in category {0:?} cannot be deleted")]
    BuiltInCategory(String),
    #[error("stored categories are malformed: {0}")]
    MalformedCategories(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SetupError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SetupError::PlayerCount { .. } => "player_count",
            SetupError::RosterFull { .. } => "roster_full",
            SetupError::EmptyName => "empty_name",
            SetupError::DuplicateName(_) => "duplicate_name",
            SetupError::UnknownPlayer(_) => "unknown_player",
            SetupError::EmptyCategoryName => "empty_category_name",
            SetupError::DuplicateCategory(_) => "duplicate_category",
            SetupError::TooFewWords { .. } => "too_few_words",
            SetupError::UnknownCategory(_) => "unknown_category",
            SetupError::BuiltInCategory(_) => "built_in_category",
            SetupError::MalformedCategories(_) => "malformed_categories",
            SetupError::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Secret Word Provider failure. The round is not started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ProviderError {
    #[error("word provider unavailable: {0}")]
    Unavailable(String),
    #[error("word provider returned malformed data: {0}")]
    Malformed(String),
    #[error("category {0:?} has no words to draw from")]
    EmptyCategory(String),
}

/// An operation arrived in the wrong phase or before its completion
/// condition holds. State is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum TransitionError {
    #[error("operation not allowed in phase {0:?}")]
    WrongPhase(Phase),
    #[error("no round in progress")]
    NoRound,
    #[error("every player has already seen their role")]
    RevealComplete,
    #[error("question cycle already complete")]
    CycleComplete,
    #[error("question cycle not finished yet")]
    CycleIncomplete,
    #[error("rapid-round turn already running")]
    RapidTurnRunning,
    #[error("unknown player {0:?}")]
    UnknownPlayer(String),
    #[error("a player cannot target themselves")]
    SelfTarget,
    #[error("{0:?} already used the ability this round")]
    AbilityAlreadyUsed(String),
    #[error("{name:?} has {score} points, ability costs {cost}")]
    InsufficientPoints { name: String, score: i64, cost: i64 },
    #[error("ballot already holds {max} candidate(s)")]
    VoteCapReached { max: usize },
    #[error("ballot is empty and abstention is disabled")]
    EmptyBallot,
    #[error("{0:?} is not one of the guess options")]
    UnknownGuessOption(String),
    #[error("a guess is already being resolved")]
    GuessPending,
    #[error("no impostor is waiting to guess")]
    NoPendingGuessers,
    #[error("timer {0} is not live")]
    StaleTimer(u64),
}

impl TransitionError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            TransitionError::WrongPhase(_) => "wrong_phase",
            TransitionError::NoRound => "no_round",
            TransitionError::RevealComplete => "reveal_complete",
            TransitionError::CycleComplete => "cycle_complete",
            TransitionError::CycleIncomplete => "cycle_incomplete",
            TransitionError::RapidTurnRunning => "rapid_turn_running",
            TransitionError::UnknownPlayer(_) => "unknown_player",
            TransitionError::SelfTarget => "self_target",
            TransitionError::AbilityAlreadyUsed(_) => "ability_already_used",
            TransitionError::InsufficientPoints { .. } => "insufficient_points",
            TransitionError::VoteCapReached { .. } => "vote_cap_reached",
            TransitionError::EmptyBallot => "empty_ballot",
            TransitionError::UnknownGuessOption(_) => "unknown_guess_option",
            TransitionError::GuessPending => "guess_pending",
            TransitionError::NoPendingGuessers => "no_pending_guessers",
            TransitionError::StaleTimer(_) => "stale_timer",
        }
    }
}

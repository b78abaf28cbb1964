//! # word-spy
//!
//! Round engine for a pass-the-device party word-guessing game for 3 to 8
//! players, in two variants:
//!
//! - **Spy**: one or two impostors get no secret word and must blend in.
//!   Spies that survive the vote may guess the word for bonus points.
//! - **Wolf**: one player gets a similar but different word without knowing
//!   it.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: the whole game is one `GameState` value and a
//!    transition function `(state, event) -> state | error`. Rendering,
//!    sound and persistence live outside the crate.
//!
//! 2. **All or nothing**: a rejected event leaves the state untouched, and
//!    each score commit touches every player or none.
//!
//! 3. **Injected randomness and time**: every random choice draws from a
//!    seedable `GameRng`, and time only enters through explicit timer ticks.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state clones via `im`, so the
//!   controller can run each event on a copy.
//!
//! - **Collaborators as traits**: word generation (`SecretWordProvider`) and
//!   category persistence (`CategoryStore`) are traits with in-memory
//!   implementations.
//!
//! ## Modules
//!
//! - `core`: players, state, events, timers, RNG, configuration, errors
//! - `words`: categories, the word provider and guess options
//! - `roles`: impostor selection and word assignment
//! - `turns`: the fixed question cycle and the timed rapid round
//! - `voting`: ballots and accusation resolution
//! - `scoring`: base and escape commits, crowns and the ability economy
//! - `controller`: the round state machine and its public operations

pub mod controller;
pub mod core;
pub mod roles;
pub mod scoring;
pub mod turns;
pub mod voting;
pub mod words;

// Re-export commonly used types
pub use crate::core::{
    Event, EventRecord, GameConfig, GameError, GameMode, GameRng, GameRngState, GameState, Phase, Player,
    ProviderError, RoleCard, Roster, Round, ScoringConfig, SetupError, SpyCountPolicy, TimerId, TimerKind,
    TransitionError,
};

pub use crate::controller::{RoundController, Snapshot};

pub use crate::words::{
    Category, CategoryStore, InMemoryCategoryStore, SecretWordProvider, StaticWordProvider, WordPair,
};

pub use crate::roles::{assign_roles, RoleAssignment};

pub use crate::turns::{question_cycle, QuestionTurn, RapidRound, RapidStage};

pub use crate::voting::{Accused, Ballot, VoteTally};

pub use crate::scoring::{crowns_for, EscapeGuess, RoundResult, ScoreDelta, ScoreEngine};

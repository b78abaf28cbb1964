//! Scoring: base and escape commits, crowns, and the ability economy.

pub mod ability;
pub mod engine;

pub use ability::{check_purchase, purchase};
pub use engine::{apply_commit, crowns_for, EscapeGuess, RoundResult, ScoreDelta, ScoreEngine, CROWN_POINTS};

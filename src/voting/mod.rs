//! Vote collection and accusation resolution.

pub mod tally;

pub use tally::{toggle, Accused, Ballot, VoteTally};

//! Ballots and accusation resolution.
//!
//! ## Tie-break
//!
//! The accused is the candidate with the strictly highest count. Ties go to
//! whichever tied candidate registered first. If nobody received a vote, the
//! first registered player with no ballot at all is accused, or nobody when
//! every player handed one in (even an empty one).

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::core::TransitionError;

/// One voter's picks. Never more than two.
pub type Ballot = SmallVec<[String; 2]>;

/// Result of closing the vote.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accused {
    Player(String),
    Nobody,
}

impl Accused {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Accused::Player(name) => Some(name),
            Accused::Nobody => None,
        }
    }

    #[must_use]
    pub fn is(&self, player: &str) -> bool {
        self.name() == Some(player)
    }
}

impl fmt::Display for Accused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accused::Player(name) => f.write_str(name),
            Accused::Nobody => f.write_str("none"),
        }
    }
}

/// Add `candidate` to the selection, or remove it if already there.
///
/// Adding past `max` is rejected and leaves the selection as it was.
pub fn toggle(selection: &mut Ballot, candidate: &str, max: usize) -> Result<(), TransitionError> {
    if let Some(pos) = selection.iter().position(|c| c == candidate) {
        selection.remove(pos);
        return Ok(());
    }
    if selection.len() >= max {
        return Err(TransitionError::VoteCapReached { max });
    }
    selection.push(candidate.to_string());
    Ok(())
}

/// Per-candidate vote counts in registration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteTally {
    counts: Vec<(String, u32)>,
}

impl VoteTally {
    /// Count every ballot. Votes for names outside `roster` are ignored.
    #[must_use]
    pub fn count(roster: &[String], ballots: &FxHashMap<String, Ballot>) -> Self {
        let mut counts: Vec<(String, u32)> = roster.iter().map(|n| (n.clone(), 0)).collect();
        for ballot in ballots.values() {
            for pick in ballot {
                if let Some(entry) = counts.iter_mut().find(|(name, _)| name == pick) {
                    entry.1 += 1;
                }
            }
        }
        Self { counts }
    }

    #[must_use]
    pub fn votes_for(&self, name: &str) -> u32 {
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map_or(0, |(_, c)| *c)
    }

    /// `(name, votes)` in registration order.
    #[must_use]
    pub fn counts(&self) -> &[(String, u32)] {
        &self.counts
    }

    /// Resolve the accused player.
    #[must_use]
    pub fn resolve(&self, ballots: &FxHashMap<String, Ballot>) -> Accused {
        let max = self.counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
        if max > 0 {
            // First in registration order among the tied leaders.
            if let Some((name, _)) = self.counts.iter().find(|(_, c)| *c == max) {
                return Accused::Player(name.clone());
            }
        }

        self.counts
            .iter()
            .map(|(name, _)| name)
            .find(|name| !ballots.contains_key(name.as_str()))
            .map_or(Accused::Nobody, |name| Accused::Player(name.clone()))
    }
}

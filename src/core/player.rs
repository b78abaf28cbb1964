//! Players and the registration-ordered roster.
//!
//! ## Player
//!
//! Name, cumulative score, derived crowns and an avatar index. Score may go
//! negative; crowns never do.
//!
//! ## Roster
//!
//! Players in registration order, backed by `im::Vector` so a full game
//! state clones in O(1). Registration order is significant: the vote
//! tie-break and the no-votes fallback both walk the roster front to back.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::SetupError;
use crate::scoring::crowns_for;

/// A registered player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    score: i64,
    crowns: u32,
    pub avatar: u8,
}

impl Player {
    /// Create a player with zero score.
    #[must_use]
    pub fn new(name: impl Into<String>, avatar: u8) -> Self {
        Self {
            name: name.into(),
            score: 0,
            crowns: 0,
            avatar,
        }
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn crowns(&self) -> u32 {
        self.crowns
    }

    /// Add `delta` to the score and recompute crowns.
    pub fn adjust_score(&mut self, delta: i64) {
        self.score += delta;
        self.crowns = crowns_for(self.score);
    }
}

/// Registration-ordered player list.
///
/// ```
/// use word_spy::core::Roster;
///
/// let mut roster = Roster::new();
/// roster.add("Ana", 0, 8).unwrap();
/// roster.add("Ben", 1, 8).unwrap();
///
/// assert_eq!(roster.names(), vec!["Ana".to_string(), "Ben".to_string()]);
/// assert!(roster.add(" Ana ", 2, 8).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vector<Player>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player. The name is trimmed first.
    pub fn add(&mut self, name: &str, avatar: u8, max_players: usize) -> Result<(), SetupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SetupError::EmptyName);
        }
        if self.contains(name) {
            return Err(SetupError::DuplicateName(name.to_string()));
        }
        if self.players.len() >= max_players {
            return Err(SetupError::RosterFull { max: max_players });
        }
        self.players.push_back(Player::new(name, avatar));
        Ok(())
    }

    /// Remove a player by name.
    pub fn remove(&mut self, name: &str) -> Result<Player, SetupError> {
        let pos = self
            .position(name)
            .ok_or_else(|| SetupError::UnknownPlayer(name.to_string()))?;
        Ok(self.players.remove(pos))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Registration index of a player.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Player at a registration index.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }
}

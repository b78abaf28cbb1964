//! Read-only view of the controller returned by every operation.

use serde::{Deserialize, Serialize};

use crate::core::{GameMode, GameState, Phase, Player, Round, SpyCountPolicy, Timer};

/// Everything a UI needs to render the current screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: GameMode,
    pub policy: SpyCountPolicy,
    pub category: String,
    /// Registration order.
    pub players: Vec<Player>,
    pub round: Option<Round>,
    /// The live timer; the host ticks this id.
    pub timer: Option<Timer>,
    /// Whose turn it is on a pass-the-device screen.
    pub active_player: Option<String>,
    pub rounds_played: u32,
}

impl Snapshot {
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            mode: state.mode,
            policy: state.policy,
            category: state.category.name.clone(),
            players: state.roster.iter().cloned().collect(),
            round: state.round.clone(),
            timer: state.timers.live().copied(),
            active_player: state.active_player(),
            rounds_played: state.rounds_played,
        }
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Score of `name`, zero for unknown players.
    #[must_use]
    pub fn score(&self, name: &str) -> i64 {
        self.player(name).map_or(0, Player::score)
    }

    /// Players ordered by score, highest first; ties keep registration order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(p.score()));
        ranked
    }
}

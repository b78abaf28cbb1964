//! Game configuration.
//!
//! `GameConfig` collects every tunable number the round engine uses: player
//! limits, ability economy, timer durations and the scoring table. Defaults
//! match the standard rules; hosts may load a config with serde and adjust it
//! with the `with_*` builders.

use serde::{Deserialize, Serialize};

use super::error::SetupError;

/// Point values used by the score engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Spy/Single: citizen vote naming an impostor.
    pub single_correct: i64,
    /// Spy/Single: citizen vote naming anyone else or abstaining (subtracted).
    pub single_incorrect: i64,
    /// Spy/Random: per vote naming an impostor.
    pub random_correct: i64,
    /// Spy/Random: per vote naming a citizen (subtracted).
    pub random_incorrect: i64,
    /// Wolf: each citizen when the wolf is accused.
    pub wolf_caught: i64,
    /// Wolf: the wolf when someone else is accused.
    pub wolf_escaped: i64,
    /// Spy: un-accused impostor for evading capture.
    pub escape_bonus: i64,
    /// Spy: un-accused impostor whose guess matches the secret word.
    pub guess_bonus: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            single_correct: 100,
            single_incorrect: 50,
            random_correct: 100,
            random_incorrect: 100,
            wolf_caught: 200,
            wolf_escaped: 300,
            escape_bonus: 200,
            guess_bonus: 250,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Smallest roster for which the Random spy-count policy is offered.
    pub random_policy_min_players: usize,
    /// Points spent on the extra-question ability.
    pub ability_cost: i64,
    /// Points returned when the buyer's vote was correct.
    pub ability_refund: i64,
    /// Countdown for each rapid-round turn, in ticks.
    pub rapid_turn_ticks: u32,
    /// Dramatization delay between voting and the base commit, in ticks.
    pub reveal_delay_ticks: u32,
    /// Delay between an escape guess and its commit, in ticks.
    pub guess_delay_ticks: u32,
    /// Number of options offered to escaping spies (true word included).
    pub guess_options: usize,
    /// Minimum words in a custom category.
    pub min_category_words: usize,
    /// Whether a voter may confirm an empty ballot.
    pub allow_abstention: bool,
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 8,
            random_policy_min_players: 6,
            ability_cost: 200,
            ability_refund: 200,
            rapid_turn_ticks: 20,
            reveal_delay_ticks: 5,
            guess_delay_ticks: 3,
            guess_options: 8,
            min_category_words: 8,
            allow_abstention: false,
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow or forbid empty ballots.
    #[must_use]
    pub fn with_abstention(mut self, allow: bool) -> Self {
        self.allow_abstention = allow;
        self
    }

    /// Set the rapid-round countdown.
    #[must_use]
    pub fn with_rapid_turn_ticks(mut self, ticks: u32) -> Self {
        self.rapid_turn_ticks = ticks;
        self
    }

    /// Set both deferred-continuation delays.
    #[must_use]
    pub fn with_delays(mut self, reveal_ticks: u32, guess_ticks: u32) -> Self {
        self.reveal_delay_ticks = reveal_ticks;
        self.guess_delay_ticks = guess_ticks;
        self
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.min_players < 3 {
            return Err(SetupError::InvalidConfig("min_players must be at least 3".into()));
        }
        if self.max_players < self.min_players {
            return Err(SetupError::InvalidConfig("max_players below min_players".into()));
        }
        if self.ability_cost <= 0 {
            return Err(SetupError::InvalidConfig("ability_cost must be positive".into()));
        }
        if self.rapid_turn_ticks == 0 || self.reveal_delay_ticks == 0 || self.guess_delay_ticks == 0 {
            return Err(SetupError::InvalidConfig("timer durations must be non-zero".into()));
        }
        if self.scoring.single_incorrect < 0 || self.scoring.random_incorrect < 0 {
            return Err(SetupError::InvalidConfig("penalties are stored as non-negative points".into()));
        }
        if self.guess_options < 2 {
            return Err(SetupError::InvalidConfig("need at least two guess options".into()));
        }
        if self.min_category_words < self.guess_options {
            return Err(SetupError::InvalidConfig(
                "categories must hold at least as many words as guess options".into(),
            ));
        }
        Ok(())
    }

    /// Decoys needed alongside the true word.
    #[must_use]
    pub fn decoy_count(&self) -> usize {
        self.guess_options.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.decoy_count(), 7);
        assert_eq!(config.rapid_turn_ticks, 20);
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::new()
            .with_abstention(true)
            .with_rapid_turn_ticks(5)
            .with_delays(1, 1);

        assert!(config.allow_abstention);
        assert_eq!(config.rapid_turn_ticks, 5);
        assert_eq!(config.reveal_delay_ticks, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timer() {
        let config = GameConfig::new().with_rapid_turn_ticks(0);
        assert!(matches!(config.validate(), Err(SetupError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_negative_penalty() {
        let config = GameConfig::new().with_scoring(ScoringConfig {
            single_incorrect: -50,
            ..ScoringConfig::default()
        });
        assert!(matches!(config.validate(), Err(SetupError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"allow_abstention": true, "scoring": {"guess_bonus": 300}}"#).unwrap();

        assert!(config.allow_abstention);
        assert_eq!(config.max_players, 8);
        assert_eq!(config.scoring.guess_bonus, 300);
        assert_eq!(config.scoring.wolf_escaped, 300);
    }
}

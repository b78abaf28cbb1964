//! Score computation and commits.
//!
//! ## Commits
//!
//! A round scores in two commits. The base commit runs once the accusation
//! reveal is over and covers citizen votes, ability refunds and Wolf-mode
//! scoring. The escape commit runs once every un-accused spy has guessed.
//! Each commit is computed from the round snapshot into a list of
//! [`ScoreDelta`]s and applied with [`apply_commit`], which touches no score
//! unless every player in the list exists.
//!
//! ## Crowns
//!
//! One crown per full [`CROWN_POINTS`] of non-negative score, recomputed
//! whenever the score changes.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{GameConfig, GameMode, Roster, Round, ScoringConfig, SpyCountPolicy, TransitionError};
use crate::voting::{Accused, Ballot};

/// Score needed per crown.
pub const CROWN_POINTS: i64 = 1000;

/// Crowns earned by a cumulative score.
///
/// ```
/// use word_spy::scoring::crowns_for;
///
/// assert_eq!(crowns_for(2500), 2);
/// assert_eq!(crowns_for(-50), 0);
/// ```
#[must_use]
pub fn crowns_for(score: i64) -> u32 {
    u32::try_from(score.max(0) / CROWN_POINTS).unwrap_or(u32::MAX)
}

/// One player's base outcome for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub player: String,
    pub votes_cast: Ballot,
    pub was_correct: bool,
    /// Base points, refund excluded.
    pub points_gained: i64,
    pub ability_refunded: bool,
}

/// An escaped spy's guess and what it earned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeGuess {
    pub choice: String,
    pub correct: bool,
    pub points: i64,
}

/// Points to add to one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub player: String,
    pub points: i64,
}

impl ScoreDelta {
    pub fn new(player: impl Into<String>, points: i64) -> Self {
        Self {
            player: player.into(),
            points,
        }
    }
}

/// Pure scoring rules over a round snapshot.
#[derive(Clone, Debug)]
pub struct ScoreEngine<'a> {
    scoring: &'a ScoringConfig,
    refund: i64,
}

impl<'a> ScoreEngine<'a> {
    #[must_use]
    pub fn new(config: &'a GameConfig) -> Self {
        Self {
            scoring: &config.scoring,
            refund: config.ability_refund,
        }
    }

    /// Base results for every player, in `names` order.
    ///
    /// Players without a ballot are scored as if they abstained.
    #[must_use]
    pub fn base_results(&self, round: &Round, names: &[String]) -> Vec<RoundResult> {
        let accused = round.accused.clone().unwrap_or(Accused::Nobody);
        names
            .iter()
            .map(|name| {
                let votes = round.ballots.get(name).cloned().unwrap_or_default();
                let (was_correct, points_gained) = if round.is_impostor(name) {
                    (false, self.impostor_base(round, name, &accused))
                } else {
                    self.citizen_base(round, &votes, &accused)
                };
                // Only Spy rounds refund; in Wolf mode the ability is a pure cost.
                let ability_refunded =
                    round.mode == GameMode::Spy && was_correct && round.ability_used_by.contains(name);
                RoundResult {
                    player: name.clone(),
                    votes_cast: votes,
                    was_correct,
                    points_gained,
                    ability_refunded,
                }
            })
            .collect()
    }

    /// Deltas for the base commit, refunds included.
    #[must_use]
    pub fn base_deltas(&self, results: &[RoundResult]) -> Vec<ScoreDelta> {
        results
            .iter()
            .map(|r| {
                let refund = if r.ability_refunded { self.refund } else { 0 };
                ScoreDelta::new(r.player.clone(), r.points_gained + refund)
            })
            .filter(|d| d.points != 0)
            .collect()
    }

    /// Judge one escape guess against the secret word.
    #[must_use]
    pub fn judge_guess(&self, choice: &str, secret: &str) -> EscapeGuess {
        let correct = choice == secret;
        let bonus = if correct { self.scoring.guess_bonus } else { 0 };
        EscapeGuess {
            choice: choice.to_string(),
            correct,
            points: self.scoring.escape_bonus + bonus,
        }
    }

    /// Deltas for the escape commit: one per escaped spy that has guessed.
    #[must_use]
    pub fn escape_deltas(&self, round: &Round) -> Vec<ScoreDelta> {
        if round.mode != GameMode::Spy {
            return Vec::new();
        }
        round
            .escaped_impostors()
            .into_iter()
            .filter_map(|name| {
                let points = round.escape_guesses.get(&name)?.points;
                Some(ScoreDelta::new(name, points))
            })
            .collect()
    }

    fn impostor_base(&self, round: &Round, name: &str, accused: &Accused) -> i64 {
        match round.mode {
            GameMode::Wolf if !accused.is(name) => self.scoring.wolf_escaped,
            // Spies score only through the escape commit.
            _ => 0,
        }
    }

    fn citizen_base(&self, round: &Round, votes: &Ballot, accused: &Accused) -> (bool, i64) {
        let hits = votes.iter().filter(|v| round.is_impostor(v)).count() as i64;
        let misses = votes.len() as i64 - hits;
        let was_correct = hits > 0 && misses == 0;

        let points = match (round.mode, round.policy) {
            (GameMode::Wolf, _) => {
                let caught = round.impostors.iter().any(|w| accused.is(w));
                if caught {
                    self.scoring.wolf_caught
                } else {
                    0
                }
            }
            (GameMode::Spy, SpyCountPolicy::Single) => {
                if was_correct {
                    self.scoring.single_correct
                } else {
                    -self.scoring.single_incorrect
                }
            }
            (GameMode::Spy, SpyCountPolicy::Random) => {
                self.scoring.random_correct * hits - self.scoring.random_incorrect * misses
            }
        };
        (was_correct, points)
    }
}

/// Apply a commit to the roster, all or nothing.
pub fn apply_commit(roster: &mut Roster, deltas: &[ScoreDelta], label: &str) -> Result<(), TransitionError> {
    if let Some(missing) = deltas.iter().find(|d| !roster.contains(&d.player)) {
        return Err(TransitionError::UnknownPlayer(missing.player.clone()));
    }
    for delta in deltas {
        if let Some(player) = roster.get_mut(&delta.player) {
            player.adjust_score(delta.points);
        }
    }
    let total: i64 = deltas.iter().map(|d| d.points).sum();
    info!(commit = label, players = deltas.len(), total, "scores committed");
    Ok(())
}

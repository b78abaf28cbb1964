//! Fixed question cycle.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// One asker questioning one target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionTurn {
    pub asker: String,
    pub target: String,
}

impl QuestionTurn {
    pub fn new(asker: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            asker: asker.into(),
            target: target.into(),
        }
    }
}

/// Shuffle `names` and pair each player with the next one, wrapping around.
///
/// Produces exactly `names.len()` turns; every player asks once and is asked
/// once, and nobody targets themselves when there are at least two players.
///
/// ```
/// use word_spy::core::GameRng;
/// use word_spy::turns::question_cycle;
///
/// let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
/// let turns = question_cycle(&names, &mut GameRng::new(1));
///
/// assert_eq!(turns.len(), 3);
/// assert!(turns.iter().all(|t| t.asker != t.target));
/// ```
#[must_use]
pub fn question_cycle(names: &[String], rng: &mut GameRng) -> Vec<QuestionTurn> {
    let order = rng.shuffled(names);
    let n = order.len();
    (0..n)
        .map(|i| QuestionTurn::new(order[i].clone(), order[(i + 1) % n].clone()))
        .collect()
}

/// The fixed-cycle target of `asker`, if they ask in `cycle`.
#[must_use]
pub fn cycle_target<'a>(cycle: &'a [QuestionTurn], asker: &str) -> Option<&'a str> {
    cycle.iter().find(|t| t.asker == asker).map(|t| t.target.as_str())
}

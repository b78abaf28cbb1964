//! Impostor selection and word assignment.
//!
//! All provider calls for a round happen here, before any round state
//! exists: a failing provider leaves nothing behind and the caller can
//! simply retry.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameConfig, GameMode, GameRng, ProviderError, SpyCountPolicy};
use crate::words::{guess_options, Category, SecretWordProvider};

/// Everything a new round needs from role assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub impostors: Vec<String>,
    pub secret_word: String,
    /// Wolf mode only.
    pub impostor_word: Option<String>,
    /// Spy mode only.
    pub guess_options: Vec<String>,
}

/// Number of impostors for a round.
///
/// Wolf mode and the Single policy always give one. Random gives two with
/// even odds, but only when the roster reaches `random_min_players`.
pub fn impostor_count(
    mode: GameMode,
    policy: SpyCountPolicy,
    players: usize,
    random_min_players: usize,
    rng: &mut GameRng,
) -> usize {
    match (mode, policy) {
        (GameMode::Spy, SpyCountPolicy::Random) if players >= random_min_players => {
            if rng.gen_bool(0.5) {
                2
            } else {
                1
            }
        }
        _ => 1,
    }
}

/// Pick impostors and fetch every word the round needs.
pub fn assign_roles<P: SecretWordProvider + ?Sized>(
    mode: GameMode,
    policy: SpyCountPolicy,
    category: &Category,
    names: &[String],
    config: &GameConfig,
    provider: &mut P,
    rng: &mut GameRng,
) -> Result<RoleAssignment, ProviderError> {
    let count = impostor_count(mode, policy, names.len(), config.random_policy_min_players, rng);
    let mut impostors = rng.shuffled(names);
    impostors.truncate(count);

    let assignment = match mode {
        GameMode::Spy => {
            let secret_word = provider.secret_word(category, rng)?.trim().to_string();
            if secret_word.is_empty() {
                return Err(ProviderError::Malformed("empty secret word".into()));
            }
            let guess_options = guess_options(&secret_word, category, config.guess_options, provider, rng)?;
            RoleAssignment {
                impostors,
                secret_word,
                impostor_word: None,
                guess_options,
            }
        }
        GameMode::Wolf => {
            let pair = provider.wolf_pair(rng)?;
            pair.validate()?;
            RoleAssignment {
                impostors,
                secret_word: pair.majority.trim().to_string(),
                impostor_word: Some(pair.minority.trim().to_string()),
                guess_options: Vec::new(),
            }
        }
    };

    debug!(?mode, impostors = assignment.impostors.len(), category = %category.name, "roles assigned");
    Ok(assignment)
}

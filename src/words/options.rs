//! Guess options for escaping spies.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::category::Category;
use super::provider::{validate_decoys, SecretWordProvider};
use crate::core::{GameRng, ProviderError};

/// Provider calls allowed while topping up decoys.
const MAX_DECOY_REQUESTS: usize = 3;

/// Build `count` shuffled options: the secret word plus `count - 1` decoys.
///
/// Decoys come from the category pool. The fully-random category, or a pool
/// too small to fill every slot, asks the provider for the remainder.
/// Provider decoys already in the pool are skipped, and the provider is asked
/// again (for enough extra words to outnumber every skip) until the options
/// are full.
pub fn guess_options<P: SecretWordProvider + ?Sized>(
    secret: &str,
    category: &Category,
    count: usize,
    provider: &mut P,
    rng: &mut GameRng,
) -> Result<Vec<String>, ProviderError> {
    let needed = count.saturating_sub(1);

    let mut seen = FxHashSet::default();
    let pool: Vec<String> = category
        .words
        .iter()
        .filter(|w| w.as_str() != secret && seen.insert(w.as_str()))
        .cloned()
        .collect();

    let mut decoys = rng.shuffled(&pool);
    decoys.truncate(needed);

    let mut taken: FxHashSet<String> = pool.iter().cloned().collect();
    let mut request = needed - decoys.len();
    let mut attempt = 0;
    while decoys.len() < needed {
        if attempt == MAX_DECOY_REQUESTS {
            return Err(ProviderError::Unavailable(format!(
                "provider could not supply {needed} distinct decoys"
            )));
        }
        attempt += 1;

        let extra = provider.decoys(secret, request, rng)?;
        validate_decoys(secret, request, &extra)?;
        for decoy in extra {
            if decoys.len() == needed {
                break;
            }
            if taken.insert(decoy.clone()) {
                decoys.push(decoy);
            }
        }
        debug!(attempt, have = decoys.len(), needed, "provider decoys merged");
        request = needed - decoys.len() + taken.len();
    }

    let mut options = Vec::with_capacity(count);
    options.push(secret.to_string());
    options.extend(decoys);
    rng.shuffle(&mut options);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::{StaticWordProvider, WordPair};

    struct NoProvider;

    impl SecretWordProvider for NoProvider {
        fn secret_word(&mut self, _: &Category, _: &mut GameRng) -> Result<String, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }

        fn wolf_pair(&mut self, _: &mut GameRng) -> Result<WordPair, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }

        fn decoys(&mut self, _: &str, _: usize, _: &mut GameRng) -> Result<Vec<String>, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }
    }

    /// Hands out a fixed list front to back, starting over on every call.
    struct ListProvider {
        words: Vec<String>,
        calls: usize,
    }

    impl SecretWordProvider for ListProvider {
        fn secret_word(&mut self, _: &Category, _: &mut GameRng) -> Result<String, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }

        fn wolf_pair(&mut self, _: &mut GameRng) -> Result<WordPair, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }

        fn decoys(&mut self, _: &str, count: usize, _: &mut GameRng) -> Result<Vec<String>, ProviderError> {
            self.calls += 1;
            if count > self.words.len() {
                return Err(ProviderError::Unavailable("list exhausted".into()));
            }
            Ok(self.words[..count].to_vec())
        }
    }

    fn pool(n: usize) -> Category {
        Category::new("Pool", (0..n).map(|i| format!("w{i}")))
    }

    #[test]
    fn test_options_from_pool() {
        let mut rng = GameRng::new(11);
        let options = guess_options("w3", &pool(12), 8, &mut NoProvider, &mut rng).unwrap();

        assert_eq!(options.len(), 8);
        assert_eq!(options.iter().filter(|o| *o == "w3").count(), 1);
        let unique: FxHashSet<_> = options.iter().collect();
        assert_eq!(unique.len(), 8);
        assert!(options.iter().all(|o| o.starts_with('w')));
    }

    #[test]
    fn test_random_category_uses_provider() {
        let mut rng = GameRng::new(12);
        let mut provider = StaticWordProvider::new();
        let options = guess_options("Pizza", &Category::random(), 8, &mut provider, &mut rng).unwrap();

        assert_eq!(options.len(), 8);
        assert!(options.contains(&"Pizza".to_string()));
    }

    #[test]
    fn test_provider_failure_surfaces() {
        let mut rng = GameRng::new(13);
        let result = guess_options("Pizza", &Category::random(), 8, &mut NoProvider, &mut rng);
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn test_exact_pool_needs_no_provider() {
        let mut rng = GameRng::new(14);
        // 8 words: secret plus 7 decoys, nothing left over.
        let options = guess_options("w0", &pool(8), 8, &mut NoProvider, &mut rng).unwrap();
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(sorted, pool(8).words);
    }

    #[test]
    fn test_provider_asked_again_when_decoys_overlap_pool() {
        let mut rng = GameRng::new(15);
        let mut provider = ListProvider {
            words: ["w1", "w2", "n1", "n2", "n3", "n4", "n5", "n6"].map(String::from).to_vec(),
            calls: 0,
        };
        let options = guess_options("w0", &pool(3), 8, &mut provider, &mut rng).unwrap();

        assert_eq!(provider.calls, 2);
        let mut sorted = options.clone();
        sorted.sort();
        assert_eq!(sorted, ["n1", "n2", "n3", "n4", "n5", "w0", "w1", "w2"]);
    }

    #[test]
    fn test_repeated_pool_words_still_fill_options() {
        let category = Category::new(
            "Dup",
            ["Pizza", "Pizza", "Sushi", "Burger", "Pasta", "Falafel", "Hummus", "Tacos"],
        );
        let mut provider = StaticWordProvider::new();
        for seed in 0..500 {
            let mut rng = GameRng::new(seed);
            let options = guess_options("Pizza", &category, 8, &mut provider, &mut rng).unwrap();

            assert_eq!(options.len(), 8);
            let unique: FxHashSet<_> = options.iter().collect();
            assert_eq!(unique.len(), 8, "seed {seed}");
            assert!(options.contains(&"Pizza".to_string()));
        }
    }
}

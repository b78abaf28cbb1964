//! Secret Word Provider collaborator.
//!
//! The provider supplies secret words, Wolf-mode word pairs and decoys for
//! the fully-random category. [`StaticWordProvider`] answers from built-in
//! tables. Remote text-generation backends can implement the trait and use
//! [`parse_wolf_pair`] / [`parse_decoys`] to validate their JSON replies.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::category::Category;
use crate::core::{GameRng, ProviderError};

/// Majority and minority words for a Wolf round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    pub majority: String,
    pub minority: String,
}

impl WordPair {
    pub fn new(majority: impl Into<String>, minority: impl Into<String>) -> Self {
        Self {
            majority: majority.into(),
            minority: minority.into(),
        }
    }

    /// Both words present and distinct.
    pub fn validate(&self) -> Result<(), ProviderError> {
        let (a, b) = (self.majority.trim(), self.minority.trim());
        if a.is_empty() || b.is_empty() {
            return Err(ProviderError::Malformed("empty word in pair".into()));
        }
        if a == b {
            return Err(ProviderError::Malformed(format!("pair words are identical: {a:?}")));
        }
        Ok(())
    }
}

/// Source of secret words and decoys.
///
/// Implementations may be deterministic table lookups or fallible remote
/// calls; the round cannot start until every call has resolved.
pub trait SecretWordProvider {
    /// A secret word for a Spy round in `category`.
    fn secret_word(&mut self, category: &Category, rng: &mut GameRng) -> Result<String, ProviderError>;

    /// Two similar but distinct words for a Wolf round.
    fn wolf_pair(&mut self, rng: &mut GameRng) -> Result<WordPair, ProviderError>;

    /// `count` distinct decoys, none equal to `word`.
    fn decoys(&mut self, word: &str, count: usize, rng: &mut GameRng) -> Result<Vec<String>, ProviderError>;
}

impl<P: SecretWordProvider + ?Sized> SecretWordProvider for Box<P> {
    fn secret_word(&mut self, category: &Category, rng: &mut GameRng) -> Result<String, ProviderError> {
        (**self).secret_word(category, rng)
    }

    fn wolf_pair(&mut self, rng: &mut GameRng) -> Result<WordPair, ProviderError> {
        (**self).wolf_pair(rng)
    }

    fn decoys(&mut self, word: &str, count: usize, rng: &mut GameRng) -> Result<Vec<String>, ProviderError> {
        (**self).decoys(word, count, rng)
    }
}

/// Check a decoy list: exactly `count` distinct, non-blank entries, none
/// equal to `word`.
pub fn validate_decoys(word: &str, count: usize, decoys: &[String]) -> Result<(), ProviderError> {
    if decoys.len() != count {
        return Err(ProviderError::Malformed(format!(
            "expected {count} decoys, got {}",
            decoys.len()
        )));
    }
    let mut seen = FxHashSet::default();
    for decoy in decoys {
        if decoy.trim().is_empty() {
            return Err(ProviderError::Malformed("blank decoy".into()));
        }
        if decoy == word {
            return Err(ProviderError::Malformed(format!("decoy repeats the secret word {word:?}")));
        }
        if !seen.insert(decoy.as_str()) {
            return Err(ProviderError::Malformed(format!("duplicate decoy {decoy:?}")));
        }
    }
    Ok(())
}

/// Parse a `{"majority": .., "minority": ..}` reply.
pub fn parse_wolf_pair(json: &str) -> Result<WordPair, ProviderError> {
    let pair: WordPair = serde_json::from_str(json).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    pair.validate()?;
    Ok(WordPair::new(pair.majority.trim(), pair.minority.trim()))
}

/// Parse a JSON array of decoys and validate it against `word`.
pub fn parse_decoys(json: &str, word: &str, count: usize) -> Result<Vec<String>, ProviderError> {
    let decoys: Vec<String> = serde_json::from_str(json).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let decoys: Vec<String> = decoys.iter().map(|d| d.trim().to_string()).collect();
    validate_decoys(word, count, &decoys)?;
    Ok(decoys)
}

const FOODS: &[&str] = &[
    "Pizza", "Shawarma", "Sushi", "Burger", "Pasta", "Falafel", "Hummus", "Tacos", "Pancakes", "Curry",
];

const MOVIES: &[&str] = &[
    "Titanic", "Inception", "The Lion King", "Frozen", "Jaws", "Avatar", "Toy Story", "Gladiator", "Rocky",
    "Up",
];

const SUPERHEROES: &[&str] = &[
    "Superman", "Batman", "Spider-Man", "Iron Man", "Captain America", "Hulk", "Thor", "Wonder Woman", "Flash",
    "Aquaman",
];

const VIDEO_GAMES: &[&str] = &[
    "Super Mario", "Fortnite", "Minecraft", "FIFA", "Call of Duty", "Zelda", "Crash Bandicoot", "PUBG",
    "Overwatch", "Tetris",
];

const ANIMALS: &[&str] = &[
    "Lion", "Tiger", "Cheetah", "Elephant", "Giraffe", "Bear", "Wolf", "Fox", "Monkey", "Gorilla", "Zebra",
    "Rhino", "Hippo", "Hyena", "Kangaroo", "Koala", "Panda", "Sloth", "Horse", "Camel", "Cow", "Sheep",
    "Goat", "Cat", "Dog", "Rabbit", "Hamster", "Squirrel", "Hedgehog", "Bat", "Duck", "Ostrich", "Penguin",
    "Parrot", "Crow", "Owl", "Peacock", "Swan", "Flamingo", "Shark", "Dolphin", "Whale", "Octopus", "Crab",
    "Jellyfish", "Seahorse", "Crocodile", "Turtle", "Snake", "Lizard", "Chameleon", "Frog", "Bee",
    "Butterfly", "Spider", "Beetle", "Scorpion", "Ant", "Mosquito",
];

const WOLF_PAIRS: &[(&str, &str)] = &[
    ("Sun", "Star"),
    ("River", "Lake"),
    ("Coffee", "Tea"),
    ("Guitar", "Violin"),
    ("Train", "Tram"),
    ("Castle", "Palace"),
    ("Pencil", "Pen"),
    ("Beach", "Desert"),
    ("Doctor", "Nurse"),
    ("Snow", "Rain"),
    ("Sofa", "Bed"),
    ("Apple", "Pear"),
];

/// Categories shipped with the game, fully-random first.
#[must_use]
pub fn builtin_categories() -> Vec<Category> {
    vec![
        Category::random(),
        Category::new("Foods", FOODS.iter().copied()),
        Category::new("Movies", MOVIES.iter().copied()),
        Category::new("Superheroes", SUPERHEROES.iter().copied()),
        Category::new("Video Games", VIDEO_GAMES.iter().copied()),
        Category::new("Animals", ANIMALS.iter().copied()),
    ]
}

/// Table-backed provider.
///
/// Spy words come from the category's pool; the fully-random category draws
/// from the union of every built-in pool, which also supplies its decoys.
#[derive(Clone, Debug)]
pub struct StaticWordProvider {
    pool: Vec<String>,
    pairs: Vec<WordPair>,
}

impl Default for StaticWordProvider {
    fn default() -> Self {
        let pool = [FOODS, MOVIES, SUPERHEROES, VIDEO_GAMES, ANIMALS]
            .iter()
            .flat_map(|table| table.iter().map(|w| w.to_string()))
            .collect();
        let pairs = WOLF_PAIRS.iter().map(|(a, b)| WordPair::new(*a, *b)).collect();
        Self { pool, pairs }
    }
}

impl StaticWordProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider with custom tables.
    #[must_use]
    pub fn with_tables(pool: Vec<String>, pairs: Vec<WordPair>) -> Self {
        Self { pool, pairs }
    }
}

impl SecretWordProvider for StaticWordProvider {
    fn secret_word(&mut self, category: &Category, rng: &mut GameRng) -> Result<String, ProviderError> {
        let source = if category.is_random() { &self.pool } else { &category.words };
        let word = rng
            .choose(source)
            .cloned()
            .ok_or_else(|| ProviderError::EmptyCategory(category.name.clone()))?;
        debug!(category = %category.name, "secret word drawn");
        Ok(word)
    }

    fn wolf_pair(&mut self, rng: &mut GameRng) -> Result<WordPair, ProviderError> {
        let pair = rng
            .choose(&self.pairs)
            .cloned()
            .ok_or_else(|| ProviderError::Unavailable("no wolf pairs configured".into()))?;
        pair.validate()?;
        // Either word of a pair may be the minority one.
        if rng.gen_bool(0.5) {
            Ok(WordPair::new(pair.minority, pair.majority))
        } else {
            Ok(pair)
        }
    }

    fn decoys(&mut self, word: &str, count: usize, rng: &mut GameRng) -> Result<Vec<String>, ProviderError> {
        let mut seen = FxHashSet::default();
        let candidates: Vec<String> = self
            .pool
            .iter()
            .filter(|w| w.as_str() != word && seen.insert(w.as_str()))
            .cloned()
            .collect();
        if candidates.len() < count {
            return Err(ProviderError::Unavailable(format!(
                "only {} decoys available, need {count}",
                candidates.len()
            )));
        }
        let mut decoys = rng.shuffled(&candidates);
        decoys.truncate(count);
        Ok(decoys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_hold_enough_words() {
        for category in builtin_categories().iter().filter(|c| !c.is_random()) {
            assert!(category.words.len() >= 8, "{} is too small", category.name);
        }
    }

    #[test]
    fn test_secret_word_from_pool() {
        let mut provider = StaticWordProvider::new();
        let mut rng = GameRng::new(1);
        let foods = Category::new("Foods", FOODS.iter().copied());

        for _ in 0..20 {
            let word = provider.secret_word(&foods, &mut rng).unwrap();
            assert!(FOODS.contains(&word.as_str()));
        }
    }

    #[test]
    fn test_secret_word_random_category_uses_union() {
        let mut provider = StaticWordProvider::new();
        let mut rng = GameRng::new(2);
        let word = provider.secret_word(&Category::random(), &mut rng).unwrap();
        assert!(provider.pool.contains(&word));
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let mut provider = StaticWordProvider::with_tables(Vec::new(), Vec::new());
        let mut rng = GameRng::new(3);

        assert_eq!(
            provider.secret_word(&Category::random(), &mut rng),
            Err(ProviderError::EmptyCategory("Random".into()))
        );
        assert!(matches!(provider.wolf_pair(&mut rng), Err(ProviderError::Unavailable(_))));
    }

    #[test]
    fn test_wolf_pair_distinct() {
        let mut provider = StaticWordProvider::new();
        let mut rng = GameRng::new(4);
        for _ in 0..20 {
            let pair = provider.wolf_pair(&mut rng).unwrap();
            assert_ne!(pair.majority, pair.minority);
        }
    }

    #[test]
    fn test_decoys_are_valid() {
        let mut provider = StaticWordProvider::new();
        let mut rng = GameRng::new(5);
        let decoys = provider.decoys("Pizza", 7, &mut rng).unwrap();
        assert!(validate_decoys("Pizza", 7, &decoys).is_ok());
    }

    #[test]
    fn test_validate_decoys_rejects() {
        let list = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert!(validate_decoys("a", 2, &list(&["b"])).is_err());
        assert!(validate_decoys("a", 2, &list(&["b", "a"])).is_err());
        assert!(validate_decoys("a", 2, &list(&["b", "b"])).is_err());
        assert!(validate_decoys("a", 2, &list(&["b", " "])).is_err());
        assert!(validate_decoys("a", 2, &list(&["b", "c"])).is_ok());
    }

    #[test]
    fn test_parse_wolf_pair() {
        let pair = parse_wolf_pair(r#"{"majority": " River ", "minority": "Lake"}"#).unwrap();
        assert_eq!(pair, WordPair::new("River", "Lake"));

        assert!(matches!(
            parse_wolf_pair(r#"{"majority": "Lake", "minority": "Lake"}"#),
            Err(ProviderError::Malformed(_))
        ));
        assert!(matches!(parse_wolf_pair("[]"), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_parse_decoys() {
        let decoys = parse_decoys(r#"["Pear", "Plum"]"#, "Apple", 2).unwrap();
        assert_eq!(decoys, vec!["Pear", "Plum"]);

        assert!(parse_decoys(r#"["Pear"]"#, "Apple", 2).is_err());
        assert!(parse_decoys(r#"{"x": 1}"#, "Apple", 2).is_err());
    }
}

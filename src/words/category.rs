//! Word categories and the category store.
//!
//! A category is a name plus a word pool. The fully-random category has an
//! empty pool; secret words and decoys for it come from the
//! [`SecretWordProvider`](super::SecretWordProvider).
//!
//! The engine only consumes a resolved [`Category`]. Persisting custom
//! categories is the host's job; [`InMemoryCategoryStore`] offers JSON
//! export/import so the host can load at startup and save on change.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SetupError;

/// Name of the fully-random category.
pub const RANDOM_CATEGORY: &str = "Random";

/// A named word pool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The fully-random category.
    #[must_use]
    pub fn random() -> Self {
        Self {
            name: RANDOM_CATEGORY.to_string(),
            words: Vec::new(),
        }
    }

    /// True when words must come from the provider instead of the pool.
    #[must_use]
    pub fn is_random(&self) -> bool {
        self.words.is_empty()
    }

    /// Pool words in order, first occurrence kept.
    #[must_use]
    pub fn distinct_words(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.words
            .iter()
            .map(String::as_str)
            .filter(|w| seen.insert(*w))
            .collect()
    }

    /// This category with repeated words removed.
    #[must_use]
    pub fn deduped(&self) -> Self {
        Self::new(self.name.clone(), self.distinct_words())
    }
}

/// Category persistence collaborator.
pub trait CategoryStore {
    /// All categories, built-ins first.
    fn list(&self) -> Vec<Category>;

    /// Look a category up by name.
    fn get(&self, name: &str) -> Option<Category> {
        self.list().into_iter().find(|c| c.name == name)
    }

    /// Create a custom category.
    ///
    /// Words are trimmed, blank entries dropped and repeats removed before
    /// counting.
    fn create(&mut self, name: &str, words: &[String]) -> Result<Category, SetupError>;

    /// Delete a custom category.
    fn delete(&mut self, name: &str) -> Result<(), SetupError>;
}

/// Built-in categories plus user-created ones, held in memory.
#[derive(Clone, Debug)]
pub struct InMemoryCategoryStore {
    builtins: Vec<Category>,
    custom: Vec<Category>,
    min_words: usize,
}

impl Default for InMemoryCategoryStore {
    fn default() -> Self {
        Self::new(super::provider::builtin_categories(), 8)
    }
}

impl InMemoryCategoryStore {
    #[must_use]
    pub fn new(builtins: Vec<Category>, min_words: usize) -> Self {
        Self {
            builtins,
            custom: Vec::new(),
            min_words,
        }
    }

    /// Custom categories only.
    #[must_use]
    pub fn custom(&self) -> &[Category] {
        &self.custom
    }

    fn validate(&self, name: &str, words: &[String]) -> Result<Category, SetupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SetupError::EmptyCategoryName);
        }
        if self.builtins.iter().chain(&self.custom).any(|c| c.name == name) {
            return Err(SetupError::DuplicateCategory(name.to_string()));
        }

        let mut seen = FxHashSet::default();
        let words: Vec<String> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty() && seen.insert(*w))
            .map(str::to_string)
            .collect();
        if words.len() < self.min_words {
            return Err(SetupError::TooFewWords {
                count: words.len(),
                min: self.min_words,
            });
        }

        Ok(Category {
            name: name.to_string(),
            words,
        })
    }

    /// Serialize custom categories for the host's key-value store.
    pub fn export_json(&self) -> Result<String, SetupError> {
        serde_json::to_string(&self.custom).map_err(|e| SetupError::MalformedCategories(e.to_string()))
    }

    /// Replace custom categories with a previously exported set.
    ///
    /// All-or-nothing: one invalid entry rejects the whole import.
    pub fn import_json(&mut self, json: &str) -> Result<usize, SetupError> {
        let incoming: Vec<Category> =
            serde_json::from_str(json).map_err(|e| SetupError::MalformedCategories(e.to_string()))?;

        let mut staged = Self::new(self.builtins.clone(), self.min_words);
        for category in &incoming {
            let valid = staged.validate(&category.name, &category.words)?;
            staged.custom.push(valid);
        }

        let count = staged.custom.len();
        self.custom = staged.custom;
        debug!(count, "custom categories imported");
        Ok(count)
    }
}

impl CategoryStore for InMemoryCategoryStore {
    fn list(&self) -> Vec<Category> {
        self.builtins.iter().chain(&self.custom).cloned().collect()
    }

    fn create(&mut self, name: &str, words: &[String]) -> Result<Category, SetupError> {
        let category = self.validate(name, words)?;
        debug!(name = %category.name, words = category.words.len(), "custom category created");
        self.custom.push(category.clone());
        Ok(category)
    }

    fn delete(&mut self, name: &str) -> Result<(), SetupError> {
        if self.builtins.iter().any(|c| c.name == name) {
            return Err(SetupError::BuiltInCategory(name.to_string()));
        }
        let pos = self
            .custom
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| SetupError::UnknownCategory(name.to_string()))?;
        self.custom.remove(pos);
        Ok(())
    }
}

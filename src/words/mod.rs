//! Word collaborators: categories, the Secret Word Provider and guess options.
//!
//! The engine never stores categories or generates words itself. It receives
//! a resolved [`Category`] from the host and asks a [`SecretWordProvider`]
//! for everything else.

pub mod category;
pub mod options;
pub mod provider;

pub use category::{Category, CategoryStore, InMemoryCategoryStore, RANDOM_CATEGORY};
pub use options::guess_options;
pub use provider::{
    builtin_categories, parse_decoys, parse_wolf_pair, validate_decoys, SecretWordProvider,
    StaticWordProvider, WordPair,
};

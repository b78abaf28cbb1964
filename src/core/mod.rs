//! Core engine types: players, state, events, timers, RNG, configuration.
//!
//! Everything here is plain data plus small invariant-keeping methods. The
//! round rules live in the component modules and the controller.

pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;
pub mod timer;

pub use config::{GameConfig, ScoringConfig};
pub use error::{GameError, ProviderError, SetupError, TransitionError};
pub use event::{Event, EventRecord};
pub use player::{Player, Roster};
pub use rng::{GameRng, GameRngState};
pub use state::{GameMode, GameState, Phase, RoleCard, Round, SpyCountPolicy};
pub use timer::{TickOutcome, Timer, TimerId, TimerKind, TimerSlot};

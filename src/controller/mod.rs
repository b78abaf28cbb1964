//! Round controller: the public operation surface.
//!
//! ## Applying events
//!
//! [`RoundController::apply`] clones the state (O(1) thanks to `im`), runs
//! the transition on the clone and swaps it in only on success. A rejected
//! event therefore leaves the controller exactly as it was, including the
//! RNG, the timer slot and every score.
//!
//! ## Operations
//!
//! Each named method (`add_player`, `toggle_vote`, `tick`, ...) is a thin
//! wrapper that builds the matching [`Event`] and calls `apply`. All of them
//! return the post-transition [`Snapshot`].
//!
//! ```
//! use word_spy::controller::RoundController;
//! use word_spy::core::{GameConfig, GameMode, GameRng, Phase};
//! use word_spy::words::StaticWordProvider;
//!
//! let mut game = RoundController::with_provider(
//!     GameConfig::default(),
//!     StaticWordProvider::new(),
//!     GameRng::new(42),
//! )
//! .unwrap();
//!
//! game.choose_mode(GameMode::Wolf).unwrap();
//! for name in ["Ana", "Ben", "Cy"] {
//!     game.add_player(name, 0).unwrap();
//! }
//! let snapshot = game.start_round().unwrap();
//! assert_eq!(snapshot.phase, Phase::RoleReveal);
//! ```

pub mod legal;
pub mod machine;
pub mod snapshot;

pub use legal::legal_events;
pub use machine::transition;
pub use snapshot::Snapshot;

use tracing::debug;

use crate::core::{
    Event, EventRecord, GameConfig, GameError, GameMode, GameRng, GameState, RoleCard, SpyCountPolicy, TimerId,
};
use crate::words::{Category, SecretWordProvider, StaticWordProvider};

/// Owns the configuration, the word provider and the game state.
#[derive(Debug)]
pub struct RoundController<P: SecretWordProvider = StaticWordProvider> {
    config: GameConfig,
    provider: P,
    state: GameState,
}

impl RoundController<StaticWordProvider> {
    /// Controller with built-in words and an entropy-seeded RNG.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_provider(config, StaticWordProvider::new(), GameRng::from_entropy())
    }
}

impl<P: SecretWordProvider> RoundController<P> {
    /// Controller with a custom provider and RNG.
    pub fn with_provider(config: GameConfig, provider: P, rng: GameRng) -> Result<Self, GameError> {
        config.validate()?;
        debug!(seed = rng.seed(), "controller created");
        Ok(Self {
            config,
            provider,
            state: GameState::new(rng),
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Events the current phase accepts.
    #[must_use]
    pub fn legal_events(&self) -> Vec<Event> {
        legal_events(&self.state, &self.config)
    }

    /// Role card of `name` in the current round.
    #[must_use]
    pub fn role_card(&self, name: &str) -> Option<RoleCard> {
        let round = self.state.round.as_ref()?;
        self.state.roster.contains(name).then(|| round.role_card(name))
    }

    /// Id of the live timer, if any.
    #[must_use]
    pub fn live_timer(&self) -> Option<TimerId> {
        self.state.timers.live().map(|t| t.id)
    }

    /// Apply one event, all or nothing.
    pub fn apply(&mut self, event: Event) -> Result<Snapshot, GameError> {
        let mut next = self.state.clone();
        let from = next.phase;
        if let Err(err) = transition(&mut next, &event, &self.config, &mut self.provider) {
            debug!(event = event.name(), code = err.code(), phase = ?from, "event rejected");
            return Err(err);
        }

        if !event.is_tick() {
            let round = next.round.as_ref().map_or(next.rounds_played, |r| r.number);
            let sequence = next.next_sequence();
            next.record(EventRecord::new(round, sequence, event.clone()));
        }
        if next.phase != from {
            debug!(event = event.name(), from = ?from, to = ?next.phase, "phase changed");
        }
        self.state = next;
        Ok(self.snapshot())
    }

    pub fn add_player(&mut self, name: &str, avatar: u8) -> Result<Snapshot, GameError> {
        self.apply(Event::AddPlayer {
            name: name.to_string(),
            avatar,
        })
    }

    pub fn remove_player(&mut self, name: &str) -> Result<Snapshot, GameError> {
        self.apply(Event::RemovePlayer { name: name.to_string() })
    }

    pub fn choose_mode(&mut self, mode: GameMode) -> Result<Snapshot, GameError> {
        self.apply(Event::ChooseMode(mode))
    }

    pub fn choose_category(&mut self, category: Category) -> Result<Snapshot, GameError> {
        self.apply(Event::ChooseCategory(category))
    }

    pub fn choose_spy_count_policy(&mut self, policy: SpyCountPolicy) -> Result<Snapshot, GameError> {
        self.apply(Event::ChooseSpyCountPolicy(policy))
    }

    /// Start a round, or open the spy-count choice for large Spy games.
    pub fn start_round(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::StartRound)
    }

    pub fn reveal_next_player(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::RevealNextPlayer)
    }

    pub fn advance_question_turn(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::AdvanceQuestionTurn)
    }

    pub fn purchase_ability(&mut self, asker: &str, target: &str) -> Result<Snapshot, GameError> {
        self.apply(Event::PurchaseAbility {
            asker: asker.to_string(),
            target: target.to_string(),
        })
    }

    pub fn start_rapid_round(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::StartRapidRound)
    }

    pub fn begin_rapid_turn(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::BeginRapidTurn)
    }

    pub fn skip_rapid_turn(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::SkipRapidTurn)
    }

    pub fn start_voting(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::StartVoting)
    }

    pub fn toggle_vote(&mut self, candidate: &str) -> Result<Snapshot, GameError> {
        self.apply(Event::ToggleVote {
            candidate: candidate.to_string(),
        })
    }

    pub fn confirm_vote(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::ConfirmVote)
    }

    pub fn submit_escape_guess(&mut self, choice: &str) -> Result<Snapshot, GameError> {
        self.apply(Event::SubmitEscapeGuess {
            choice: choice.to_string(),
        })
    }

    /// Deliver one unit of time to `timer`.
    pub fn tick(&mut self, timer: TimerId) -> Result<Snapshot, GameError> {
        self.apply(Event::Tick { timer })
    }

    /// Tick the live timer until it expires. Returns `None` if no timer was live.
    pub fn run_timer(&mut self) -> Option<Result<Snapshot, GameError>> {
        let id = self.live_timer()?;
        loop {
            let result = self.tick(id);
            if result.is_err() || self.live_timer() != Some(id) {
                return Some(result);
            }
        }
    }

    pub fn start_new_round(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::StartNewRound)
    }

    pub fn abort_round(&mut self) -> Result<Snapshot, GameError> {
        self.apply(Event::AbortRound)
    }
}

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use word_spy::core::{GameConfig, GameMode, GameRng, Phase, ProviderError, SpyCountPolicy};
use word_spy::words::{Category, SecretWordProvider, WordPair};
use word_spy::RoundController;

/// Provider with fixed answers and a failure switch.
#[derive(Debug)]
pub struct ScriptedProvider {
    pub secret: String,
    pub pair: WordPair,
    pub fail: bool,
    pub calls: usize,
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self {
            secret: "Pizza".into(),
            pair: WordPair::new("Cat", "Dog"),
            fail: false,
            calls: 0,
        }
    }
}

impl SecretWordProvider for ScriptedProvider {
    fn secret_word(&mut self, _: &Category, _: &mut GameRng) -> Result<String, ProviderError> {
        self.calls += 1;
        if self.fail {
            return Err(ProviderError::Unavailable("scripted failure".into()));
        }
        Ok(self.secret.clone())
    }

    fn wolf_pair(&mut self, _: &mut GameRng) -> Result<WordPair, ProviderError> {
        self.calls += 1;
        if self.fail {
            return Err(ProviderError::Unavailable("scripted failure".into()));
        }
        Ok(self.pair.clone())
    }

    fn decoys(&mut self, _: &str, count: usize, _: &mut GameRng) -> Result<Vec<String>, ProviderError> {
        self.calls += 1;
        Ok((1..=count).map(|i| format!("Decoy {i}")).collect())
    }
}

pub type Game = RoundController<ScriptedProvider>;

/// Controller at `PlayerSetup` with players `P1..=Pn` registered.
pub fn new_game(mode: GameMode, players: usize, config: GameConfig, seed: u64) -> Game {
    let mut game = RoundController::with_provider(config, ScriptedProvider::default(), GameRng::new(seed)).unwrap();
    game.choose_mode(mode).unwrap();
    if mode == GameMode::Spy {
        game.choose_category(Category::random()).unwrap();
    }
    for i in 1..=players {
        game.add_player(&format!("P{i}"), i as u8).unwrap();
    }
    assert_eq!(game.state().phase, Phase::PlayerSetup);
    game
}

/// Start a round, answering the spy-count choice with `policy` if asked.
pub fn start(game: &mut Game, policy: SpyCountPolicy) {
    game.start_round().unwrap();
    if game.state().phase == Phase::SpyCountChoice {
        game.choose_spy_count_policy(policy).unwrap();
    }
    assert_eq!(game.state().phase, Phase::RoleReveal);
}

pub fn reveal_all(game: &mut Game) {
    while game.state().phase == Phase::RoleReveal {
        game.reveal_next_player().unwrap();
    }
}

pub fn finish_cycle(game: &mut Game) {
    while !game.state().round.as_ref().unwrap().cycle_complete() {
        game.advance_question_turn().unwrap();
    }
}

/// Reveal every role, run the question cycle and open voting.
pub fn to_voting(game: &mut Game) {
    reveal_all(game);
    finish_cycle(game);
    game.start_voting().unwrap();
    assert_eq!(game.state().phase, Phase::Voting);
}

pub fn impostors(game: &Game) -> Vec<String> {
    game.state().round.as_ref().unwrap().impostors.clone()
}

pub fn citizens(game: &Game) -> Vec<String> {
    let impostors = impostors(game);
    game.state()
        .roster
        .names()
        .into_iter()
        .filter(|n| !impostors.contains(n))
        .collect()
}

pub fn score(game: &Game, name: &str) -> i64 {
    game.state().roster.get(name).unwrap().score()
}

/// Let every voter in turn pick `pick(voter)` and confirm.
pub fn cast_votes(game: &mut Game, pick: impl Fn(&str) -> Vec<String>) {
    while game.state().phase == Phase::Voting {
        let voter = game.snapshot().active_player.unwrap();
        for candidate in pick(&voter) {
            game.toggle_vote(&candidate).unwrap();
        }
        game.confirm_vote().unwrap();
    }
}

/// Everyone names the first impostor; impostors name a citizen instead.
pub fn vote_out_impostor(game: &mut Game) {
    let target = impostors(game)[0].clone();
    let fallback = citizens(game)[0].clone();
    cast_votes(game, |voter| {
        if voter == target {
            vec![fallback.clone()]
        } else {
            vec![target.clone()]
        }
    });
}

/// Play a whole round in which the first impostor is caught.
pub fn play_caught_round(game: &mut Game) {
    to_voting(game);
    vote_out_impostor(game);
    game.run_timer().unwrap().unwrap();
}

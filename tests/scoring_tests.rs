//! End-to-end scoring: base commit, escape commit, refunds and crowns.

mod common;

use common::*;
use word_spy::core::{GameConfig, GameError, GameMode, Phase, SpyCountPolicy, TimerKind, TransitionError};
use word_spy::Accused;

#[test]
fn test_spy_single_vote_points() {
    let mut game = new_game(GameMode::Spy, 5, GameConfig::default(), 100);
    start(&mut game, SpyCountPolicy::Single);
    to_voting(&mut game);

    let spy = impostors(&game)[0].clone();
    let citizens = citizens(&game);
    let wrong = citizens[0].clone();
    let right_voter = citizens[1].clone();
    let wrong_voter = citizens[2].clone();

    cast_votes(&mut game, |voter| {
        if voter == right_voter || voter == citizens[3] {
            vec![spy.clone()]
        } else if voter == wrong_voter || voter == spy {
            vec![wrong.clone()]
        } else {
            vec![spy.clone()]
        }
    });
    game.run_timer().unwrap().unwrap();

    let round = game.state().round.clone().unwrap();
    let right = round.result_for(&right_voter).unwrap();
    assert!(right.was_correct);
    assert_eq!(right.points_gained, 100);

    let wrong_result = round.result_for(&wrong_voter).unwrap();
    assert!(!wrong_result.was_correct);
    assert_eq!(wrong_result.points_gained, -50);

    assert_eq!(score(&game, &right_voter), 100);
    assert_eq!(score(&game, &wrong_voter), -50);
    assert_eq!(score(&game, &spy), 0);
    assert_eq!(game.state().phase, Phase::RoundResults);
}

#[test]
fn test_wolf_caught_pays_every_citizen() {
    let mut game = new_game(GameMode::Wolf, 4, GameConfig::default(), 101);
    start(&mut game, SpyCountPolicy::Single);
    play_caught_round(&mut game);

    let wolf = impostors(&game)[0].clone();
    assert_eq!(game.state().phase, Phase::RoundResults);
    assert_eq!(score(&game, &wolf), 0);
    for citizen in citizens(&game) {
        assert_eq!(score(&game, &citizen), 200);
    }
}

#[test]
fn test_wolf_escape_pays_only_the_wolf() {
    let mut game = new_game(GameMode::Wolf, 4, GameConfig::default(), 102);
    start(&mut game, SpyCountPolicy::Single);
    to_voting(&mut game);

    let wolf = impostors(&game)[0].clone();
    let citizens = citizens(&game);
    let (scapegoat, other) = (citizens[0].clone(), citizens[1].clone());
    cast_votes(&mut game, |voter| {
        if voter == scapegoat {
            vec![other.clone()]
        } else {
            vec![scapegoat.clone()]
        }
    });
    game.run_timer().unwrap().unwrap();

    assert_eq!(
        game.state().round.as_ref().unwrap().accused,
        Some(Accused::Player(scapegoat))
    );
    assert_eq!(game.state().phase, Phase::RoundResults);
    assert_eq!(score(&game, &wolf), 300);
    for citizen in &citizens {
        assert_eq!(score(&game, citizen), 0);
    }
}

#[test]
fn test_ability_refund_on_correct_vote() {
    let mut game = new_game(GameMode::Spy, 3, GameConfig::default(), 103);
    start(&mut game, SpyCountPolicy::Single);

    // Play caught rounds until a citizen sits on exactly 200 points.
    let mut buyer = None;
    for _ in 0..40 {
        buyer = citizens(&game).into_iter().find(|c| score(&game, c) == 200);
        if buyer.is_some() {
            break;
        }
        play_caught_round(&mut game);
        game.start_new_round().unwrap();
    }
    let buyer = buyer.expect("a citizen reaches 200 points");
    let target = citizens(&game).into_iter().find(|c| *c != buyer).unwrap();

    reveal_all(&mut game);
    let snap = game.purchase_ability(&buyer, &target).unwrap();
    assert_eq!(snap.score(&buyer), 0);
    assert_eq!(
        game.purchase_ability(&buyer, &target).unwrap_err(),
        GameError::Transition(TransitionError::AbilityAlreadyUsed(buyer.clone()))
    );

    finish_cycle(&mut game);
    game.start_voting().unwrap();
    vote_out_impostor(&mut game);
    game.run_timer().unwrap().unwrap();

    let result = game.state().round.as_ref().unwrap().result_for(&buyer).cloned().unwrap();
    assert!(result.was_correct);
    assert!(result.ability_refunded);
    assert_eq!(result.points_gained, 100);
    assert_eq!(score(&game, &buyer), 300);
}

#[test]
fn test_wolf_ability_is_not_refunded() {
    let mut game = new_game(GameMode::Wolf, 4, GameConfig::default(), 7);
    start(&mut game, SpyCountPolicy::Single);

    let mut buyer = None;
    for _ in 0..40 {
        buyer = citizens(&game).into_iter().find(|c| score(&game, c) == 200);
        if buyer.is_some() {
            break;
        }
        play_caught_round(&mut game);
        game.start_new_round().unwrap();
    }
    let buyer = buyer.expect("a citizen reaches 200 points");
    let target = citizens(&game).into_iter().find(|c| *c != buyer).unwrap();

    reveal_all(&mut game);
    let snap = game.purchase_ability(&buyer, &target).unwrap();
    assert_eq!(snap.score(&buyer), 0);

    finish_cycle(&mut game);
    game.start_voting().unwrap();
    vote_out_impostor(&mut game);
    game.run_timer().unwrap().unwrap();

    let result = game.state().round.as_ref().unwrap().result_for(&buyer).cloned().unwrap();
    assert!(result.was_correct);
    assert!(!result.ability_refunded);
    assert_eq!(result.points_gained, 200);
    assert_eq!(score(&game, &buyer), 200);
}

#[test]
fn test_ability_needs_points() {
    let mut game = new_game(GameMode::Spy, 3, GameConfig::default(), 104);
    start(&mut game, SpyCountPolicy::Single);
    reveal_all(&mut game);

    let err = game.purchase_ability("P1", "P2").unwrap_err();
    assert_eq!(err.code(), "insufficient_points");
    assert_eq!(
        err,
        GameError::Transition(TransitionError::InsufficientPoints {
            name: "P1".into(),
            score: 0,
            cost: 200
        })
    );
    assert_eq!(
        game.purchase_ability("P1", "P1").unwrap_err(),
        GameError::Transition(TransitionError::SelfTarget)
    );
    assert!(game.state().round.as_ref().unwrap().ability_used_by.is_empty());
}

/// Seeds a 6-player Random game until two spies are drawn.
fn two_spy_game() -> Game {
    for seed in 0..200 {
        let mut game = new_game(GameMode::Spy, 6, GameConfig::default(), seed);
        start(&mut game, SpyCountPolicy::Random);
        if impostors(&game).len() == 2 {
            return game;
        }
    }
    panic!("no seed produced two spies");
}

#[test]
fn test_collaborative_escape_guess() {
    let mut game = two_spy_game();
    to_voting(&mut game);

    let spies = impostors(&game);
    let citizens = citizens(&game);
    let (scapegoat, other) = (citizens[0].clone(), citizens[1].clone());
    cast_votes(&mut game, |voter| {
        if voter == scapegoat {
            vec![other.clone()]
        } else {
            vec![scapegoat.clone()]
        }
    });
    game.run_timer().unwrap().unwrap();

    assert_eq!(game.state().phase, Phase::EscapeGuess);
    let round = game.state().round.clone().unwrap();
    assert_eq!(round.pending_guessers().len(), 2);
    assert!(round.base_committed);
    assert!(!round.escape_committed);
    // Spies score nothing until the guess resolves.
    assert!(spies.iter().all(|s| score(&game, s) == 0));

    assert_eq!(
        game.submit_escape_guess("Sushi").unwrap_err(),
        GameError::Transition(TransitionError::UnknownGuessOption("Sushi".into()))
    );
    let snap = game.submit_escape_guess("Pizza").unwrap();
    assert_eq!(snap.timer.unwrap().kind, TimerKind::GuessDelay);
    assert_eq!(
        game.submit_escape_guess("Pizza").unwrap_err(),
        GameError::Transition(TransitionError::GuessPending)
    );

    let round = game.state().round.clone().unwrap();
    let first = &round.escape_guesses[&spies[0]];
    let second = &round.escape_guesses[&spies[1]];
    assert_eq!(first, second);
    assert!(first.correct);

    game.run_timer().unwrap().unwrap();
    assert_eq!(game.state().phase, Phase::RoundResults);
    for spy in &spies {
        assert_eq!(score(&game, spy), 450);
    }
}

#[test]
fn test_accused_spy_gets_no_escape_points() {
    let mut game = two_spy_game();
    to_voting(&mut game);

    let spies = impostors(&game);
    let (caught, free) = (spies[0].clone(), spies[1].clone());
    let citizens = citizens(&game);
    cast_votes(&mut game, |voter| {
        if voter == caught {
            vec![citizens[0].clone()]
        } else {
            vec![caught.clone()]
        }
    });
    game.run_timer().unwrap().unwrap();

    let round = game.state().round.clone().unwrap();
    assert_eq!(round.accused, Some(Accused::Player(caught.clone())));
    assert_eq!(round.pending_guessers(), vec![free.clone()]);

    let wrong = round.guess_options.iter().find(|o| *o != "Pizza").unwrap().clone();
    game.submit_escape_guess(&wrong).unwrap();
    game.run_timer().unwrap().unwrap();

    assert_eq!(score(&game, &caught), 0);
    assert_eq!(score(&game, &free), 200);
    // Every citizen named one spy and nobody else.
    for citizen in &citizens {
        assert_eq!(score(&game, citizen), 100);
    }
}

#[test]
fn test_commits_apply_once() {
    let mut game = new_game(GameMode::Spy, 4, GameConfig::default(), 105);
    start(&mut game, SpyCountPolicy::Single);
    play_caught_round(&mut game);

    let scores: Vec<i64> = game.state().roster.iter().map(|p| p.score()).collect();
    assert!(game.run_timer().is_none());
    let round = game.state().round.clone().unwrap();
    assert!(round.base_committed && round.escape_committed);
    assert_eq!(scores, game.state().roster.iter().map(|p| p.score()).collect::<Vec<_>>());
}

#[test]
fn test_crowns_follow_score() {
    let mut game = new_game(GameMode::Wolf, 3, GameConfig::default(), 106);
    for _ in 0..12 {
        start(&mut game, SpyCountPolicy::Single);
        play_caught_round(&mut game);
        game.abort_round().unwrap();
    }
    for player in game.state().roster.iter() {
        assert_eq!(player.crowns(), word_spy::crowns_for(player.score()));
    }
    assert!(game.state().roster.iter().any(|p| p.crowns() >= 1));
}

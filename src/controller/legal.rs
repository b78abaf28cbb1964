//! Enumeration of the events the current phase accepts.
//!
//! Every event returned here is accepted by [`transition`](super::machine::transition)
//! given the same state, except `StartRound`/`ChooseSpyCountPolicy`/
//! `StartNewRound`, which can still fail when the word provider does.
//! `AbortRound` is listed whenever it is allowed.

use crate::core::{Event, GameConfig, GameMode, GameState, Phase, SpyCountPolicy, TimerKind};
use crate::scoring::check_purchase;
use crate::turns::RapidStage;
use crate::words::builtin_categories;

/// All events accepted in `state`.
#[must_use]
pub fn legal_events(state: &GameState, config: &GameConfig) -> Vec<Event> {
    let mut events = Vec::new();
    let round = state.round.as_ref();
    let live_tick = state.timers.live().map(|t| Event::Tick { timer: t.id });

    match state.phase {
        Phase::Menu => {
            events.push(Event::ChooseMode(GameMode::Spy));
            events.push(Event::ChooseMode(GameMode::Wolf));
        }
        Phase::Setup => {
            events.extend(builtin_categories().into_iter().map(Event::ChooseCategory));
            events.push(Event::ChooseMode(GameMode::Wolf));
        }
        Phase::PlayerSetup => {
            let count = state.roster.len();
            if count < config.max_players {
                let name = (1..)
                    .map(|i| format!("Player {i}"))
                    .find(|n| !state.roster.contains(n))
                    .unwrap_or_default();
                events.push(Event::AddPlayer {
                    name,
                    avatar: (count % 16) as u8,
                });
            }
            events.extend(state.roster.names().into_iter().map(|name| Event::RemovePlayer { name }));
            if (config.min_players..=config.max_players).contains(&count) {
                events.push(Event::StartRound);
            }
            let other = match state.mode {
                GameMode::Spy => GameMode::Wolf,
                GameMode::Wolf => GameMode::Spy,
            };
            events.push(Event::ChooseMode(other));
        }
        Phase::SpyCountChoice => {
            events.push(Event::ChooseSpyCountPolicy(SpyCountPolicy::Single));
            events.push(Event::ChooseSpyCountPolicy(SpyCountPolicy::Random));
        }
        Phase::RoleReveal => events.push(Event::RevealNextPlayer),
        Phase::QuestionTurns => {
            if let Some(round) = round {
                if round.cycle_complete() {
                    events.push(Event::StartVoting);
                    events.push(Event::StartRapidRound);
                } else {
                    events.push(Event::AdvanceQuestionTurn);
                    let names = state.roster.names();
                    for asker in &names {
                        for target in &names {
                            if check_purchase(&state.roster, round, asker, target, config.ability_cost).is_ok() {
                                events.push(Event::PurchaseAbility {
                                    asker: asker.clone(),
                                    target: target.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        Phase::RapidRound => {
            let stage = round.and_then(|r| r.rapid_round.as_ref()).map(|r| r.stage);
            match stage {
                Some(RapidStage::Ready) => events.push(Event::BeginRapidTurn),
                Some(RapidStage::Running) => events.extend(live_tick.clone()),
                None => {}
            }
            events.push(Event::SkipRapidTurn);
        }
        Phase::Voting => {
            if let Some(round) = round {
                let voter = state.roster.at(round.voter_index).map(|p| p.name.as_str());
                let full = round.selection.len() >= round.policy.max_votes();
                for candidate in state.roster.iter().map(|p| &p.name) {
                    let chosen = round.selection.contains(candidate);
                    if Some(candidate.as_str()) != voter && (chosen || !full) {
                        events.push(Event::ToggleVote {
                            candidate: candidate.clone(),
                        });
                    }
                }
                if !round.selection.is_empty() || config.allow_abstention {
                    events.push(Event::ConfirmVote);
                }
            }
        }
        Phase::AccusationReveal => events.extend(live_tick.clone()),
        Phase::EscapeGuess => {
            let guessing = state.timers.live().is_some_and(|t| t.kind == TimerKind::GuessDelay);
            if guessing {
                events.extend(live_tick.clone());
            } else if let Some(round) = round {
                events.extend(
                    round
                        .guess_options
                        .iter()
                        .map(|choice| Event::SubmitEscapeGuess { choice: choice.clone() }),
                );
            }
        }
        Phase::RoundResults => events.push(Event::StartNewRound),
    }

    if state.phase.is_in_round() {
        events.push(Event::AbortRound);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    #[test]
    fn test_menu_offers_both_modes() {
        let state = GameState::new(GameRng::new(1));
        let events = legal_events(&state, &GameConfig::default());
        assert_eq!(
            events,
            vec![Event::ChooseMode(GameMode::Spy), Event::ChooseMode(GameMode::Wolf)]
        );
    }

    #[test]
    fn test_player_setup_gates_start() {
        let config = GameConfig::default();
        let mut state = GameState::new(GameRng::new(1));
        state.phase = Phase::PlayerSetup;
        state.roster.add("Player 1", 0, 8).unwrap();
        state.roster.add("Player 2", 0, 8).unwrap();

        let events = legal_events(&state, &config);
        assert!(!events.contains(&Event::StartRound));
        assert!(events.contains(&Event::AddPlayer {
            name: "Player 3".into(),
            avatar: 2
        }));

        state.roster.add("Player 3", 0, 8).unwrap();
        assert!(legal_events(&state, &config).contains(&Event::StartRound));
        assert!(!legal_events(&state, &config).contains(&Event::AbortRound));
    }
}

//! The transition function: `(state, event) -> state | error`.
//!
//! [`transition`] mutates the state it is given and may leave it half-way
//! changed when it fails. The controller always hands it a clone and keeps
//! the original on error, so callers only ever see whole transitions.
//!
//! ## Timers
//!
//! Every transition that leaves a timed phase cancels the live timer before
//! it changes anything else. A later tick for that timer fails with
//! `StaleTimer`, so an old continuation never reaches a newer phase or round.

use tracing::{debug, info, warn};

use crate::core::{
    Event, GameConfig, GameError, GameMode, GameState, Phase, Round, SetupError, SpyCountPolicy, TickOutcome,
    TimerKind, TransitionError,
};
use crate::roles::assign_roles;
use crate::scoring::{apply_commit, purchase, ScoreEngine};
use crate::turns::{question_cycle, RapidRound, RapidStage};
use crate::voting::{toggle, VoteTally};
use crate::words::{Category, SecretWordProvider};

/// Apply one event to `state`.
pub fn transition<P: SecretWordProvider + ?Sized>(
    state: &mut GameState,
    event: &Event,
    config: &GameConfig,
    provider: &mut P,
) -> Result<(), GameError> {
    match event {
        Event::AddPlayer { name, avatar } => {
            expect_phase(state, &[Phase::PlayerSetup])?;
            state.roster.add(name, *avatar, config.max_players)?;
        }
        Event::RemovePlayer { name } => {
            expect_phase(state, &[Phase::PlayerSetup])?;
            state.roster.remove(name)?;
        }
        Event::ChooseMode(mode) => {
            expect_phase(state, &[Phase::Menu, Phase::Setup, Phase::PlayerSetup])?;
            state.mode = *mode;
            state.phase = match mode {
                GameMode::Spy => Phase::Setup,
                GameMode::Wolf => Phase::PlayerSetup,
            };
        }
        Event::ChooseCategory(category) => {
            expect_phase(state, &[Phase::Setup])?;
            choose_category(state, category, config)?;
        }
        Event::StartRound => {
            expect_phase(state, &[Phase::PlayerSetup])?;
            check_player_count(state, config)?;
            state.clear_history();
            if offers_policy_choice(state, config) {
                state.phase = Phase::SpyCountChoice;
            } else {
                begin_round(state, SpyCountPolicy::Single, config, provider)?;
            }
        }
        Event::ChooseSpyCountPolicy(policy) => {
            expect_phase(state, &[Phase::SpyCountChoice])?;
            begin_round(state, *policy, config, provider)?;
        }
        Event::RevealNextPlayer => {
            expect_phase(state, &[Phase::RoleReveal])?;
            let players = state.roster.len();
            let round = live_round(&mut state.round)?;
            if round.reveal_index >= players {
                return Err(TransitionError::RevealComplete.into());
            }
            round.reveal_index += 1;
            if round.reveal_index == players {
                state.phase = Phase::QuestionTurns;
            }
        }
        Event::AdvanceQuestionTurn => {
            expect_phase(state, &[Phase::QuestionTurns])?;
            let round = live_round(&mut state.round)?;
            if round.cycle_complete() {
                return Err(TransitionError::CycleComplete.into());
            }
            round.turn_index += 1;
        }
        Event::PurchaseAbility { asker, target } => {
            expect_phase(state, &[Phase::QuestionTurns])?;
            let round = live_round(&mut state.round)?;
            if round.cycle_complete() {
                return Err(TransitionError::CycleComplete.into());
            }
            purchase(&mut state.roster, round, asker, target, config.ability_cost)?;
        }
        Event::StartRapidRound => {
            expect_phase(state, &[Phase::QuestionTurns])?;
            let names = state.roster.names();
            let round = live_round(&mut state.round)?;
            if !round.cycle_complete() {
                return Err(TransitionError::CycleIncomplete.into());
            }
            round.rapid_round = Some(RapidRound::new(
                &names,
                &round.question_turns,
                config.rapid_turn_ticks,
                &mut state.rng,
            ));
            state.phase = Phase::RapidRound;
        }
        Event::BeginRapidTurn => {
            expect_phase(state, &[Phase::RapidRound])?;
            let rapid = live_rapid(&mut state.round)?;
            if rapid.stage == RapidStage::Running {
                return Err(TransitionError::RapidTurnRunning.into());
            }
            rapid.begin(config.rapid_turn_ticks);
            state.timers.arm(TimerKind::RapidTurn, config.rapid_turn_ticks);
        }
        Event::SkipRapidTurn => {
            expect_phase(state, &[Phase::RapidRound])?;
            state.timers.cancel();
            advance_rapid(state, config)?;
        }
        Event::StartVoting => {
            expect_phase(state, &[Phase::QuestionTurns])?;
            if !live_round(&mut state.round)?.cycle_complete() {
                return Err(TransitionError::CycleIncomplete.into());
            }
            enter_voting(state)?;
        }
        Event::ToggleVote { candidate } => {
            expect_phase(state, &[Phase::Voting])?;
            toggle_vote(state, candidate)?;
        }
        Event::ConfirmVote => {
            expect_phase(state, &[Phase::Voting])?;
            confirm_vote(state, config)?;
        }
        Event::SubmitEscapeGuess { choice } => {
            expect_phase(state, &[Phase::EscapeGuess])?;
            submit_escape_guess(state, choice, config)?;
        }
        Event::Tick { timer } => {
            let kind = state.timers.live().map(|t| t.kind);
            match state.timers.tick(*timer)? {
                TickOutcome::Running(remaining) => {
                    if kind == Some(TimerKind::RapidTurn) {
                        live_rapid(&mut state.round)?.time_remaining = remaining;
                    }
                }
                TickOutcome::Expired(kind) => on_expiry(state, kind, config)?,
            }
        }
        Event::StartNewRound => {
            expect_phase(state, &[Phase::RoundResults])?;
            state.timers.cancel();
            state.round = None;
            check_player_count(state, config)?;
            state.clear_history();
            if offers_policy_choice(state, config) {
                state.phase = Phase::SpyCountChoice;
            } else {
                let policy = state.policy;
                begin_round(state, policy, config, provider)?;
            }
        }
        Event::AbortRound => {
            if !state.phase.is_in_round() {
                return Err(TransitionError::WrongPhase(state.phase).into());
            }
            state.timers.cancel();
            if let Some(round) = state.round.take() {
                info!(round = round.number, "round aborted");
            }
            state.phase = match state.mode {
                GameMode::Spy => Phase::Setup,
                GameMode::Wolf => Phase::PlayerSetup,
            };
        }
    }
    Ok(())
}

fn expect_phase(state: &GameState, allowed: &[Phase]) -> Result<(), TransitionError> {
    if allowed.contains(&state.phase) {
        Ok(())
    } else {
        Err(TransitionError::WrongPhase(state.phase))
    }
}

fn live_round(round: &mut Option<Round>) -> Result<&mut Round, TransitionError> {
    round.as_mut().ok_or(TransitionError::NoRound)
}

fn live_rapid(round: &mut Option<Round>) -> Result<&mut RapidRound, TransitionError> {
    live_round(round)?
        .rapid_round
        .as_mut()
        .ok_or(TransitionError::WrongPhase(Phase::RapidRound))
}

fn check_player_count(state: &GameState, config: &GameConfig) -> Result<(), SetupError> {
    let count = state.roster.len();
    if count < config.min_players || count > config.max_players {
        return Err(SetupError::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        });
    }
    Ok(())
}

fn offers_policy_choice(state: &GameState, config: &GameConfig) -> bool {
    state.mode == GameMode::Spy && state.roster.len() >= config.random_policy_min_players
}

fn choose_category(state: &mut GameState, category: &Category, config: &GameConfig) -> Result<(), SetupError> {
    if category.name.trim().is_empty() {
        return Err(SetupError::EmptyCategoryName);
    }
    let category = category.deduped();
    if !category.is_random() && category.words.len() < config.min_category_words {
        return Err(SetupError::TooFewWords {
            count: category.words.len(),
            min: config.min_category_words,
        });
    }
    state.category = category;
    state.phase = Phase::PlayerSetup;
    Ok(())
}

/// Assign roles and open a new round at `RoleReveal`.
fn begin_round<P: SecretWordProvider + ?Sized>(
    state: &mut GameState,
    policy: SpyCountPolicy,
    config: &GameConfig,
    provider: &mut P,
) -> Result<(), GameError> {
    let policy = match state.mode {
        GameMode::Wolf => SpyCountPolicy::Single,
        GameMode::Spy => policy,
    };
    let names = state.roster.names();
    let roles = assign_roles(state.mode, policy, &state.category, &names, config, provider, &mut state.rng)
        .map_err(|e| {
            warn!(error = %e, mode = ?state.mode, "word provider failed, round not started");
            e
        })?;

    state.timers.cancel();
    let number = state.rounds_played + 1;
    let mut round = Round::new(
        number,
        state.mode,
        policy,
        state.category.clone(),
        roles.impostors,
        roles.secret_word,
        roles.impostor_word,
    );
    round.guess_options = roles.guess_options;
    round.question_turns = question_cycle(&names, &mut state.rng);

    state.policy = policy;
    state.round = Some(round);
    state.phase = Phase::RoleReveal;
    info!(round = number, mode = ?state.mode, ?policy, players = names.len(), "round started");
    Ok(())
}

fn advance_rapid(state: &mut GameState, config: &GameConfig) -> Result<(), TransitionError> {
    let names = state.roster.names();
    let round = live_round(&mut state.round)?;
    let cycle = round.question_turns.clone();
    let rapid = round
        .rapid_round
        .as_mut()
        .ok_or(TransitionError::WrongPhase(Phase::RapidRound))?;
    if rapid.advance(&names, &cycle, config.rapid_turn_ticks, &mut state.rng) {
        debug!(asker = ?rapid.current_asker(), "next rapid-round asker");
        Ok(())
    } else {
        enter_voting(state)
    }
}

fn enter_voting(state: &mut GameState) -> Result<(), TransitionError> {
    state.timers.cancel();
    let round = live_round(&mut state.round)?;
    round.ballots.clear();
    round.selection.clear();
    round.voter_index = 0;
    state.phase = Phase::Voting;
    Ok(())
}

fn toggle_vote(state: &mut GameState, candidate: &str) -> Result<(), TransitionError> {
    if !state.roster.contains(candidate) {
        return Err(TransitionError::UnknownPlayer(candidate.to_string()));
    }
    let round = live_round(&mut state.round)?;
    let voter = state
        .roster
        .at(round.voter_index)
        .ok_or(TransitionError::WrongPhase(Phase::Voting))?;
    if voter.name == candidate {
        return Err(TransitionError::SelfTarget);
    }
    toggle(&mut round.selection, candidate, round.policy.max_votes())
}

fn confirm_vote(state: &mut GameState, config: &GameConfig) -> Result<(), TransitionError> {
    let round = live_round(&mut state.round)?;
    if round.selection.is_empty() && !config.allow_abstention {
        return Err(TransitionError::EmptyBallot);
    }
    let voter = state
        .roster
        .at(round.voter_index)
        .map(|p| p.name.clone())
        .ok_or(TransitionError::WrongPhase(Phase::Voting))?;
    let ballot = std::mem::take(&mut round.selection);
    debug!(voter = %voter, picks = ballot.len(), "ballot confirmed");
    round.ballots.insert(voter, ballot);
    round.voter_index += 1;

    if round.voter_index < state.roster.len() {
        return Ok(());
    }

    let names = state.roster.names();
    let tally = VoteTally::count(&names, &round.ballots);
    let accused = tally.resolve(&round.ballots);
    info!(round = round.number, %accused, "vote closed");
    round.accused = Some(accused);
    state.phase = Phase::AccusationReveal;
    state.timers.arm(TimerKind::RevealDelay, config.reveal_delay_ticks);
    Ok(())
}

fn submit_escape_guess(state: &mut GameState, choice: &str, config: &GameConfig) -> Result<(), TransitionError> {
    if state.timers.live().is_some_and(|t| t.kind == TimerKind::GuessDelay) {
        return Err(TransitionError::GuessPending);
    }
    let round = live_round(&mut state.round)?;
    let pending = round.pending_guessers();
    if pending.is_empty() {
        return Err(TransitionError::NoPendingGuessers);
    }
    if !round.guess_options.iter().any(|o| o == choice) {
        return Err(TransitionError::UnknownGuessOption(choice.to_string()));
    }

    // One shared guess covers every escaped spy.
    let guess = ScoreEngine::new(config).judge_guess(choice, &round.secret_word);
    debug!(guessers = pending.len(), correct = guess.correct, "escape guess submitted");
    for name in pending {
        round.escape_guesses.insert(name, guess.clone());
    }
    state.timers.arm(TimerKind::GuessDelay, config.guess_delay_ticks);
    Ok(())
}

fn on_expiry(state: &mut GameState, kind: TimerKind, config: &GameConfig) -> Result<(), TransitionError> {
    match kind {
        TimerKind::RapidTurn => {
            expect_phase(state, &[Phase::RapidRound])?;
            live_rapid(&mut state.round)?.time_remaining = 0;
            advance_rapid(state, config)
        }
        TimerKind::RevealDelay => {
            expect_phase(state, &[Phase::AccusationReveal])?;
            base_commit(state, config)
        }
        TimerKind::GuessDelay => {
            expect_phase(state, &[Phase::EscapeGuess])?;
            escape_commit(state, config)
        }
    }
}

fn base_commit(state: &mut GameState, config: &GameConfig) -> Result<(), TransitionError> {
    let names = state.roster.names();
    let round = live_round(&mut state.round)?;
    if !round.base_committed {
        let engine = ScoreEngine::new(config);
        let results = engine.base_results(round, &names);
        apply_commit(&mut state.roster, &engine.base_deltas(&results), "base")?;
        round.results = results;
        round.base_committed = true;
    }

    let mode = round.mode;
    let guessers = round.pending_guessers().len();
    match mode {
        GameMode::Spy if guessers > 0 => {
            debug!(guessers, "escape guess opened");
            state.phase = Phase::EscapeGuess;
            Ok(())
        }
        GameMode::Spy => escape_commit(state, config),
        GameMode::Wolf => {
            finish_round(state);
            Ok(())
        }
    }
}

fn escape_commit(state: &mut GameState, config: &GameConfig) -> Result<(), TransitionError> {
    let round = live_round(&mut state.round)?;
    if !round.escape_committed {
        let deltas = ScoreEngine::new(config).escape_deltas(round);
        apply_commit(&mut state.roster, &deltas, "escape")?;
        round.escape_committed = true;
    }
    finish_round(state);
    Ok(())
}

fn finish_round(state: &mut GameState) {
    state.rounds_played += 1;
    state.phase = Phase::RoundResults;
    info!(rounds_played = state.rounds_played, "round finished");
}

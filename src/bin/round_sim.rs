//! Round simulator: plays seeded random games through the legal-event list.
//!
//! Useful for smoke-testing rule changes and for watching the engine's
//! tracing output. Final standings are printed as JSON.

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use word_spy::core::{Event, GameConfig, GameMode, GameRng, Phase};
use word_spy::words::builtin_categories;
use word_spy::{RoundController, StaticWordProvider};

/// Steps allowed per round before the simulator gives up on it.
const MAX_STEPS_PER_ROUND: usize = 5_000;

#[derive(Parser)]
#[command(name = "round-sim")]
#[command(about = "Play random word-spy rounds and print the standings")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players per game (3-8)
    #[arg(short, long, default_value = "5")]
    players: usize,

    /// Game variant
    #[arg(short, long, default_value = "spy")]
    mode: ModeArg,

    /// Rounds per game
    #[arg(short, long, default_value = "3")]
    rounds: u32,

    /// Base seed; game `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Let voters confirm empty ballots
    #[arg(long)]
    abstention: bool,

    /// Enable verbose logging when RUST_LOG is unset
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Spy,
    Wolf,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Spy => GameMode::Spy,
            ModeArg::Wolf => GameMode::Wolf,
        }
    }
}

#[derive(Serialize)]
struct Standing {
    name: String,
    score: i64,
    crowns: u32,
}

#[derive(Serialize)]
struct GameReport {
    game: u32,
    seed: u64,
    rounds_played: u32,
    /// Events recorded since the last round started.
    last_round_events: usize,
    standings: Vec<Standing>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    init_tracing(args.verbose);

    let config = GameConfig::default().with_abstention(args.abstention);
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let mut reports = Vec::with_capacity(args.games as usize);
    for game in 0..args.games {
        let seed = base_seed.wrapping_add(u64::from(game));
        reports.push(play_game(&args, &config, game, seed)?);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

/// Directive used when RUST_LOG is unset or invalid.
fn fallback_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_tracing(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose)));

    // Standings go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play_game(args: &Args, config: &GameConfig, game: u32, seed: u64) -> Result<GameReport, Box<dyn std::error::Error>> {
    let mut controller = RoundController::with_provider(config.clone(), StaticWordProvider::new(), GameRng::new(seed))?;
    let mut chooser = GameRng::new(seed ^ 0x5eed);

    let mode = GameMode::from(args.mode);
    controller.choose_mode(mode)?;
    if mode == GameMode::Spy {
        let categories = builtin_categories();
        if let Some(category) = chooser.choose(&categories) {
            controller.choose_category(category.clone())?;
        }
    }
    for i in 0..args.players {
        controller.add_player(&format!("Player {}", i + 1), (i % 16) as u8)?;
    }
    controller.start_round()?;

    while controller.state().rounds_played < args.rounds {
        play_round(&mut controller, &mut chooser);
        if controller.state().phase != Phase::RoundResults {
            warn!(game, "round did not finish, aborting game");
            break;
        }
        if controller.state().rounds_played < args.rounds {
            controller.start_new_round()?;
        }
    }

    let snapshot = controller.snapshot();
    info!(game, seed, rounds = snapshot.rounds_played, "game finished");
    Ok(GameReport {
        game,
        seed,
        rounds_played: snapshot.rounds_played,
        last_round_events: controller.state().history.len(),
        standings: snapshot
            .standings()
            .into_iter()
            .map(|p| Standing {
                name: p.name.clone(),
                score: p.score(),
                crowns: p.crowns(),
            })
            .collect(),
    })
}

/// Apply random legal events until the round reaches its results.
fn play_round(controller: &mut RoundController, chooser: &mut GameRng) {
    for _ in 0..MAX_STEPS_PER_ROUND {
        if controller.state().phase == Phase::RoundResults {
            return;
        }
        let events: Vec<Event> = controller
            .legal_events()
            .into_iter()
            .filter(|e| !matches!(e, Event::AbortRound))
            .collect();

        // Confirm whenever possible so voting does not wander.
        let pick = events
            .iter()
            .find(|e| matches!(e, Event::ConfirmVote))
            .or_else(|| chooser.choose(&events))
            .cloned();
        let Some(event) = pick else {
            return;
        };
        if let Err(err) = controller.apply(event.clone()) {
            warn!(event = event.name(), %err, "legal event rejected");
            return;
        }
    }
}

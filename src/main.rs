//! Meteor Volley headless runner
//!
//! Plays a session with the autopilot until game over (or a tick limit) and
//! prints the final report.
//!
//! CLI: --seed N, --ticks N, --tuning FILE, --best-file FILE, --dump

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use meteor_volley::autopilot::Autopilot;
use meteor_volley::consts::SIM_DT;
use meteor_volley::runner::FixedStepRunner;
use meteor_volley::{JsonFileScoreStore, MemoryScoreStore, ScoreStore, Session, Tuning};

/// Ten minutes of play at 60 ticks per second
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 10;

/// Plays one autopilot session and reports how it ended.
#[derive(Debug, Parser)]
#[command(name = "meteor-volley", version, about)]
struct Cli {
    /// Seed for the run; the clock is used when omitted.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Stop after this many ticks if the run is still going.
    #[arg(
        long,
        value_name = "TICKS",
        default_value_t = DEFAULT_MAX_TICKS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,
    /// JSON file overriding balance values.
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// JSON file holding the best score between runs.
    #[arg(long = "best-file", value_name = "FILE")]
    best_file: Option<PathBuf>,
    /// Print the final snapshot as JSON.
    #[arg(long)]
    dump: bool,
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Meteor Volley (headless) starting...");

    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    let store: Box<dyn ScoreStore> = match &cli.best_file {
        Some(path) => Box::new(JsonFileScoreStore::new(path.clone())),
        None => Box::new(MemoryScoreStore::default()),
    };

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut session = match Session::with_seed(tuning, seed, store) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Pretend to be a 24 fps host so the runner does real catch-up work
    let frame_dt = SIM_DT * 2.5;
    let mut runner = FixedStepRunner::default();
    let mut pilot = Autopilot::default();

    let mut frames: u64 = 0;
    while !session.is_game_over() && session.state().time_ticks < cli.ticks {
        runner.advance(&mut session, &mut pilot, frame_dt);
        frames += 1;
        if frames % 240 == 0 {
            log::debug!("{}", session.snapshot().hud_line());
        }
    }

    let snapshot = session.snapshot();
    println!("seed {seed}");
    println!("{}", snapshot.hud_line());
    println!(
        "{} after {} ticks",
        if session.is_game_over() { "Game over" } else { "Stopped" },
        snapshot.time_ticks
    );

    if cli.dump {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => log::warn!("Failed to encode snapshot: {}", e),
        }
    }

    ExitCode::SUCCESS
}

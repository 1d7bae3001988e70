//! Tank Battle headless driver
//!
//! Runs the demo autopilot against a seeded game until it ends, logging
//! level changes, then prints the final frame or a JSON snapshot.
//!
//! Usage: `tank-battle [seed] [--tuning path] [--json] [--realtime]`
//!
//! `--realtime` paces the loop at the tuning's tick interval.

use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use tank_battle::Tuning;
use tank_battle::render;
use tank_battle::sim::{GamePhase, GameState, autopilot, tick};

/// Safety cap so a stuck demo still terminates
const MAX_TICKS: u64 = 20_000;

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    tuning: Option<PathBuf>,
    json: bool,
    realtime: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--realtime" => args.realtime = true,
            "--tuning" => {
                let path = iter.next().ok_or("--tuning needs a path")?;
                args.tuning = Some(PathBuf::from(path));
            }
            other => {
                let seed = other
                    .parse()
                    .map_err(|_| format!("unrecognized argument: {other}"))?;
                args.seed = Some(seed);
            }
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: tank-battle [seed] [--tuning path] [--json] [--realtime]");
            return ExitCode::from(2);
        }
    };

    let tuning = match &args.tuning {
        Some(path) => Tuning::load_or_default(path),
        None => Tuning::default(),
    };
    let seed = args.seed.unwrap_or(42);

    let interval = tuning.tick_interval();
    let mut state = GameState::with_tuning(seed, tuning);
    log::info!("Tank Battle starting (seed {})", state.seed);
    while !state.is_over() && state.time_ticks < MAX_TICKS {
        let input = autopilot::choose_input(&state);
        let result = tick(&mut state, &input);
        if result.level_complete && !result.campaign_complete {
            log::info!(
                "Cleared level {} at tick {}, score {}",
                result.level - 1,
                state.time_ticks,
                result.score
            );
        }
        if args.realtime {
            thread::sleep(interval);
        }
    }

    match state.phase {
        GamePhase::Victory => log::info!("Victory after {} ticks", state.time_ticks),
        GamePhase::GameOver => log::info!("Game over on level {}", state.level),
        GamePhase::Playing => log::warn!("Stopped at tick cap {MAX_TICKS}"),
    }

    if args.json {
        match serde_json::to_string_pretty(&render::snapshot(&state)) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render::compose(&state));
        println!("{}", render::status_line(&state));
        println!();
        println!("{}", render::level_banner(&state));
    }
    ExitCode::SUCCESS
}

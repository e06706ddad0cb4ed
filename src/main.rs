//! Arena Duel headless driver
//!
//! Plays rounds without a window: a scripted autopilot stands in for the
//! keyboard and the scene machine runs menu -> difficulty -> combat -> outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use arena_duel::clock::FixedStep;
use arena_duel::sim::{MoveIntent, Snapshot, TickInput};
use arena_duel::{ArenaError, Difficulty, Director, Scene, SceneEvent, Settings};

#[derive(Parser)]
#[command(name = "arena-duel", about = "Headless arena duel simulation")]
struct Cli {
    /// AI difficulty (easy, medium, hard)
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,

    /// Seed for the first round (overridden by a seed in the settings file)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Rounds to play before returning to the menu
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Give up on a round after this many ticks
    #[arg(long, default_value_t = 35 * 180)]
    max_ticks: u64,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the final snapshot of each round as JSON
    #[arg(long)]
    json: bool,

    /// Simulated frame rate driving the fixed-step clock
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

/// Scripted stand-in for the keyboard: hold fire, hop now and then, drift
/// right and left across the human half
fn autopilot(tick: u64) -> TickInput {
    let phase = (tick / 70) % 2;
    TickInput {
        movement: MoveIntent {
            up: tick % 45 == 0,
            down: false,
            left: phase == 1,
            right: phase == 0,
        },
        fire: true,
    }
}

/// Feed simulated frames of `frame_ms` into the clock and run the ticks each
/// frame releases, until the round ends or `max_ticks` have been played
fn play_round(director: &mut Director, clock: &mut FixedStep, frame_ms: f64, max_ticks: u64) -> Option<Snapshot> {
    let mut last = None;
    let mut played = 0;
    while played < max_ticks {
        for _ in 0..clock.accumulate(frame_ms) {
            if played >= max_ticks {
                break;
            }
            let now = clock.next_tick();
            let Some(snapshot) = director.advance(&autopilot(played), now) else {
                return last;
            };
            played += 1;
            if snapshot.winner.is_some() {
                return Some(snapshot);
            }
            last = Some(snapshot);
        }
    }
    // Out of time: abandon the round
    log::warn!("Round not decided within {max_ticks} ticks, quitting");
    if director.handle(SceneEvent::Quit).is_ok() {
        director.advance(&TickInput::default(), clock.next_tick());
    }
    last
}

fn run(cli: Cli) -> Result<(), ArenaError> {
    let difficulty = cli.difficulty;
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(ArenaError::InvalidConfig(format!("fps must be positive, got {}", cli.fps)));
    }
    let frame_ms = 1000.0 / cli.fps;
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut director = Director::new(settings, cli.seed);
    let mut clock = FixedStep::default();

    director.handle(SceneEvent::Start)?;
    for round in 1..=cli.rounds {
        director.handle(SceneEvent::ChooseDifficulty(difficulty))?;
        let snapshot = play_round(&mut director, &mut clock, frame_ms, cli.max_ticks);

        match director.outcome_banner() {
            Some(banner) => log::info!("Round {round}: {banner}"),
            None => log::info!("Round {round}: no winner"),
        }
        if cli.json {
            if let Some(snapshot) = snapshot.as_ref().or(director.last_snapshot()) {
                println!("{}", snapshot.to_json()?);
            }
        }

        if matches!(director.scene(), Scene::Outcome { .. }) {
            let event = if round < cli.rounds {
                SceneEvent::PlayAgain
            } else {
                SceneEvent::MainMenu
            };
            director.handle(event)?;
        } else if round < cli.rounds {
            director.handle(SceneEvent::Start)?;
        }
    }
    director.handle(SceneEvent::Quit)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Arena Duel (headless) starting...");

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Loftwahnoid entry point
//!
//! Headless runner: plays one autopilot round at the fixed tick rate, logs the
//! HUD once a second and records the result in the high score file.
//!
//! Usage: `loftwahnoid [seed] [max_ticks] [--settings <path>]`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use loftwahnoid::audio::{AudioManager, SoundBackend, SoundCue};
use loftwahnoid::consts::*;
use loftwahnoid::highscores::HighScoreFile;
use loftwahnoid::renderer::{Frame, Renderer};
use loftwahnoid::sim::{GameState, TickInput};
use loftwahnoid::{RoundController, RoundStatus, Settings};

/// Ten minutes of play
const DEFAULT_MAX_TICKS: u64 = FPS as u64 * 60 * 10;

/// Writes cues to the log instead of a speaker
struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        log::debug!("Sound {:?} at {:.2}", cue, volume);
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play a headless autopilot round of Loftwahnoid", version)]
struct Args {
    /// RNG seed; taken from the system clock when omitted
    seed: Option<u64>,
    /// Stop after this many ticks if the round is still running
    #[arg(default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,
    #[arg(long, env = "LOFTWAHNOID_SETTINGS", default_value = "settings.json")]
    settings: PathBuf,
}

/// Logs the HUD once per second of game time
#[derive(Default)]
struct LogRenderer {
    last_second: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) {
        let second = frame.time_ms / 1_000;
        if second <= self.last_second {
            return;
        }
        self.last_second = second;
        log::info!(
            "[{:>4}s] level {} score {} lives {} bricks {} power-ups {}",
            second,
            frame.hud.level,
            frame.hud.score,
            frame.hud.lives,
            frame.bricks.len(),
            frame.powerups.len()
        );
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::init();
    log::info!("Loftwahnoid (headless) starting...");

    let seed = args.seed.unwrap_or_else(clock_seed);
    let settings = Settings::load(&args.settings);

    let audio = AudioManager::from_settings(Some(Box::new(LogBackend)), &settings);
    let scores = HighScoreFile::open(&settings.highscore_path);
    let state = GameState::with_tuning(seed, settings.tuning.clone());
    let mut round = RoundController::new(state, audio, scores, &settings.player_name());
    let mut renderer = LogRenderer::default();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut status = RoundStatus::Running;
    for _ in 0..args.max_ticks {
        status = match round.step(&input, TICK_US) {
            Ok(status) => status,
            Err(e) => {
                log::error!("Failed to record high score: {}", e);
                return ExitCode::FAILURE;
            }
        };
        renderer.draw(&round.frame());
        if status != RoundStatus::Running {
            break;
        }
    }

    let state = round.state();
    println!(
        "Seed {}: level {}, score {}, {} lives left",
        seed, state.level, state.score, state.lives
    );
    match (status, round.rank()) {
        (RoundStatus::Over, Some(rank)) => println!("New high score! Rank #{rank}"),
        (RoundStatus::Over, None) => println!("Game over"),
        _ => println!("Tick limit reached, round not recorded"),
    }

    println!("\nHigh scores ({}):", round.scores().path().display());
    for (i, entry) in round.scores().scores().entries().iter().enumerate() {
        println!(
            "{:>2}. {:<10} {:>8}  level {}",
            i + 1,
            entry.name,
            entry.score,
            entry.level
        );
    }

    ExitCode::SUCCESS
}

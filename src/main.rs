//! Knight Survival entry point
//!
//! Headless runner: plays one autopiloted session at a fixed frame rate and
//! reports the outcome. Rendering and audio backends plug in through
//! `knight_survival::render` and `knight_survival::audio`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use knight_survival::audio::{AudioCommand, AudioManager, AudioSink};
use knight_survival::consts::MAX_FRAME_DELTA;
use knight_survival::sim::GamePhase;
use knight_survival::{Game, Settings, Tuning, render};

/// Headless knight survival run
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Game balance JSON
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Player settings JSON
    #[arg(long, default_value = "knight_survival_settings.json")]
    settings: PathBuf,
    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Logs audio cues instead of playing them
struct LogSink;

impl AudioSink for LogSink {
    fn submit(&mut self, command: AudioCommand) {
        log::debug!("audio: {command:?}");
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    log::info!("Knight Survival (headless) starting...");

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let settings = Settings::load(&args.settings);
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    log::info!("Seed {seed}");

    let dt = (1.0 / args.fps.max(1) as f32).min(MAX_FRAME_DELTA);
    let mut game = Game::new(seed, tuning);
    let mut audio = AudioManager::new(&settings);
    let mut sink = LogSink;

    game.start_game();
    audio.update_phase(game.phase(), &mut sink);

    let mut frames: u64 = 0;
    let mut last_time_left = game.session().time_left();
    while game.phase() == GamePhase::Playing {
        let input = game.autopilot_input();
        let report = game.frame(dt, &input);
        audio.handle_events(&report.events, &mut sink);
        audio.update_phase(game.phase(), &mut sink);
        frames += 1;

        let time_left = game.session().time_left();
        if time_left != last_time_left && time_left % 10 == 0 {
            let sprites = render::snapshot(&game);
            log::info!(
                "{}s left, score {}, {} sprites on screen",
                time_left,
                game.session().score(),
                sprites.len()
            );
        }
        last_time_left = time_left;
    }

    let session = game.session();
    let outcome = match session.phase() {
        GamePhase::Victory => "VICTORY",
        _ => "DEFEAT",
    };
    println!(
        "{outcome}: score {} with {}s left after {frames} frames (seed {seed})",
        session.score(),
        session.time_left()
    );
    ExitCode::SUCCESS
}

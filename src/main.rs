//! Lost Vac Bot headless runner
//!
//! Plays the game in idle mode without a window and prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "lost-vac-bot")]
#[command(about = "Headless Lost Vac Bot run driven by the autopilot")]
#[command(version)]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Frames to simulate at 60 Hz (default: two minutes)
    #[arg(long)]
    frames: Option<u64>,

    /// Previously stored high score
    #[arg(long)]
    high_score: Option<String>,

    /// Tuning JSON overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 480.0)]
    width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 640.0)]
    height: f32,

    /// Enable debug logging (every game event)
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lost_vac_bot::sim::{GameEvent, GameState, TickInput, set_canvas_size, tick};
    use lost_vac_bot::{HighScore, Tuning};

    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let high_score = args
        .high_score
        .as_deref()
        .map(HighScore::from_stored)
        .unwrap_or_default();

    let tuning = match &args.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("Failed to load tuning: {}", err);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Lost Vac Bot (headless) starting, seed {}", args.seed);

    let mut state = GameState::new(args.seed)
        .with_tuning(tuning)
        .with_high_score(high_score.best);
    set_canvas_size(&mut state, args.width, args.height);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let dt = lost_vac_bot::consts::NOMINAL_FRAME_SECS;
    let frames = args.frames.unwrap_or(60 * 120);

    for _ in 0..frames {
        tick(&mut state, &input, dt);
        for event in state.drain_events() {
            match event {
                GameEvent::NewHighScore { score } => {
                    log::info!("Store high score {}", HighScore::new(score).to_stored());
                }
                other => log::debug!("Event: {:?}", other),
            }
        }
        if state.is_game_over() {
            break;
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to serialize snapshot: {}", err);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

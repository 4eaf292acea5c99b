//! Headless simulation runner (default binary).
//!
//! Plays one game with a random input bot at a fixed frame rate, driving the
//! engine exactly like an interactive host would: key events go through
//! [`Controls`], time advances through [`Game::tick`]. Prints the final board
//! or a JSON snapshot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::{GameCallbacks, GameConfig};
use blockfall::engine::Game;
use blockfall::input::{dispatch_key_event, Controls};
use blockfall::types::{FeatureId, SPEED_MAX, SPEED_MIN};

/// Keys the bot presses, weighted toward movement
const BOT_KEYS: [KeyCode; 8] = [
    KeyCode::Left,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Char(' '),
    KeyCode::Char('h'),
];

#[derive(Debug, Parser)]
#[command(name = "blockfall-sim", about = "Run a headless falling-block game with a random bot")]
struct Cli {
    #[arg(long, default_value_t = 2000, help = "Number of frames to simulate")]
    frames: u32,

    #[arg(long, default_value_t = 16, help = "Milliseconds per frame")]
    frame_ms: u64,

    #[arg(long, help = "Seed for the piece queue and the bot")]
    seed: Option<u64>,

    #[arg(long, help = "TOML game configuration")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the final snapshot as JSON")]
    json: bool,

    #[arg(long, help = "Enable the ghost piece")]
    ghost: bool,

    #[arg(long, help = "Enable the hold piece")]
    hold: bool,

    #[arg(long, value_parser = clap::value_parser!(u8).range(SPEED_MIN as i64..=SPEED_MAX as i64), help = "Drop speed from 1 (slow) to 10 (fast)")]
    speed: Option<u8>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    }
    .apply_env();

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

fn key_event(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent::new_with_kind_and_state(code, KeyModifiers::NONE, kind, KeyEventState::NONE)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    let callbacks = GameCallbacks::new()
        .on_score_change(|score| debug!(score, "score changed"))
        .on_game_over(|score| info!(score, "bot topped out"));
    let mut game = Game::with_callbacks(&config, callbacks).context("failed to start game")?;

    game.set_feature_active(FeatureId::GhostPiece, cli.ghost);
    game.set_feature_active(FeatureId::HoldPiece, cli.hold);
    if let Some(speed) = cli.speed {
        game.set_speed(speed);
    }

    let mut bot = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed ^ 0x5eed),
        None => StdRng::from_entropy(),
    };
    let mut controls = Controls::new();
    let mut pressed: Option<KeyCode> = None;

    game.start(0);
    let mut frames_run = 0;
    for frame in 1..=cli.frames {
        let now = u64::from(frame) * cli.frame_ms;

        if let Some(code) = pressed.take() {
            dispatch_key_event(&mut controls, key_event(code, KeyEventKind::Release), now, &mut game);
        }
        if bot.gen_bool(0.25) {
            let code = BOT_KEYS[bot.gen_range(0..BOT_KEYS.len())];
            dispatch_key_event(&mut controls, key_event(code, KeyEventKind::Press), now, &mut game);
            pressed = Some(code);
        }

        controls.frame(now, &mut game);
        game.tick(now);
        frames_run = frame;

        if game.is_game_over() {
            break;
        }
    }
    game.stop();

    let snapshot = game.snapshot();
    info!(
        frames = frames_run,
        score = snapshot.score,
        pieces = snapshot.piece_id,
        game_over = snapshot.game_over,
        "simulation finished"
    );

    if cli.json {
        println!(
            "{}",
            snapshot
                .to_json_pretty()
                .context("failed to serialize snapshot")?
        );
    } else {
        print!("{}", game.state().board());
        println!("score: {}  pieces: {}  game over: {}", snapshot.score, snapshot.piece_id, snapshot.game_over);
    }

    Ok(())
}

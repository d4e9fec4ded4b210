//! Headless runner (default binary).
//!
//! Drives a session with a fixed timestep and a scripted autoplayer: each new piece gets a
//! random number of rotations and a random lateral shift, then either falls under gravity
//! or is hard-dropped. Nothing is rendered; progress goes to the log and the result is
//! printed as a summary or as a JSON snapshot.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tetromino_rules::core::{Catalog, Session, SimpleRng};
use tetromino_rules::types::{MoveDirection, RotationDirection, SessionConfig};

/// Upper bound on ticks spent on a single piece before the runner gives up
const MAX_TICKS_PER_PIECE: u32 = 100_000;

#[derive(Debug, Parser)]
#[command(version, about = "Run a headless falling-block session")]
struct Args {
    /// JSON session config; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed
    #[arg(long)]
    seed: Option<u32>,

    /// Stop after this many pieces have locked
    #[arg(long, default_value_t = 100)]
    pieces: u32,

    /// Fixed timestep in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u32,

    /// Let pieces fall and lock under gravity instead of hard-dropping them
    #[arg(long)]
    gravity: bool,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

/// What the autoplayer still wants to do with the current piece
#[derive(Debug, Default)]
struct Plan {
    rotations: u32,
    shift: i32,
}

impl Plan {
    fn random(rng: &mut SimpleRng) -> Self {
        Self {
            rotations: rng.next_range(4),
            shift: rng.next_range(11) as i32 - 5,
        }
    }
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    info!(?config, "starting session");

    let catalog = Catalog::standard();
    let mut session = Session::new(&catalog, config.clone()).context("invalid session config")?;
    run(&mut session, &args, config.seed);

    let snapshot = session.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "pieces locked: {}  rows cleared: {}  game over: {}",
            snapshot.pieces_locked, snapshot.total_rows_cleared, snapshot.game_over
        );
    }
    Ok(())
}

fn run(session: &mut Session<'_>, args: &Args, seed: u32) {
    let mut rng = SimpleRng::new(seed ^ 0x5eed);
    session.start();

    let mut plan = Plan::random(&mut rng);
    let mut piece_ticks = 0u32;

    while !session.game_over() && session.pieces_locked() < args.pieces {
        let locked_before = session.pieces_locked();

        if plan.rotations > 0 {
            plan.rotations -= 1;
            session.request_rotate(RotationDirection::Clockwise);
        } else if plan.shift != 0 {
            let direction = if plan.shift < 0 {
                MoveDirection::Left
            } else {
                MoveDirection::Right
            };
            // A blocked shift is abandoned rather than retried
            if session.request_move(direction) {
                plan.shift -= plan.shift.signum();
            } else {
                plan.shift = 0;
            }
        } else if !args.gravity {
            session.request_hard_drop();
        }

        if session.pieces_locked() == locked_before {
            session.tick(args.tick_ms);
        }

        if let Some(event) = session.take_last_event() {
            debug!(shape = ?event.shape, rows = event.rows_cleared, "locked");
            if event.rows_cleared > 0 {
                info!(
                    rows = event.rows_cleared,
                    total = session.total_rows_cleared(),
                    "rows cleared"
                );
            }
            plan = Plan::random(&mut rng);
            piece_ticks = 0;
            continue;
        }

        piece_ticks += 1;
        if piece_ticks >= MAX_TICKS_PER_PIECE {
            info!("piece never locked, stopping");
            break;
        }
    }

    if session.game_over() {
        info!(pieces = session.pieces_locked(), "game over");
    }
}

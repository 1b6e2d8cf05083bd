//! Draughts-Rust: an English draughts rules engine.
//!
//! ## Usage
//!
//! - `draughts-rust` - Show a demo
//! - `draughts-rust play` - Start the text protocol on stdin/stdout
//! - `draughts-rust demo --plies 60 --seed 7` - Play random legal moves
//!
//! Set `RUST_LOG=info` (or `debug`) to trace engine decisions on stderr.

use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use draughts_rust::constants::{DEMO_PLIES, DEMO_SEED};
use draughts_rust::engine::Engine;
use draughts_rust::playout::random_game;
use draughts_rust::protocol::Session;

/// Draughts-Rust: an English draughts rules engine
#[derive(Parser)]
#[command(name = "draughts-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read protocol commands from stdin and answer on stdout
    Play,
    /// Play random legal moves from the starting position and print the result
    Demo {
        /// Maximum number of moves to play
        #[arg(long, default_value_t = DEMO_PLIES)]
        plies: usize,
        /// Random seed
        #[arg(long, default_value_t = DEMO_SEED)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play) => {
            let mut session = Session::new();
            session.run(io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Demo { plies, seed }) => run_demo(plies, seed),
        None => run_demo(DEMO_PLIES, DEMO_SEED),
    }
    Ok(())
}

fn run_demo(plies: usize, seed: u64) {
    println!("Draughts-Rust: English Draughts Rules Engine\n");

    let mut engine = Engine::new();
    println!("{}\n", engine.snapshot());

    let mut rng = fastrand::Rng::with_seed(seed);
    let report = random_game(&mut engine, plies, &mut rng);

    println!("After {} random moves (seed {seed}):", report.plies);
    println!("{}\n", engine.snapshot());
    println!(
        "turns: {}, captures: {}, crownings: {}{}",
        report.turns,
        report.captures,
        report.promotions,
        if report.stalled { ", side to move is stuck" } else { "" }
    );
}

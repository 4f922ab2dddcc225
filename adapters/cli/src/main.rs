#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line host that plays and validates tile-race sessions.

mod board_file;
mod session;
mod settings;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::debug;

use crate::settings::{Overrides, Settings};

/// Tilequest - ladder races and treasure hunts on the command line
#[derive(Parser, Debug)]
#[command(name = "tilequest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log engine decisions at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a ladder race with snakes, ladders and wormholes
    Ladders {
        /// Board record (JSON); the classic board is used when omitted
        #[arg(long)]
        board: Option<PathBuf>,

        /// Session settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Number of players, replacing any listed in the settings
        #[arg(short, long)]
        players: Option<u32>,

        /// Dice rolled each turn
        #[arg(short, long)]
        dice: Option<u32>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum number of rolls before giving up
        #[arg(long, default_value = "500")]
        max_turns: u32,
    },

    /// Play a treasure hunt on a terrain grid
    Treasure {
        /// Grid record (JSON); the standard grid is used when omitted
        #[arg(long)]
        grid: Option<PathBuf>,

        /// Session settings (TOML)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Number of players, replacing any listed in the settings
        #[arg(short, long)]
        players: Option<u32>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum number of rolls before giving up
        #[arg(long, default_value = "500")]
        max_turns: u32,
    },

    /// Check that a board or grid record builds
    Validate {
        /// Record to validate (JSON)
        #[arg(required = true)]
        file: PathBuf,

        /// Treat the record as a treasure grid
        #[arg(long)]
        treasure: bool,
    },
}

/// Entry point for the tilequest command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("parsed arguments: {args:?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Commands::Ladders {
            board,
            settings,
            players,
            dice,
            seed,
            max_turns,
        } => {
            let overrides = Overrides {
                players,
                dice,
                seed,
            };
            let settings = Settings::resolve(settings.as_deref(), overrides)?;
            let board = board_file::ladder_board(board.as_deref())?;
            session::play_ladders(board, &settings, max_turns, &mut out)
        }
        Commands::Treasure {
            grid,
            settings,
            players,
            seed,
            max_turns,
        } => {
            let overrides = Overrides {
                players,
                dice: None,
                seed,
            };
            let settings = Settings::resolve(settings.as_deref(), overrides)?;
            let board = board_file::treasure_board(grid.as_deref())?;
            session::play_treasure(board, &settings, max_turns, &mut out)
        }
        Commands::Validate { file, treasure } => {
            let board = if treasure {
                board_file::treasure_board(Some(file.as_path()))?
            } else {
                board_file::ladder_board(Some(file.as_path()))?
            };
            writeln!(out, "{}", board_file::summarize(&board))?;
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

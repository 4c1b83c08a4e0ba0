//! Command-line interface for kruzic.

use clap::{Parser, Subcommand};
use kruzic_engine::{GameMode, Player, SearchMode};
use std::path::PathBuf;

/// Križić-kružić - tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "kruzic")]
#[command(about = "Tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on the terminal
    Play {
        /// Path to a TOML game config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Game mode (pvp or agent), overrides the config file
        #[arg(long)]
        mode: Option<GameMode>,

        /// Agent search (random or minimax), overrides the config file
        #[arg(long)]
        search: Option<SearchMode>,

        /// Side the agent plays (x or o), overrides the config file
        #[arg(long)]
        agent: Option<Player>,
    },

    /// Print the agent's move for a board
    Suggest {
        /// Board as nine squares, e.g. "XX./OO./..."
        board: String,

        /// Agent search (random or minimax)
        #[arg(long, default_value = "minimax")]
        search: SearchMode,

        /// Side the agent plays; inferred from the mark counts if omitted
        #[arg(long)]
        agent: Option<Player>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let two agents play each other
    Selfplay {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: u32,

        /// Search used by X
        #[arg(long, default_value = "minimax")]
        x_search: SearchMode,

        /// Search used by O
        #[arg(long, default_value = "minimax")]
        o_search: SearchMode,
    },
}

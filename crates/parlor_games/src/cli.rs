//! Command-line interface for parlor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use parlor_tictactoe::{StartOrder, StrategyChoice};

use crate::config::ConfigOverrides;

/// Parlor - N-by-N tic-tac-toe tournaments in the terminal
#[derive(Parser, Debug)]
#[command(name = "parlor")]
#[command(about = "Tic-tac-toe tournaments for any number of humans and computers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive tournament
    Play(GameArgs),

    /// Watch computers play a tournament against each other
    Simulate {
        /// Number of computer players
        #[arg(short = 'n', long, default_value = "2")]
        players: u32,

        /// Shared game options
        #[command(flatten)]
        game: GameArgs,
    },
}

/// Options shared by every game mode
#[derive(Args, Debug, Default, Clone)]
pub struct GameArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Squares per side
    #[arg(short, long)]
    pub grid_size: Option<usize>,

    /// Round wins needed to take the tournament
    #[arg(short, long)]
    pub score_limit: Option<u32>,

    /// Computer move strategy: auto, exhaustive or heuristic
    #[arg(long)]
    pub strategy: Option<StrategyChoice>,

    /// Exhaustive search budget in board states (0 for unbounded)
    #[arg(long)]
    pub max_search_nodes: Option<u64>,

    /// Seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Who goes first: humans, computers or random
    #[arg(long)]
    pub start_order: Option<StartOrder>,
}

impl GameArgs {
    /// Command-line values that replace config file values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            grid_size: self.grid_size,
            score_limit: self.score_limit,
            strategy: self.strategy,
            max_search_nodes: self.max_search_nodes,
            seed: self.seed,
            start_order: self.start_order,
            ..Default::default()
        }
    }
}

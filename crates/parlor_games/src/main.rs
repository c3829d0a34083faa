//! Parlor - tic-tac-toe tournaments in the terminal.

#![warn(missing_docs)]

use std::io;

use anyhow::Result;
use clap::Parser;
use parlor_games::cli::{Cli, Command, GameArgs};
use parlor_games::{App, GameConfig, Prompter, simulate};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so prompts stay readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed command line");

    match cli.command.unwrap_or_else(|| Command::Play(GameArgs::default())) {
        Command::Play(args) => run_play(&args),
        Command::Simulate { players, game } => run_simulate(players, &game),
    }
}

/// Loads the config file, if any, and applies command-line overrides.
fn load_config(args: &GameArgs) -> Result<GameConfig> {
    let config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    Ok(config.with_overrides(args.overrides())?)
}

/// Run an interactive session on stdin/stdout
fn run_play(args: &GameArgs) -> Result<()> {
    let config = load_config(args)?;
    info!("Starting interactive session");

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    App::new(prompter, config).run()
}

/// Run a computer-only tournament
fn run_simulate(players: u32, args: &GameArgs) -> Result<()> {
    let config = load_config(args)?;
    info!(players, "Starting simulation");

    let mut stdout = io::stdout().lock();
    simulate::run(&config, players, &mut stdout)?;
    Ok(())
}

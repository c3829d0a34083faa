//! Terminal front end for parlor tic-tac-toe.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Prompt**: validated line input over any `BufRead`/`Write` pair
//! - **Render**: text drawing of the board
//! - **App**: the interactive session
//! - **Simulate**: computer-only tournaments

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;
pub mod cli;
mod config;
mod prompt;
pub mod render;
pub mod simulate;

// Crate-level exports - Session
pub use app::{App, score_summary};

// Crate-level exports - Configuration
pub use config::{ConfigError, ConfigOverrides, GameConfig};

// Crate-level exports - Prompting
pub use prompt::{PromptError, Prompter, joinor};

//! N-by-N tic-tac-toe for any number of players.
//!
//! This crate is the game core: it knows the board, whose turn it is, how
//! computers pick moves and how rounds add up to a tournament. It performs no
//! terminal I/O; human moves arrive through the [`MoveProvider`] trait.
//!
//! # Architecture
//!
//! - **GridTopology**: rows, columns, diagonals and center cells for a given size
//! - **Board**: cell state, win/tie detection, threat detection, snapshots
//! - **TurnOrder**: rotating seats with a per-round starter
//! - **Search**: exhaustive minimax and a priority heuristic behind one [`Strategy`]
//! - **Tournament**: rounds, scoring and the phase state machine
//!
//! # Example
//!
//! ```
//! use parlor_tictactoe::{
//!     Controller, Marker, Player, StartOrder, Strategy, Tournament, TournamentSettings,
//!     Unattended,
//! };
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let players = vec![
//!     Player::new("Hal".into(), Marker::new("X")?, Controller::Computer),
//!     Player::new("Joshua".into(), Marker::new("O")?, Controller::Computer),
//! ];
//! let settings = TournamentSettings::new(3, 1, Strategy::Heuristic);
//! let mut tournament = Tournament::new(players, settings, ChaCha8Rng::seed_from_u64(7))?;
//!
//! tournament.begin(StartOrder::Computers)?;
//! let outcome = tournament.play_round(&mut Unattended)?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod marker;
mod player;
mod provider;
pub mod search;
mod topology;
mod tournament;
mod turn_order;

// Crate-level exports - Grid and board
pub use board::{Board, BoardError};
pub use topology::{CellKey, GridTopology, Line, MAX_DIMENSION};

// Crate-level exports - Markers and players
pub use marker::{CLASSIC_MARKERS, MAX_GLYPHS, Marker, MarkerError, Square, random_new_marker};
pub use player::{Controller, Player, PlayerId, StartOrder};

// Crate-level exports - Turn rotation
pub use turn_order::{TurnOrder, TurnOrderError};

// Crate-level exports - Move selection
pub use provider::{MoveProvider, MoveProviderError, Scripted, Unattended};
pub use search::{SearchError, Strategy, StrategyChoice};

// Crate-level exports - Tournament
pub use tournament::{
    Phase, RoundOutcome, Tournament, TournamentError, TournamentSettings, TurnReport,
};

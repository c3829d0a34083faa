//! Move selection for computer players.
//!
//! Two strategies share one contract: given a board, the marker about to
//! move and the rotation of markers, return an unmarked cell.
//!
//! - [`Strategy::Exhaustive`] runs a full-depth minimax ([`minimax`]) and
//!   falls back to the heuristic when its node budget runs out.
//! - [`Strategy::Heuristic`] walks offense, defense, center, random ([`heuristic`]).
//!
//! All random choices draw from the caller's RNG so games can be replayed
//! from a seed.

pub mod heuristic;
pub mod minimax;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::board::{Board, BoardError};
use crate::marker::Marker;
use crate::topology::CellKey;
use crate::turn_order::TurnOrder;

/// Largest grid on which [`StrategyChoice::Auto`] picks exhaustive search.
pub const AUTO_EXHAUSTIVE_MAX_DIMENSION: usize = 3;

/// Errors raised while picking a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The board has no unmarked cell.
    #[display("No unmarked cells left to choose from")]
    NoMovesAvailable,

    /// The mover's marker is not part of the rotation.
    #[display("Marker {} is not in the turn order", _0)]
    UnknownMarker(Marker),

    /// Exhaustive search visited more states than allowed.
    #[display("Search exceeded its budget of {} nodes", max_nodes)]
    BudgetExhausted {
        /// The budget that was exceeded.
        max_nodes: u64,
    },

    /// A hypothetical move could not be applied.
    #[display("Board error during search: {}", _0)]
    Board(BoardError),
}

impl std::error::Error for SearchError {}

impl From<BoardError> for SearchError {
    fn from(err: BoardError) -> Self {
        SearchError::Board(err)
    }
}

/// How a computer player chooses its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full-depth minimax, optionally bounded by a node budget.
    Exhaustive {
        /// Hypothetical states to visit before giving up; `None` is unbounded.
        max_nodes: Option<u64>,
    },
    /// Offense, then defense, then center, then any cell.
    Heuristic,
}

impl Strategy {
    /// Picks a cell for `me` to mark.
    ///
    /// `order` must contain `me`; its rotation decides who moves after each
    /// hypothetical move.
    ///
    /// # Errors
    ///
    /// Fails if the board is full or `me` is not in `order`. An exhausted
    /// node budget is not an error: the heuristic answers instead.
    #[instrument(skip(board, order, rng), fields(dimension = board.dimension()))]
    pub fn choose(
        self,
        board: &Board,
        me: Marker,
        order: &TurnOrder<Marker>,
        rng: &mut impl Rng,
    ) -> Result<CellKey, SearchError> {
        let key = match self {
            Strategy::Exhaustive { max_nodes } => {
                match minimax::choose(board, me, order, max_nodes, rng) {
                    Err(SearchError::BudgetExhausted { max_nodes }) => {
                        warn!(max_nodes, "Exhaustive search over budget, using heuristic");
                        heuristic::choose(board, me, order, rng)?
                    }
                    other => other?,
                }
            }
            Strategy::Heuristic => heuristic::choose(board, me, order, rng)?,
        };
        debug!(key, %me, "Strategy chose cell");
        Ok(key)
    }
}

/// Strategy selection as written in configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StrategyChoice {
    /// Exhaustive on small grids, heuristic on larger ones.
    #[default]
    Auto,
    /// Always minimax.
    Exhaustive,
    /// Always the heuristic chain.
    Heuristic,
}

impl StrategyChoice {
    /// Resolves the choice for a grid of `dimension`.
    pub fn resolve(self, dimension: usize, max_nodes: Option<u64>) -> Strategy {
        match self {
            StrategyChoice::Exhaustive => Strategy::Exhaustive { max_nodes },
            StrategyChoice::Heuristic => Strategy::Heuristic,
            StrategyChoice::Auto if dimension <= AUTO_EXHAUSTIVE_MAX_DIMENSION => {
                Strategy::Exhaustive { max_nodes }
            }
            StrategyChoice::Auto => Strategy::Heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const X: Marker = Marker::from_glyph('X');
    const O: Marker = Marker::from_glyph('O');

    #[test]
    fn test_auto_resolution() {
        assert_eq!(
            StrategyChoice::Auto.resolve(3, Some(10)),
            Strategy::Exhaustive { max_nodes: Some(10) }
        );
        assert_eq!(StrategyChoice::Auto.resolve(4, None), Strategy::Heuristic);
        assert_eq!(
            StrategyChoice::Exhaustive.resolve(5, None),
            Strategy::Exhaustive { max_nodes: None }
        );
    }

    #[test]
    fn test_budget_exhaustion_falls_back_to_heuristic() {
        let mut board = Board::new(3).unwrap();
        board.mark(0, X).unwrap();
        board.mark(1, X).unwrap();
        board.mark(4, O).unwrap();
        let order = TurnOrder::new(vec![X, O]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let strategy = Strategy::Exhaustive { max_nodes: Some(1) };
        // The heuristic completes the top row.
        assert_eq!(strategy.choose(&board, X, &order, &mut rng), Ok(2));
    }

    #[test]
    fn test_full_board_is_an_error() {
        let mut board = Board::new(1).unwrap();
        board.mark(0, X).unwrap();
        let order = TurnOrder::new(vec![X, O]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(
            Strategy::Heuristic.choose(&board, O, &order, &mut rng),
            Err(SearchError::NoMovesAvailable)
        );
    }
}

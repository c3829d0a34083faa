//! The board: per-cell marker state over a cached [`GridTopology`].

use std::sync::Arc;

use tracing::{instrument, trace};

use crate::marker::{Marker, Square};
use crate::topology::{CellKey, GridTopology};

/// Errors raised when building or marking a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The grid must have at least one cell per side.
    #[display("Grid dimension must be at least 1, got {}", _0)]
    InvalidDimension(usize),

    /// The grid is too large to build.
    #[display("Grid dimension {} is too large (at most {})", dimension, max)]
    DimensionTooLarge {
        /// Dimension that was requested.
        dimension: usize,
        /// Largest supported dimension.
        max: usize,
    },

    /// The key does not name a cell of this board.
    #[display("Cell {} is outside the board (valid cells are 0..{})", key, cells)]
    InvalidCell {
        /// Key that was requested.
        key: CellKey,
        /// Number of cells on the board.
        cells: usize,
    },
}

impl std::error::Error for BoardError {}

/// N-by-N tic-tac-toe board.
///
/// Cloning a board (see [`Board::snapshot`]) copies the cell state and
/// shares the immutable topology, so hypothetical moves on a copy never
/// touch the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    topology: Arc<GridTopology>,
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board with `dimension` cells per side.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimension`] if `dimension` is zero and
    /// [`BoardError::DimensionTooLarge`] if it exceeds
    /// [`MAX_DIMENSION`](crate::MAX_DIMENSION).
    #[instrument]
    pub fn new(dimension: usize) -> Result<Self, BoardError> {
        let topology = GridTopology::new(dimension)?;
        let mut board = Self {
            squares: Vec::with_capacity(topology.cell_count()),
            topology: Arc::new(topology),
        };
        board.reset();
        Ok(board)
    }

    /// Number of cells per side.
    pub fn dimension(&self) -> usize {
        self.topology.dimension()
    }

    /// Line and center data shared by every snapshot of this board.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// All cells in key order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// The cell at `key`, or `None` if the key is off the board.
    pub fn get(&self, key: CellKey) -> Option<Square> {
        self.squares.get(key).copied()
    }

    /// The marker at `key`, or `None` if the cell is unmarked or off the board.
    pub fn marker_at(&self, key: CellKey) -> Option<Marker> {
        self.get(key).and_then(Square::marker)
    }

    /// Returns `true` if `key` is on the board and unmarked.
    pub fn is_unmarked(&self, key: CellKey) -> bool {
        matches!(self.get(key), Some(Square::Empty))
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.squares.clear();
        self.squares
            .resize(self.topology.cell_count(), Square::Empty);
    }

    /// Places `marker` at `key`, overwriting whatever was there.
    ///
    /// Whether the cell is free is the caller's concern; see
    /// [`Tournament::apply_move`](crate::Tournament::apply_move) for the
    /// checked variant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidCell`] if `key` is off the board.
    pub fn mark(&mut self, key: CellKey, marker: Marker) -> Result<(), BoardError> {
        let cells = self.squares.len();
        let square = self
            .squares
            .get_mut(key)
            .ok_or(BoardError::InvalidCell { key, cells })?;
        *square = Square::Occupied(marker);
        trace!(key, %marker, "Cell marked");
        Ok(())
    }

    /// Keys of every unmarked cell, in key order.
    pub fn unmarked_keys(&self) -> Vec<CellKey> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| square.is_empty())
            .map(|(key, _)| key)
            .collect()
    }

    /// Keys from `subset` (for example one line) that are unmarked, in `subset` order.
    pub fn unmarked_keys_in(&self, subset: &[CellKey]) -> Vec<CellKey> {
        subset
            .iter()
            .copied()
            .filter(|&key| self.is_unmarked(key))
            .collect()
    }

    /// Returns `true` if no cell is unmarked.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|square| !square.is_empty())
    }

    /// The marker filling a complete line, if any.
    ///
    /// Lines are scanned rows, columns, diagonals; the first complete one wins.
    pub fn winning_marker(&self) -> Option<Marker> {
        self.topology.lines().iter().find_map(|line| {
            let first = self.marker_at(line[0])?;
            line[1..]
                .iter()
                .all(|&key| self.marker_at(key) == Some(first))
                .then_some(first)
        })
    }

    /// Returns `true` if some line is complete.
    pub fn has_winner(&self) -> bool {
        self.winning_marker().is_some()
    }

    /// Returns `true` if the round on this board is over.
    pub fn is_terminal(&self) -> bool {
        self.has_winner() || self.is_full()
    }

    /// Cells that would complete a line for `marker`.
    ///
    /// A line qualifies when `dimension - 1` of its cells hold `marker` and one
    /// is unmarked; its first unmarked cell is reported. The result is sorted
    /// and free of duplicates.
    pub fn almost_winning(&self, marker: Marker) -> Vec<CellKey> {
        let needed = self.dimension() - 1;
        let mut keys: Vec<CellKey> = self
            .topology
            .lines()
            .iter()
            .filter(|line| {
                line.iter()
                    .filter(|&&key| self.marker_at(key) == Some(marker))
                    .count()
                    == needed
            })
            .filter_map(|line| self.unmarked_keys_in(line).first().copied())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Center cells that are still unmarked.
    pub fn unmarked_center_keys(&self) -> Vec<CellKey> {
        self.unmarked_keys_in(self.topology.center())
    }

    /// Independent copy for hypothetical moves.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }
}

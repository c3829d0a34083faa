//! Grid topology: winning lines and center cells of an N-by-N grid.
//!
//! Cell keys are 0-based and row-major, so a grid of dimension `n` has keys
//! `0..n*n` and the cell in row `r`, column `c` has key `r * n + c`.

use crate::board::BoardError;
use tracing::instrument;

/// Index of a cell on the grid.
pub type CellKey = usize;

/// Cells whose identical markers win the round: one row, column or diagonal.
pub type Line = Vec<CellKey>;

/// Largest supported number of cells per side.
pub const MAX_DIMENSION: usize = 1024;

/// Immutable line and center data for one grid dimension.
///
/// Lines are stored rows first, then columns, then the two diagonals, so
/// there are always `2 * dimension + 2` of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    dimension: usize,
    lines: Vec<Line>,
    center: Vec<CellKey>,
}

impl GridTopology {
    /// Computes the topology of a `dimension` by `dimension` grid.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimension`] if `dimension` is zero and
    /// [`BoardError::DimensionTooLarge`] above [`MAX_DIMENSION`].
    #[instrument]
    pub fn new(dimension: usize) -> Result<Self, BoardError> {
        if dimension == 0 {
            return Err(BoardError::InvalidDimension(dimension));
        }
        if dimension > MAX_DIMENSION {
            return Err(BoardError::DimensionTooLarge {
                dimension,
                max: MAX_DIMENSION,
            });
        }

        let rows = rows(dimension);
        let columns = columns(&rows);
        let diagonals = diagonals(&rows);

        let mut lines = rows;
        lines.extend(columns);
        lines.extend(diagonals);

        Ok(Self {
            dimension,
            lines,
            center: center(dimension),
        })
    }

    /// Number of cells per side.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cells, `dimension²`.
    pub fn cell_count(&self) -> usize {
        self.dimension * self.dimension
    }

    /// Returns `true` if `key` names a cell of this grid.
    pub fn contains(&self, key: CellKey) -> bool {
        key < self.cell_count()
    }

    /// Every winning line: rows, columns, then both diagonals.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The rows, top to bottom.
    pub fn rows(&self) -> &[Line] {
        &self.lines[..self.dimension]
    }

    /// The columns, left to right.
    pub fn columns(&self) -> &[Line] {
        &self.lines[self.dimension..2 * self.dimension]
    }

    /// Top-left to bottom-right, then top-right to bottom-left.
    pub fn diagonals(&self) -> &[Line] {
        &self.lines[2 * self.dimension..]
    }

    /// The middle cell for odd dimensions, the four middle cells for even ones.
    pub fn center(&self) -> &[CellKey] {
        &self.center
    }
}

fn rows(dimension: usize) -> Vec<Line> {
    (0..dimension)
        .map(|row| (row * dimension..(row + 1) * dimension).collect())
        .collect()
}

fn columns(rows: &[Line]) -> Vec<Line> {
    (0..rows.len())
        .map(|col| rows.iter().map(|row| row[col]).collect())
        .collect()
}

fn diagonals(rows: &[Line]) -> [Line; 2] {
    let last = rows.len() - 1;
    let main = rows.iter().enumerate().map(|(i, row)| row[i]).collect();
    let anti = rows.iter().enumerate().map(|(i, row)| row[last - i]).collect();
    [main, anti]
}

fn center(dimension: usize) -> Vec<CellKey> {
    let cells = dimension * dimension;
    if dimension % 2 == 1 {
        vec![cells / 2]
    } else {
        // Top-left cell of the upper and of the lower straddling pair.
        let upper = (cells - dimension) / 2 - 1;
        let lower = (cells + dimension) / 2 - 1;
        vec![upper, upper + 1, lower, lower + 1]
    }
}

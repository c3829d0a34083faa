//! Full-depth minimax over rotating players.
//!
//! Values are always from the maximizer's point of view: a finished board is
//! worth [`VALUE_WIN`] if the maximizer's marker completed a line,
//! [`VALUE_TIE`] if the board filled up, and [`VALUE_LOSS`] if anyone else won.
//! Every player other than the maximizer is treated as a minimizer, so with
//! three or more players all opponents are assumed to cooperate against the
//! maximizer.
//!
//! There is no pruning, depth limit or transposition table. The optional node
//! budget is the only guard against large boards.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::SearchError;
use crate::board::Board;
use crate::marker::Marker;
use crate::topology::CellKey;
use crate::turn_order::TurnOrder;

/// Value of a board the maximizer has won.
pub const VALUE_WIN: i8 = 1;
/// Value of a full board without a winner.
pub const VALUE_TIE: i8 = 0;
/// Value of a board somebody else has won.
pub const VALUE_LOSS: i8 = -1;

/// Candidate moves grouped by their minimax value.
pub type MoveValues = BTreeMap<i8, Vec<CellKey>>;

struct Search<'a> {
    maximizer: Marker,
    order: &'a TurnOrder<Marker>,
    max_nodes: Option<u64>,
    nodes: u64,
}

impl Search<'_> {
    fn visit(&mut self) -> Result<(), SearchError> {
        self.nodes += 1;
        match self.max_nodes {
            Some(max_nodes) if self.nodes > max_nodes => {
                Err(SearchError::BudgetExhausted { max_nodes })
            }
            _ => Ok(()),
        }
    }

    fn terminal_value(&self, board: &Board) -> Option<i8> {
        match board.winning_marker() {
            Some(marker) if marker == self.maximizer => Some(VALUE_WIN),
            Some(_) => Some(VALUE_LOSS),
            None if board.is_full() => Some(VALUE_TIE),
            None => None,
        }
    }

    /// Value of marking `key` for `mover` on a copy of `board`.
    fn move_value(
        &mut self,
        board: &Board,
        key: CellKey,
        mover: Marker,
    ) -> Result<i8, SearchError> {
        let mut next = board.snapshot();
        next.mark(key, mover)?;
        let next_mover = self
            .order
            .next_after(mover)
            .ok_or(SearchError::UnknownMarker(mover))?;
        self.value(&next, next_mover)
    }

    /// Value of `board` with `to_move` about to play.
    fn value(&mut self, board: &Board, to_move: Marker) -> Result<i8, SearchError> {
        self.visit()?;
        if let Some(value) = self.terminal_value(board) {
            return Ok(value);
        }

        let maximizing = to_move == self.maximizer;
        let mut best: Option<i8> = None;
        for key in board.unmarked_keys() {
            let value = self.move_value(board, key, to_move)?;
            best = Some(match best {
                None => value,
                Some(best) if maximizing => best.max(value),
                Some(best) => best.min(value),
            });
        }
        Ok(best.unwrap_or(VALUE_TIE))
    }
}

/// Minimax value of `board` for `maximizer` when `to_move` plays next.
///
/// A finished board returns its leaf value without searching.
///
/// # Errors
///
/// Fails if `to_move` is not in `order` or the node budget runs out.
#[instrument(skip(board, order))]
pub fn minimax_value(
    board: &Board,
    maximizer: Marker,
    to_move: Marker,
    order: &TurnOrder<Marker>,
    max_nodes: Option<u64>,
) -> Result<i8, SearchError> {
    let mut search = Search {
        maximizer,
        order,
        max_nodes,
        nodes: 0,
    };
    search.value(board, to_move)
}

/// Value of every unmarked cell if `maximizer` marks it now.
///
/// # Errors
///
/// Fails if `maximizer` is not in `order` or the node budget runs out.
#[instrument(skip(board, order), fields(open = board.unmarked_keys().len()))]
pub fn evaluate_moves(
    board: &Board,
    maximizer: Marker,
    order: &TurnOrder<Marker>,
    max_nodes: Option<u64>,
) -> Result<MoveValues, SearchError> {
    let mut search = Search {
        maximizer,
        order,
        max_nodes,
        nodes: 0,
    };

    let mut values = MoveValues::new();
    for key in board.unmarked_keys() {
        let value = search.move_value(board, key, maximizer)?;
        values.entry(value).or_default().push(key);
    }

    debug!(nodes = search.nodes, ?values, "Minimax evaluation finished");
    Ok(values)
}

/// Cells attaining the best value for `maximizer`.
///
/// # Errors
///
/// See [`evaluate_moves`].
pub fn best_moves(
    board: &Board,
    maximizer: Marker,
    order: &TurnOrder<Marker>,
    max_nodes: Option<u64>,
) -> Result<Vec<CellKey>, SearchError> {
    let mut values = evaluate_moves(board, maximizer, order, max_nodes)?;
    Ok(values.pop_last().map(|(_, keys)| keys).unwrap_or_default())
}

/// Picks uniformly among the best cells for `maximizer`.
///
/// # Errors
///
/// Returns [`SearchError::NoMovesAvailable`] on a full board, otherwise see
/// [`evaluate_moves`].
pub fn choose(
    board: &Board,
    maximizer: Marker,
    order: &TurnOrder<Marker>,
    max_nodes: Option<u64>,
    rng: &mut impl Rng,
) -> Result<CellKey, SearchError> {
    best_moves(board, maximizer, order, max_nodes)?
        .choose(rng)
        .copied()
        .ok_or(SearchError::NoMovesAvailable)
}

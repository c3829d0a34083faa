//! Priority-ordered move heuristic for boards too large to search.
//!
//! The first non-empty tier wins:
//!
//! 1. **Offense**: cells that would complete one of my lines.
//! 2. **Defense**: cells that would complete a line for the first opponent,
//!    in turn order after me, who has any.
//! 3. **Center**: unmarked center cells.
//! 4. **Random**: any unmarked cell.
//!
//! Within a tier the pick is uniform.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::SearchError;
use crate::board::Board;
use crate::marker::Marker;
use crate::topology::CellKey;
use crate::turn_order::TurnOrder;

/// Which rule produced the candidate cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Tier {
    /// Completes a line for the mover.
    #[display("offense")]
    Offense,
    /// Blocks an opponent's line.
    #[display("defense")]
    Defense,
    /// Takes a center cell.
    #[display("center")]
    Center,
    /// Anything still open.
    #[display("random")]
    Random,
}

/// The highest-priority tier with candidates, and those candidates.
///
/// # Errors
///
/// [`SearchError::UnknownMarker`] if `me` is not in `order`,
/// [`SearchError::NoMovesAvailable`] if the board is full.
#[instrument(skip(board, order))]
pub fn candidates(
    board: &Board,
    me: Marker,
    order: &TurnOrder<Marker>,
) -> Result<(Tier, Vec<CellKey>), SearchError> {
    if !order.seats().contains(&me) {
        return Err(SearchError::UnknownMarker(me));
    }

    let offense = board.almost_winning(me);
    if !offense.is_empty() {
        return Ok((Tier::Offense, offense));
    }

    let defense = order
        .players_after(me)
        .into_iter()
        .map(|opponent| board.almost_winning(opponent))
        .find(|threats| !threats.is_empty());
    if let Some(defense) = defense {
        return Ok((Tier::Defense, defense));
    }

    let center = board.unmarked_center_keys();
    if !center.is_empty() {
        return Ok((Tier::Center, center));
    }

    let open = board.unmarked_keys();
    if open.is_empty() {
        return Err(SearchError::NoMovesAvailable);
    }
    Ok((Tier::Random, open))
}

/// Picks a cell for `me` from the highest-priority tier.
///
/// # Errors
///
/// See [`candidates`].
pub fn choose(
    board: &Board,
    me: Marker,
    order: &TurnOrder<Marker>,
    rng: &mut impl Rng,
) -> Result<CellKey, SearchError> {
    let (tier, keys) = candidates(board, me, order)?;
    let key = keys
        .choose(rng)
        .copied()
        .ok_or(SearchError::NoMovesAvailable)?;
    debug!(%tier, key, options = keys.len(), "Heuristic pick");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const X: Marker = Marker::from_glyph('X');
    const O: Marker = Marker::from_glyph('O');
    const T: Marker = Marker::from_glyph('T');

    fn board_with(dimension: usize, moves: &[(CellKey, Marker)]) -> Board {
        let mut board = Board::new(dimension).unwrap();
        for &(key, marker) in moves {
            board.mark(key, marker).unwrap();
        }
        board
    }

    #[test]
    fn test_offense_beats_defense() {
        let order = TurnOrder::new(vec![X, O]).unwrap();
        let board = board_with(3, &[(0, X), (1, X), (3, O), (4, O)]);
        assert_eq!(candidates(&board, X, &order), Ok((Tier::Offense, vec![2])));
        assert_eq!(candidates(&board, O, &order), Ok((Tier::Offense, vec![5])));
    }

    #[test]
    fn test_defense_blocks_next_opponent_first() {
        let order = TurnOrder::new(vec![X, O, T]).unwrap();
        // O threatens 2, T threatens 8; O moves right after X.
        let board = board_with(3, &[(0, O), (1, O), (6, T), (7, T), (4, X)]);
        assert_eq!(candidates(&board, X, &order), Ok((Tier::Defense, vec![2])));
        // T's own line outranks blocking anyone.
        assert_eq!(candidates(&board, T, &order), Ok((Tier::Offense, vec![8])));
    }

    #[test]
    fn test_center_then_random() {
        let order = TurnOrder::new(vec![X, O]).unwrap();
        let empty = Board::new(4).unwrap();
        assert_eq!(
            candidates(&empty, X, &order),
            Ok((Tier::Center, vec![5, 6, 9, 10]))
        );

        let board = board_with(3, &[(4, O), (0, X)]);
        assert_eq!(
            candidates(&board, X, &order),
            Ok((Tier::Random, vec![1, 2, 3, 5, 6, 7, 8]))
        );
    }

    #[test]
    fn test_choice_stays_in_tier() {
        let order = TurnOrder::new(vec![X, O]).unwrap();
        let board = Board::new(4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let key = choose(&board, X, &order, &mut rng).unwrap();
            assert!([5, 6, 9, 10].contains(&key));
        }
    }

    #[test]
    fn test_unknown_marker_rejected() {
        let order = TurnOrder::new(vec![X, O]).unwrap();
        let board = Board::new(3).unwrap();
        assert_eq!(
            candidates(&board, T, &order),
            Err(SearchError::UnknownMarker(T))
        );
    }
}

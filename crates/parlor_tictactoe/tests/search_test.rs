//! Move selection against live opponents.

use parlor_tictactoe::search::{heuristic, minimax};
use parlor_tictactoe::{Board, Marker, Strategy, TurnOrder};
use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

const X: Marker = Marker::from_glyph('X');
const O: Marker = Marker::from_glyph('O');

/// Plays one 3x3 game, minimax as X moving first, uniform random as O.
fn minimax_versus_random(seed: u64) -> Option<Marker> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let order = TurnOrder::new(vec![X, O]).unwrap();
    let mut board = Board::new(3).unwrap();
    let mut mover = X;

    while !board.is_terminal() {
        let key = if mover == X {
            minimax::choose(&board, X, &order, None, &mut rng).unwrap()
        } else {
            *board.unmarked_keys().choose(&mut rng).unwrap()
        };
        board.mark(key, mover).unwrap();
        mover = order.next_after(mover).unwrap();
    }
    board.winning_marker()
}

#[test]
fn test_minimax_first_player_never_loses() {
    for seed in 0..100 {
        assert_ne!(minimax_versus_random(seed), Some(O), "lost with seed {seed}");
    }
}

#[test]
fn test_minimax_breaks_ties_at_random() {
    let board = Board::new(3).unwrap();
    let order = TurnOrder::new(vec![X, O]).unwrap();
    let best = minimax::best_moves(&board, X, &order, None).unwrap();

    let picks: BTreeSet<_> = (0..8)
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            minimax::choose(&board, X, &order, None, &mut rng).unwrap()
        })
        .collect();

    assert!(picks.len() > 1, "always picked {picks:?}");
    assert!(picks.iter().all(|key| best.contains(key)));
}

#[test]
fn test_heuristic_breaks_ties_at_random() {
    let board = Board::new(4).unwrap();
    let order = TurnOrder::new(vec![X, O]).unwrap();

    let picks: BTreeSet<_> = (0..8)
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            heuristic::choose(&board, X, &order, &mut rng).unwrap()
        })
        .collect();

    assert!(picks.len() > 1, "always picked {picks:?}");
    assert!(picks.iter().all(|key| [5, 6, 9, 10].contains(key)));
}

#[test]
fn test_minimax_values_group_every_open_cell() {
    let mut board = Board::new(3).unwrap();
    board.mark(0, X).unwrap();
    board.mark(4, O).unwrap();
    board.mark(8, X).unwrap();
    let order = TurnOrder::new(vec![X, O]).unwrap();

    let values = minimax::evaluate_moves(&board, O, &order, None).unwrap();
    let mut keys: Vec<_> = values.values().flatten().copied().collect();
    keys.sort_unstable();
    assert_eq!(keys, board.unmarked_keys());
    // O must take an edge; a corner hands X a fork.
    assert_eq!(values.get(&minimax::VALUE_TIE), Some(&vec![1, 3, 5, 7]));
}

#[test]
fn test_minimax_on_finished_board_is_leaf_value() {
    let mut board = Board::new(3).unwrap();
    for key in [0, 4, 8] {
        board.mark(key, O).unwrap();
    }
    let order = TurnOrder::new(vec![X, O]).unwrap();
    assert_eq!(
        minimax::minimax_value(&board, X, X, &order, Some(1)),
        Ok(minimax::VALUE_LOSS)
    );
}

#[test]
fn test_heuristic_takes_winning_cell() {
    let mut board = Board::new(4).unwrap();
    for key in [0, 1, 2] {
        board.mark(key, X).unwrap();
    }
    board.mark(5, O).unwrap();
    let order = TurnOrder::new(vec![O, X]).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    assert_eq!(heuristic::choose(&board, X, &order, &mut rng), Ok(3));
    assert_eq!(Strategy::Heuristic.choose(&board, X, &order, &mut rng), Ok(3));
}

#[test]
fn test_heuristic_blocks_then_plays_center() {
    let mut board = Board::new(5).unwrap();
    for key in [0, 6, 18, 24] {
        board.mark(key, O).unwrap();
    }
    let order = TurnOrder::new(vec![X, O]).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(9);

    // O needs 12 to complete the main diagonal.
    assert_eq!(heuristic::choose(&board, X, &order, &mut rng), Ok(12));

    board.mark(12, X).unwrap();
    board.mark(2, O).unwrap();
    let (tier, keys) = heuristic::candidates(&board, X, &order).unwrap();
    assert_eq!(tier, heuristic::Tier::Random);
    assert!(!keys.contains(&12));
}

//! Board rendering.

use parlor_games::render;
use parlor_tictactoe::{Board, Marker};

#[test]
fn test_three_by_three() {
    let mut board = Board::new(3).unwrap();
    board.mark(0, Marker::from_glyph('X')).unwrap();
    board.mark(4, Marker::from_glyph('O')).unwrap();

    let expected = concat!(
        "[0] |[1] |[2] \n",
        " X  |    |    \n",
        "    |    |    \n",
        "----+----+----\n",
        "[3] |[4] |[5] \n",
        "    | O  |    \n",
        "    |    |    \n",
        "----+----+----\n",
        "[6] |[7] |[8] \n",
        "    |    |    \n",
        "    |    |    \n",
    );
    assert_eq!(render::board(&board), expected);
}

#[test]
fn test_wide_markers_and_two_digit_keys() {
    let mut board = Board::new(4).unwrap();
    board.mark(15, Marker::new("AB").unwrap()).unwrap();

    let text = render::board(&board);
    let lines: Vec<&str> = text.lines().collect();
    // Four rows of three lines plus three rules.
    assert_eq!(lines.len(), 15);
    assert_eq!(lines[3], "-----+-----+-----+-----");
    assert_eq!(lines[12], "[12] |[13] |[14] |[15] ");
    assert_eq!(lines[13], "     |     |     | AB  ");
}

#[test]
fn test_single_cell() {
    let board = Board::new(1).unwrap();
    assert_eq!(render::board(&board), "[0] \n    \n    \n");
}

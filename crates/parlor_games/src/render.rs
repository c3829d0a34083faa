//! Text rendering of the board.
//!
//! Each cell is three text lines tall: its key in brackets, the marker
//! centered, and a blank spacer. Cells are separated by `|` and rows by
//! `---+---` rules.
//!
//! ```text
//! [0] |[1] |[2]
//!  X  |    | O
//!     |    |
//! ----+----+----
//! ```

use parlor_tictactoe::{Board, CellKey};
use unicode_width::UnicodeWidthStr;

/// Text width of one cell on a board of `dimension` cells per side.
///
/// Wide enough for the largest bracketed key plus one space.
pub fn cell_width(dimension: usize) -> usize {
    (dimension * dimension).to_string().len() + 3
}

/// Pads `text` on both sides to `width` columns, extra space going right.
pub fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

/// Renders the whole board, one string with a trailing newline per text line.
pub fn board(board: &Board) -> String {
    let dimension = board.dimension();
    let width = cell_width(dimension);
    let rule = vec!["-".repeat(width); dimension].join("+");

    let mut out = String::new();
    for row in 0..dimension {
        let keys: Vec<CellKey> = (row * dimension..(row + 1) * dimension).collect();

        let labels: Vec<String> = keys
            .iter()
            .map(|key| format!("{:<width$}", format!("[{}]", key)))
            .collect();
        let markers: Vec<String> = keys
            .iter()
            .map(|&key| {
                let text = board
                    .marker_at(key)
                    .map(|marker| marker.to_string())
                    .unwrap_or_default();
                center(&text, width)
            })
            .collect();
        let spacer = vec![" ".repeat(width); dimension];

        for line in [labels, markers, spacer] {
            out.push_str(&line.join("|"));
            out.push('\n');
        }
        if row + 1 < dimension {
            out.push_str(&rule);
            out.push('\n');
        }
    }
    out
}

//! Win detection logic.

use crate::board::{Board, Mark};
use derive_getters::Getters;
use derive_new::new;
use tracing::instrument;

/// A winning triple of board indices.
pub type Triple = [usize; 3];

/// The 8 winning lines: rows, then columns, then diagonals.
///
/// The order is part of the contract. Legal alternating play can never
/// complete two lines for different marks, but a hand-built board can
/// complete several at once; the first completed line in this order is the
/// one reported.
pub const LINES: [Triple; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A detected win: which mark won, and on which triple.
///
/// The triple lets a display layer highlight the completed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct Win {
    /// The winning mark.
    mark: Mark,
    /// The completed line's indices.
    triple: Triple,
}

/// Checks if there is a winner on the board.
///
/// Returns the mark with three in a row together with the completed
/// triple, or `None` if no line is complete. Total over any board,
/// including ones unreachable by legal play.
#[instrument]
pub fn detect_winner(board: &Board) -> Option<Win> {
    for triple in LINES {
        let [a, b, c] = triple;
        if let Some(mark) = board.mark_at(a) {
            if board.mark_at(b) == Some(mark) && board.mark_at(c) == Some(mark) {
                return Some(Win::new(mark, triple));
            }
        }
    }

    None
}

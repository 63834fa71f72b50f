//! Draw detection logic.

use super::win::detect_winner;
use crate::board::Board;
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// Checks for a draw: a full board with no completed line.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && detect_winner(board).is_none()
}

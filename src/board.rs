//! Board and mark domain types.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A player's mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The X mark (moves first).
    X,
    /// The O mark (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the mark's display letter.
    pub fn letter(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A cell on the board: vacant, or holding a mark.
///
/// Serializes as `null`, `"X"`, or `"O"`, which is the cell encoding the
/// stored board uses.
pub type Cell = Option<Mark>;

/// Error returned when a cell index lies outside the 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("cell index {} is out of bounds (0-8)", index)]
pub struct OutOfBounds {
    /// The rejected index.
    pub index: usize,
}

/// 3x3 tic-tac-toe board.
///
/// Cells are kept in row-major order:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given index.
    ///
    /// Returns `None` for an out-of-bounds index, `Some(None)` for a vacant
    /// cell, and `Some(Some(mark))` for an occupied one.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Gets the mark at the given index, if any.
    ///
    /// Collapses out-of-bounds and vacant into `None`; use [`Board::get`]
    /// when the distinction matters.
    pub fn mark_at(&self, index: usize) -> Option<Mark> {
        self.get(index).flatten()
    }

    /// Sets the cell at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the index is not 0-8.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), OutOfBounds> {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                Ok(())
            }
            None => Err(OutOfBounds { index }),
        }
    }

    /// Checks if the cell at the given index is in bounds and vacant.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(None))
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Formats the board as a human-readable grid.
    ///
    /// Vacant cells show their index so a player can pick a move by number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Some(mark) => result.push_str(mark.letter()),
                    None => result.push_str(&index.to_string()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl From<[Cell; 9]> for Board {
    fn from(cells: [Cell; 9]) -> Self {
        Self { cells }
    }
}

//! Synchronous match engine for a single game.
//!
//! Drives one game from first move to finished record: validates moves,
//! alternates marks, consults the win detector after every placement, and
//! converts the finished game into its persistable [`GameRecord`].

use derive_more::{Display, Error};
use tracing::{debug, info, instrument};

use crate::board::{Board, Mark, OutOfBounds};
use crate::record::{GameRecord, GameResult, Players};
use crate::rules::{Win, detect_winner};

/// Current status of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    /// Moves can still be made.
    InProgress,
    /// The game ended with a completed line.
    Won(Win),
    /// The board filled with no winner.
    Draw,
}

/// Errors that can occur when placing a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The index lies outside the 3x3 board.
    #[display("cell index {} is out of bounds (0-8)", index)]
    OutOfBounds {
        /// The rejected index.
        index: usize,
    },
    /// The cell already holds a mark.
    #[display("cell {} is already occupied", index)]
    Occupied {
        /// The occupied index.
        index: usize,
    },
    /// No moves are accepted once the game has ended.
    #[display("the game is already over")]
    Finished,
}

impl From<OutOfBounds> for MoveError {
    fn from(err: OutOfBounds) -> Self {
        MoveError::OutOfBounds { index: err.index }
    }
}

/// A single tic-tac-toe match between two named players.
///
/// X always moves first. The engine owns the alternation and the win/draw
/// checks; callers supply cell indices (0-8) and read the status back.
#[derive(Debug, Clone)]
pub struct Game {
    players: Players,
    board: Board,
    to_move: Mark,
    status: GameStatus,
}

impl Game {
    /// Starts a new game between the named players; names are trimmed.
    #[instrument(skip(x_name, o_name))]
    pub fn new(x_name: impl Into<String>, o_name: impl Into<String>) -> Self {
        let players = Players::new(x_name, o_name);
        debug!(x = %players.x(), o = %players.o(), "Starting game");
        Self {
            players,
            board: Board::new(),
            to_move: Mark::X,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the players.
    pub fn players(&self) -> &Players {
        &self.players
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moves next.
    ///
    /// Stays on the last mover once the game is over.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Checks whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Places the current player's mark at the given cell index (0-8).
    ///
    /// On success the returned status tells the caller whether the game
    /// continues, was just won, or just drawn.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the game is over, the index is out of
    /// bounds, or the cell is occupied. The game is left unchanged.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn play(&mut self, index: usize) -> Result<&GameStatus, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::Finished);
        }
        match self.board.get(index) {
            None => return Err(MoveError::OutOfBounds { index }),
            Some(Some(_)) => return Err(MoveError::Occupied { index }),
            Some(None) => {}
        }

        self.board.set(index, Some(self.to_move))?;

        if let Some(win) = detect_winner(&self.board) {
            info!(winner = %self.players.name_of(*win.mark()), "Game won");
            self.status = GameStatus::Won(win);
        } else if self.board.is_full() {
            info!("Game drawn");
            self.status = GameStatus::Draw;
        } else {
            self.to_move = self.to_move.opponent();
        }

        Ok(&self.status)
    }

    /// Converts a finished game into its persistable record.
    ///
    /// Returns `None` while the game is still in progress. The result
    /// string is built from the winner's display name.
    #[instrument(skip(self))]
    pub fn into_record(self, timestamp: i64) -> Option<GameRecord> {
        let result = match &self.status {
            GameStatus::InProgress => return None,
            GameStatus::Won(win) => {
                GameResult::Winner(self.players.name_of(*win.mark()).to_string())
            }
            GameStatus::Draw => GameResult::Draw,
        };
        Some(GameRecord::new(self.board, result, self.players, timestamp))
    }
}

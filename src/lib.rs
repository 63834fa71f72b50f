//! Matchbook library - tic-tac-toe play and match history
//!
//! This library provides a tic-tac-toe engine alongside the ledger that
//! remembers its games.
//!
//! # Architecture
//!
//! - **Rules**: Win and draw detection over a fixed 3x3 board
//! - **Game**: Move-by-move match engine producing finished records
//! - **History**: Grouping, renaming and deletion over stored records
//! - **Store**: Single-document persistence behind the [`GameStore`] trait
//!
//! # Example
//!
//! ```
//! use matchbook::{Game, HistoryService, MemoryStore, now_millis};
//!
//! # fn example() -> Result<(), matchbook::HistoryError> {
//! let mut game = Game::new("Ann", "Bo");
//! for index in [0, 3, 1, 4, 2] {
//!     game.play(index).expect("legal move");
//! }
//! let record = game.into_record(now_millis()).expect("finished game");
//!
//! let service = HistoryService::new(MemoryStore::new());
//! service.record_game(record)?;
//!
//! let groups = service.grouped()?;
//! assert_eq!(groups[0].title(), "Ann vs Bo");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod game;
mod history;
mod record;
mod rules;
mod service;
mod store;

// Crate-level exports - Board types
pub use board::{Board, Cell, Mark, OutOfBounds};

// Crate-level exports - Configuration
pub use config::{ConfigError, HistoryConfig};

// Crate-level exports - Match engine
pub use game::{Game, GameStatus, MoveError};

// Crate-level exports - History operations
pub use history::{
    DRAWS_KEY, NumberedGame, PairingGroup, RenameError, TITLE_SEPARATOR, delete_one,
    group_by_pairing, rename_pairing,
};

// Crate-level exports - Game records
pub use record::{GameRecord, GameResult, InvalidResult, Players, now_millis};

// Crate-level exports - Rules
pub use rules::{LINES, Triple, Win, detect_winner, is_draw, is_full};

// Crate-level exports - History service
pub use service::{HistoryError, HistoryService};

// Crate-level exports - Persistence
pub use store::{FileStore, GameStore, MemoryStore, StoreError, decode_records, encode_records};

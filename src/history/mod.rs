//! Pairing-grouped history over stored game records.
//!
//! Everything here is a pure transformation of an in-memory record
//! sequence; [`crate::HistoryService`] wires these functions to the store.

mod group;
mod rename;

pub use group::{DRAWS_KEY, NumberedGame, PairingGroup, group_by_pairing};
pub use rename::{RenameError, TITLE_SEPARATOR, rename_pairing};

use tracing::instrument;

use crate::record::GameRecord;

/// Removes every record carrying the given timestamp.
///
/// Timestamps are collision-free for records written through the service,
/// so this normally removes exactly one record. Order is preserved.
#[instrument(skip(games), fields(count = games.len()))]
pub fn delete_one(games: &[GameRecord], timestamp: i64) -> Vec<GameRecord> {
    games
        .iter()
        .filter(|record| *record.timestamp() != timestamp)
        .cloned()
        .collect()
}

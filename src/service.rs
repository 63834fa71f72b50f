//! History service: the read-modify-write layer over an injected store.

use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument};

use crate::config::HistoryConfig;
use crate::history::{self, PairingGroup, RenameError};
use crate::record::GameRecord;
use crate::store::{FileStore, GameStore, StoreError, decode_records, encode_records};

/// Failures surfaced by [`HistoryService`] operations.
#[derive(Debug, Clone, Display, Error, From)]
pub enum HistoryError {
    /// The persistence collaborator failed; the stored state is whatever
    /// it was before the operation.
    #[display("{}", _0)]
    Store(StoreError),
    /// Rename validation failed; nothing was written.
    #[display("{}", _0)]
    Rename(RenameError),
}

/// Orchestrates the game ledger over an injected [`GameStore`].
///
/// Stateless between calls: every operation reads the whole store,
/// transforms the records in memory, and writes the whole store back. The
/// store itself is the only state, which is all the coordination a
/// single-writer ledger needs.
#[derive(Debug, Clone)]
pub struct HistoryService<S> {
    store: S,
    pretty: bool,
}

impl<S: GameStore> HistoryService<S> {
    /// Creates a service over the given store.
    ///
    /// Documents are pretty-printed by default so the stored file diffs
    /// cleanly; see [`HistoryService::with_pretty`].
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        info!("Creating HistoryService");
        Self {
            store,
            pretty: true,
        }
    }

    /// Overrides the document formatting (compact vs pretty).
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Returns the underlying store.
    #[instrument(skip(self))]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads all records, newest first.
    ///
    /// An absent or unparseable store reads as empty (recovery is logged,
    /// not surfaced); real I/O failures propagate.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Store`] if the store could not be read.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Vec<GameRecord>, HistoryError> {
        let records = match self.store.read_store()? {
            Some(serialized) => decode_records(&serialized),
            None => Vec::new(),
        };
        debug!(count = records.len(), "Records loaded");
        Ok(records)
    }

    /// Persists a finished game at the head of the store.
    ///
    /// The timestamp doubles as the record's identifier, so a timestamp
    /// at or before the newest stored one is bumped one past it. Returns
    /// the record as stored.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Store`] if the store could not be read or
    /// written.
    #[instrument(skip(self, record), fields(timestamp = *record.timestamp(), result = %record.result()))]
    pub fn record_game(&self, record: GameRecord) -> Result<GameRecord, HistoryError> {
        let mut records = self.load()?;
        let timestamp = next_timestamp(*record.timestamp(), &records);
        let record = record.with_timestamp(timestamp);
        records.insert(0, record.clone());
        self.write(&records)?;
        info!(timestamp, total = records.len(), "Game recorded");
        Ok(record)
    }

    /// Loads the history grouped by pairing.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Store`] if the store could not be read.
    #[instrument(skip(self))]
    pub fn grouped(&self) -> Result<Vec<PairingGroup>, HistoryError> {
        Ok(history::group_by_pairing(&self.load()?))
    }

    /// Renames a pairing across every one of its records and persists the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Rename`] when validation fails (the store
    /// is left untouched), or [`HistoryError::Store`] on read/write
    /// failure.
    #[instrument(skip(self))]
    pub fn rename_pairing(
        &self,
        old_title: &str,
        new_title: &str,
    ) -> Result<Vec<GameRecord>, HistoryError> {
        let records = self.load()?;
        let renamed = history::rename_pairing(&records, old_title, new_title)?;
        self.write(&renamed)?;
        info!(old = old_title, new = new_title, "Pairing renamed");
        Ok(renamed)
    }

    /// Deletes the record(s) carrying the given timestamp and persists
    /// the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Store`] if the store could not be read or
    /// written.
    #[instrument(skip(self))]
    pub fn delete_game(&self, timestamp: i64) -> Result<Vec<GameRecord>, HistoryError> {
        let records = self.load()?;
        let remaining = history::delete_one(&records, timestamp);
        let removed = records.len() - remaining.len();
        self.write(&remaining)?;
        info!(timestamp, removed, "Game deleted");
        Ok(remaining)
    }

    /// Clears the whole ledger. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Store`] if the store could not be cleared.
    #[instrument(skip(self))]
    pub fn delete_all(&self) -> Result<(), HistoryError> {
        self.store.clear_store()?;
        info!("History cleared");
        Ok(())
    }

    fn write(&self, records: &[GameRecord]) -> Result<(), HistoryError> {
        let document = encode_records(records, self.pretty)?;
        self.store.write_store(&document)?;
        Ok(())
    }
}

impl HistoryService<FileStore> {
    /// Builds a file-backed service from configuration.
    #[instrument(skip(config), fields(path = %config.store_path().display()))]
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            store: FileStore::new(config.store_path()),
            pretty: *config.pretty(),
        }
    }
}

/// Picks a collision-free timestamp for a new record: the requested one,
/// or one past the newest stored timestamp if that is not strictly newer.
fn next_timestamp(requested: i64, records: &[GameRecord]) -> i64 {
    match records.iter().map(|record| *record.timestamp()).max() {
        Some(newest) if newest >= requested => newest + 1,
        _ => requested,
    }
}

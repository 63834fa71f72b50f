//! Persistence layer: the store contract, its backends, and the document
//! codec.
//!
//! The whole record sequence is persisted as one serialized document;
//! every write replaces it. The [`GameStore`] trait is the seam for
//! injecting a backend, with [`FileStore`] for production and
//! [`MemoryStore`] for tests.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

use tracing::{instrument, warn};

use crate::record::GameRecord;

/// Where the serialized record sequence lives.
///
/// `read_store` distinguishes an absent store (`Ok(None)`) from a real
/// failure. A single `write_store` replaces the whole document and must be
/// atomic: either the new document lands or the old one survives.
pub trait GameStore {
    /// Returns the serialized store, or `None` if nothing was written yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for real failures, never for "not
    /// found".
    fn read_store(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the store with the given document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document could not be written; the
    /// previous document must remain intact in that case.
    fn write_store(&self, serialized: &str) -> Result<(), StoreError>;

    /// Removes the store entirely. An already-absent store is success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store exists but could not be
    /// removed.
    fn clear_store(&self) -> Result<(), StoreError>;
}

/// Serializes records, newest first, as one JSON document.
///
/// Pretty printing keeps the document human-diffable; compact is for
/// callers that care about size.
#[instrument(skip(records), fields(count = records.len(), pretty))]
pub fn encode_records(records: &[GameRecord], pretty: bool) -> Result<String, StoreError> {
    let document = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    };
    document.map_err(StoreError::from)
}

/// Parses a stored document, keeping whatever still looks like a record.
///
/// A document that is not valid JSON, or not a JSON array, reads as an
/// empty store. A malformed element is dropped with a warning so one bad
/// row cannot hide the rest of the history.
#[instrument(skip(serialized), fields(bytes = serialized.len()))]
pub fn decode_records(serialized: &str) -> Vec<GameRecord> {
    let value: serde_json::Value = match serde_json::from_str(serialized) {
        Ok(value) => value,
        Err(err) => {
            warn!(%err, "Store document is not valid JSON, reading as empty");
            return Vec::new();
        }
    };

    let Some(items) = value.as_array() else {
        warn!("Store document is not a JSON array, reading as empty");
        return Vec::new();
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<GameRecord>(item.clone()) {
            Ok(record) => records.push(record),
            Err(err) => warn!(index, %err, "Dropping malformed game record"),
        }
    }
    records
}

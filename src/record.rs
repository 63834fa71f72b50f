//! Persisted game records.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::board::{Board, Mark};

/// Display names for the two seats of a game.
///
/// Names are trimmed of surrounding whitespace on construction, so records
/// built through this type satisfy the trimmed-before-storage rule.
/// Records read back from a store keep whatever the document holds; the
/// history view re-trims when it groups.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Players {
    /// Name seated on the X mark.
    #[serde(rename = "X")]
    x: String,
    /// Name seated on the O mark.
    #[serde(rename = "O")]
    o: String,
}

impl Players {
    /// Creates a pair of players, trimming both names.
    pub fn new(x: impl Into<String>, o: impl Into<String>) -> Self {
        Self {
            x: x.into().trim().to_string(),
            o: o.into().trim().to_string(),
        }
    }

    /// Returns the name seated on the given mark.
    pub fn name_of(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }
}

/// Error for result strings that match neither stored form.
#[derive(Debug, Clone, Display, Error)]
#[display("unrecognized result string: '{}'", value)]
pub struct InvalidResult {
    /// The string that failed to parse.
    pub value: String,
}

/// Result of a finished game.
///
/// Stored in the legacy string form: `"<name> wins"` with the winner's
/// display name, or `"Draw"`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameResult {
    /// A player completed a line; carries the winner's display name.
    #[display("{} wins", _0)]
    Winner(String),
    /// The board filled with no completed line.
    #[display("Draw")]
    Draw,
}

impl GameResult {
    /// Renders the string form stored in the document.
    #[instrument]
    pub fn to_store_string(&self) -> String {
        self.to_string()
    }

    /// Parses the string form stored in the document.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidResult`] if the string is neither `"Draw"` nor
    /// `"<name> wins"`, so a corrupt row can be dropped on load.
    #[instrument(skip(s), fields(s = %s))]
    pub fn from_store_string(s: &str) -> Result<Self, InvalidResult> {
        if s == "Draw" {
            return Ok(Self::Draw);
        }
        match s.strip_suffix(" wins") {
            Some(name) => Ok(Self::Winner(name.to_string())),
            None => Err(InvalidResult {
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for GameResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_store_string())
    }
}

impl<'de> Deserialize<'de> for GameResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_store_string(&s).map_err(serde::de::Error::custom)
    }
}

/// A finished game as persisted in the store.
///
/// The timestamp (milliseconds since the epoch) doubles as the record's
/// identifier; [`crate::HistoryService`] keeps it collision-free at write
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct GameRecord {
    /// Board at game end.
    board: Board,
    /// Outcome in the stored string form.
    result: GameResult,
    /// Who sat on X and O.
    players: Players,
    /// Milliseconds since the epoch; the record's identifier.
    timestamp: i64,
}

impl GameRecord {
    /// Returns the same record with a different timestamp.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The record's timestamp as a UTC datetime for display.
    ///
    /// `None` if the stored value is outside the representable range.
    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Current wall-clock time in milliseconds since the epoch.
///
/// The conventional timestamp for a freshly finished game.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

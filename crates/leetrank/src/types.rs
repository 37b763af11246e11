//! Core data types for recorded ranking points.

use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single ranking observation.
///
/// Serialized as `{"date": "YYYY-MM-DD", "rank": int, "timestamp": "YYYY-MM-DDTHH:MM:SS.ffffff"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRecord {
    pub date: NaiveDate,
    pub rank: u64,
    pub timestamp: NaiveDateTime,
}

impl RankRecord {
    /// Build a record observed at `now` (local wall-clock time).
    ///
    /// The timestamp keeps microsecond precision, the date is the calendar
    /// day of `now`.
    pub fn observed_at(rank: u64, now: NaiveDateTime) -> Self {
        let timestamp = now.trunc_subsecs(6);
        Self {
            date: timestamp.date(),
            rank,
            timestamp,
        }
    }

    /// Ordering key used for the persisted history.
    pub fn sort_key(&self) -> (NaiveDate, NaiveDateTime) {
        (self.date, self.timestamp)
    }
}

/// The persisted container: every recorded point, oldest first.
///
/// Multiple records per day are expected; nothing is ever deduplicated or
/// updated in place. Entries of the `data` array that are valid JSON but not
/// a well-formed record land in `unrecognized` and are written back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankHistory {
    pub data: Vec<RankRecord>,
    pub unrecognized: Vec<Value>,
}

impl RankHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record unconditionally.
    pub fn push(&mut self, record: RankRecord) {
        self.data.push(record);
    }

    /// Stable sort by `(date, timestamp)` ascending.
    pub fn sort(&mut self) {
        self.data.sort_by_key(RankRecord::sort_key);
    }

    /// Whether records are non-decreasing in `(date, timestamp)`.
    pub fn is_sorted(&self) -> bool {
        self.data
            .windows(2)
            .all(|w| w[0].sort_key() <= w[1].sort_key())
    }

    /// Number of entries in the file, recognized or not.
    pub fn count(&self) -> usize {
        self.data.len() + self.unrecognized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The most recent record, assuming the history is sorted.
    pub fn latest(&self) -> Option<&RankRecord> {
        self.data.last()
    }

    /// The last `limit` records in chronological order.
    pub fn recent(&self, limit: usize) -> &[RankRecord] {
        let start = self.data.len().saturating_sub(limit);
        &self.data[start..]
    }

    /// Build a history from the parsed file contents.
    ///
    /// The root must be an object with a `data` array. Each entry that does
    /// not deserialize as a [`RankRecord`] is kept as-is.
    pub fn from_value(value: Value) -> HistoryResult<Self> {
        let Value::Object(mut root) = value else {
            return Err(HistoryError::Storage(
                "history root is not a JSON object".to_string(),
            ));
        };
        let Some(Value::Array(entries)) = root.remove("data") else {
            return Err(HistoryError::Storage(
                "history has no \"data\" array".to_string(),
            ));
        };

        let mut history = Self::new();
        for (index, entry) in entries.into_iter().enumerate() {
            match RankRecord::deserialize(&entry) {
                Ok(record) => history.data.push(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "keeping unrecognized history entry as-is");
                    history.unrecognized.push(entry);
                }
            }
        }
        Ok(history)
    }

    /// The `{"data": [...]}` document for this history.
    ///
    /// Recognized and unrecognized entries are merged and ordered by their
    /// `date` then `timestamp` strings; a missing key sorts first.
    pub fn to_value(&self) -> HistoryResult<Value> {
        let mut entries = self
            .data
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        entries.extend(self.unrecognized.iter().cloned());
        entries.sort_by(|a, b| entry_key(a).cmp(&entry_key(b)));

        let mut root = Map::new();
        root.insert("data".to_string(), Value::Array(entries));
        Ok(Value::Object(root))
    }
}

fn entry_key(entry: &Value) -> (&str, &str) {
    (str_field(entry, "date"), str_field(entry, "timestamp"))
}

fn str_field<'a>(entry: &'a Value, name: &str) -> &'a str {
    entry.get(name).and_then(Value::as_str).unwrap_or("")
}

/// Errors that can occur while reading or writing the history file.
#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Convenience result type.
pub type HistoryResult<T> = Result<T, HistoryError>;

//! JSON history file reader/writer.

use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::types::{HistoryError, HistoryResult, RankHistory, RankRecord};

/// Writer for history files.
pub struct HistoryWriter;

/// Reader for history files.
pub struct HistoryReader;

impl HistoryWriter {
    /// Write a history to any writer as two-space indented JSON.
    pub fn write_to<W: Write>(history: &RankHistory, writer: &mut W) -> HistoryResult<()> {
        serde_json::to_writer_pretty(&mut *writer, &history.to_value()?)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Replace the file at `path` with `history`.
    ///
    /// The payload is written to a sibling `.tmp` file and renamed over the
    /// target, so the previous contents stay intact if the write fails.
    pub fn write_to_file(history: &RankHistory, path: &Path) -> HistoryResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = tmp_path(path)?;
        let mut file = std::fs::File::create(&tmp)?;
        let written = Self::write_to(history, &mut file)
            .and_then(|()| file.sync_all().map_err(HistoryError::from));
        drop(file);
        if let Err(e) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(e);
        }

        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl HistoryReader {
    /// Read a history from any reader.
    ///
    /// Read failures are `Io`, bytes that are not JSON are `Json`, and JSON
    /// that is not the `{"data": [...]}` container is `Storage`.
    pub fn read_from<R: Read>(reader: &mut R) -> HistoryResult<RankHistory> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        RankHistory::from_value(value)
    }

    /// Read a history from a file.
    pub fn read_from_file(path: &Path) -> HistoryResult<RankHistory> {
        let mut file = std::fs::File::open(path)?;
        Self::read_from(&mut file)
    }
}

fn tmp_path(path: &Path) -> HistoryResult<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| HistoryError::Storage(format!("not a file path: {}", path.display())))?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

/// Append-only ranking history backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the existing history.
    ///
    /// A missing file yields an empty history. A file that is not JSON at all
    /// is discarded with a warning and also yields an empty history. Read
    /// errors and JSON of the wrong shape are returned.
    pub fn load(&self) -> HistoryResult<RankHistory> {
        match HistoryReader::read_from_file(&self.path) {
            Ok(history) => {
                tracing::debug!(
                    path = %self.path.display(),
                    records = history.count(),
                    "loaded ranking history"
                );
                Ok(history)
            }
            Err(HistoryError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no history file yet");
                Ok(RankHistory::new())
            }
            Err(HistoryError::Json(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "history file is corrupted, starting fresh"
                );
                Ok(RankHistory::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite the history file.
    pub fn save(&self, history: &RankHistory) -> HistoryResult<()> {
        HistoryWriter::write_to_file(history, &self.path)
    }

    /// Record `rank` as observed now (local time) and persist the result.
    pub fn record_rank(&self, rank: u64) -> HistoryResult<RankHistory> {
        self.record_rank_at(rank, Local::now().naive_local())
    }

    /// Record `rank` as observed at `now`.
    ///
    /// Always appends, even when the day already has records. The returned
    /// history is sorted by `(date, timestamp)` and is exactly what was
    /// written.
    pub fn record_rank_at(&self, rank: u64, now: NaiveDateTime) -> HistoryResult<RankHistory> {
        let mut history = self.load()?;
        let record = RankRecord::observed_at(rank, now);
        tracing::info!(
            date = %record.date,
            rank,
            timestamp = %record.timestamp,
            "recording rank"
        );
        history.push(record);
        history.sort();
        self.save(&history)?;
        Ok(history)
    }
}

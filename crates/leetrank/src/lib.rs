//! leetrank — append-only ranking history with per-day summaries.

pub mod storage;
pub mod summary;
pub mod types;

pub use storage::{HistoryReader, HistoryStore, HistoryWriter};
pub use summary::{daily_best, summarize, DailyBest, RankSummary};
pub use types::*;

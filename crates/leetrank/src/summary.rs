//! Per-day summaries over a ranking history.
//!
//! A day can hold several records; a day is represented by its best
//! (lowest) rank.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::RankHistory;

/// Best rank seen on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBest {
    pub date: NaiveDate,
    pub rank: u64,
}

/// Headline numbers for a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSummary {
    /// Best rank on the most recent tracked day.
    pub current_rank: u64,
    /// Best rank over all days.
    pub best_rank: u64,
    pub days_tracked: usize,
    pub total_records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// Collapse a history to one point per day, ordered by date.
pub fn daily_best(history: &RankHistory) -> Vec<DailyBest> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for record in &history.data {
        by_day
            .entry(record.date)
            .and_modify(|best| *best = (*best).min(record.rank))
            .or_insert(record.rank);
    }
    by_day
        .into_iter()
        .map(|(date, rank)| DailyBest { date, rank })
        .collect()
}

/// Summarize a history. Returns `None` when nothing has been recorded.
pub fn summarize(history: &RankHistory) -> Option<RankSummary> {
    let days = daily_best(history);
    let first = days.first()?;
    let last = days.last()?;
    let best_rank = days.iter().map(|d| d.rank).min()?;

    Some(RankSummary {
        current_rank: last.rank,
        best_rank,
        days_tracked: days.len(),
        total_records: history.count(),
        first_date: first.date,
        last_date: last.date,
    })
}

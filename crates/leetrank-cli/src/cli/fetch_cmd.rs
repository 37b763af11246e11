//! Default command: fetch the ranking once and append it to the history.

use anyhow::{bail, Context, Result};
use chrono::Local;
use leetrank::{HistoryStore, RankHistory, RankRecord};

use crate::cli::output::{self, format_rank, progress};
use crate::config::TrackerConfig;
use crate::fetch::Fetcher;

/// Result of one fetch-and-record pass.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A ranking was found and persisted; `history` is what was written.
    Recorded { rank: u64, history: RankHistory },
    /// No ranking could be obtained; the history file was not touched.
    NotFound,
}

/// Run the fetch command. A missing ranking is an error (exit status 1).
pub async fn run(config: &TrackerConfig) -> Result<()> {
    let fetcher = Fetcher::new(config.clone())?;
    let store = HistoryStore::new(&config.data_file);

    match fetch_and_record(&fetcher, &store).await? {
        FetchOutcome::Recorded { .. } => Ok(()),
        FetchOutcome::NotFound => bail!("failed to fetch ranking for {}", config.username),
    }
}

/// Fetch once; write only when a ranking was found.
pub async fn fetch_and_record(fetcher: &Fetcher, store: &HistoryStore) -> Result<FetchOutcome> {
    let username = &fetcher.config().username;
    progress(format!("Fetching LeetCode rank for {username}..."));

    let Some(rank) = fetcher.fetch_rank().await else {
        print_not_found();
        return Ok(FetchOutcome::NotFound);
    };

    progress(format!("Current rank: {}", format_rank(rank)));

    let now = Local::now().naive_local();
    let history = store
        .record_rank_at(rank, now)
        .with_context(|| format!("failed to update {}", store.path().display()))?;

    report(&RankRecord::observed_at(rank, now), &history, store);
    Ok(FetchOutcome::Recorded { rank, history })
}

fn print_not_found() {
    if output::is_json() {
        return;
    }
    eprintln!("Warning: Failed to fetch ranking. This might be due to:");
    eprintln!("  - LeetCode API changes");
    eprintln!("  - Network issues");
    eprintln!("  - Profile privacy settings");
    eprintln!("  - Rate limiting");
    eprintln!();
    eprintln!("Exiting without updating data.");
}

fn report(saved: &RankRecord, history: &RankHistory, store: &HistoryStore) {
    let timestamp = saved.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "rank": saved.rank,
            "date": saved.date.to_string(),
            "timestamp": timestamp,
            "data_file": store.path().display().to_string(),
            "total_records": history.count(),
        }));
        return;
    }

    progress(format!(
        "Saved rank for {}: {} at {timestamp}",
        saved.date, saved.rank
    ));
    progress(format!("Data saved to {}", store.path().display()));
    progress(format!("Total data points: {}", history.count()));
}

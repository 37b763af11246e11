//! CLI handlers for the read-only history views (history, stats).

use anyhow::{Context, Result};
use leetrank::{daily_best, summarize, HistoryStore, RankHistory};

use crate::cli::output::{self, format_rank};
use crate::config::TrackerConfig;

fn load(config: &TrackerConfig) -> Result<RankHistory> {
    let store = HistoryStore::new(&config.data_file);
    store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))
}

/// Run the history command: list recorded points, most recent last.
pub async fn run_history(config: &TrackerConfig, limit: Option<usize>) -> Result<()> {
    let history = load(config)?;
    let points = match limit {
        Some(n) => history.recent(n),
        None => &history.data[..],
    };

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "total_records": history.count(),
            "data": points,
        }));
    } else if points.is_empty() {
        println!("  No history data found in {}.", config.data_file.display());
    } else {
        println!(
            "  Ranking history for {} ({} of {} records):\n",
            config.username,
            points.len(),
            history.count()
        );
        for record in points {
            println!(
                "    {}  {:>12}",
                record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                format_rank(record.rank)
            );
        }
    }

    Ok(())
}

/// Run the stats command: per-day best ranks reduced to headline numbers.
pub async fn run_stats(config: &TrackerConfig) -> Result<()> {
    let history = load(config)?;

    let Some(summary) = summarize(&history) else {
        if output::is_json() {
            output::print_json(&serde_json::json!({ "summary": null }));
        } else {
            println!("  No history data found in {}.", config.data_file.display());
        }
        return Ok(());
    };

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "summary": summary,
            "daily_best": daily_best(&history),
        }));
        return Ok(());
    }

    println!("  LeetCode rank for {}\n", config.username);
    println!("    Current rank:   {}", format_rank(summary.current_rank));
    println!("    Best rank:      {}", format_rank(summary.best_rank));
    println!(
        "    Days tracked:   {} ({} to {})",
        summary.days_tracked, summary.first_date, summary.last_date
    );
    println!("    Total records:  {}", summary.total_records);

    Ok(())
}

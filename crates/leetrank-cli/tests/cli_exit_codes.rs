//! Binary-level tests for the leetrank CLI.
//!
//! Covers exit status and file effects of the fetch command against local
//! mock endpoints, plus the read-only views.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ─────────────────────── helpers ───────────────────────

const UNREACHABLE: &str = "http://127.0.0.1:9";

/// A `leetrank` command with a clean environment pointing at `base`.
fn leetrank(base: &str, data_file: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("leetrank").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("LEETRANK_USERNAME")
        .env_remove("LEETRANK_TIMEOUT")
        .arg("--username")
        .arg("someone")
        .arg("--graphql-url")
        .arg(format!("{base}/graphql/"))
        .arg("--profile-url")
        .arg(format!("{base}/u/{{username}}/"))
        .arg("--data-file")
        .arg(data_file)
        .arg("--timeout")
        .arg("3");
    cmd
}

fn read_json(p: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(p).unwrap()).unwrap()
}

// ─────────────────────── fetch ───────────────────────

#[test]
fn fetch_failure_exits_one_and_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");
    let before = "{\n  \"data\": []\n}\n";
    std::fs::write(&data_file, before).unwrap();

    leetrank(UNREACHABLE, &data_file)
        .arg("fetch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to fetch ranking"))
        .stderr(predicate::str::contains("Rate limiting"));

    assert_eq!(std::fs::read_to_string(&data_file).unwrap(), before);
}

#[test]
fn fetch_failure_without_file_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");

    leetrank(UNREACHABLE, &data_file).assert().code(1);

    assert!(!data_file.exists());
}

#[tokio::test]
async fn fetch_success_appends_record_and_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "matchedUser": { "profile": { "ranking": 1234567 } } }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");

    leetrank(&server.uri(), &data_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Current rank: 1,234,567"))
        .stdout(predicate::str::contains("Total data points: 1"));

    leetrank(&server.uri(), &data_file)
        .arg("fetch")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total data points: 2"));

    let saved = read_json(&data_file);
    let data = saved["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|r| r["rank"] == 1234567));
    assert!(data[0]["timestamp"].as_str() <= data[1]["timestamp"].as_str());
}

#[tokio::test]
async fn fetch_falls_back_to_profile_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/u/someone/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><script>window.__INITIAL__ = {"ranking": 12345}</script></html>"#,
        ))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");

    leetrank(&server.uri(), &data_file)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rank\": 12345"));

    assert_eq!(read_json(&data_file)["data"][0]["rank"], 12345);
}

#[test]
fn corrupt_history_survives_failed_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");
    std::fs::write(&data_file, "garbage").unwrap();

    leetrank(UNREACHABLE, &data_file).assert().code(1);
    assert_eq!(std::fs::read_to_string(&data_file).unwrap(), "garbage");
}

#[tokio::test]
async fn fetch_keeps_entries_it_does_not_understand() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "matchedUser": { "profile": { "ranking": 1480 } } }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");
    let history = json!({
        "data": [
            {"date": "2024-01-01", "rank": 1500, "timestamp": "2024-01-01T10:00:00+00:00"},
            {"date": "2024-01-02", "rank": null, "timestamp": "2024-01-02T10:00:00"}
        ]
    });
    std::fs::write(&data_file, history.to_string()).unwrap();

    leetrank(&server.uri(), &data_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total data points: 3"));

    let data = read_json(&data_file)["data"].as_array().unwrap().clone();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["timestamp"], "2024-01-01T10:00:00+00:00");
    assert!(data[1]["rank"].is_null());
    assert_eq!(data[2]["rank"], 1480);
}

#[test]
fn history_of_wrong_shape_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");
    std::fs::write(&data_file, "[1, 2, 3]").unwrap();

    leetrank(UNREACHABLE, &data_file)
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
    assert_eq!(std::fs::read_to_string(&data_file).unwrap(), "[1, 2, 3]");
}

#[test]
fn zero_timeout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");

    leetrank(UNREACHABLE, &data_file)
        .args(["--timeout", "0"])
        .assert()
        .code(2);
    assert!(!data_file.exists());
}

// ─────────────────────── views ───────────────────────

#[test]
fn stats_reports_daily_best() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");
    let history = json!({
        "data": [
            {"date": "2024-01-01", "rank": 1500, "timestamp": "2024-01-01T06:00:00"},
            {"date": "2024-01-01", "rank": 1490, "timestamp": "2024-01-01T18:00:00"},
            {"date": "2024-01-02", "rank": 1510, "timestamp": "2024-01-02T06:00:00"}
        ]
    });
    std::fs::write(&data_file, serde_json::to_string_pretty(&history).unwrap()).unwrap();

    let out = leetrank(UNREACHABLE, &data_file)
        .args(["--json", "stats"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["summary"]["current_rank"], 1510);
    assert_eq!(v["summary"]["best_rank"], 1490);
    assert_eq!(v["summary"]["days_tracked"], 2);
    assert_eq!(v["summary"]["total_records"], 3);
}

#[test]
fn history_lists_recent_points() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("leetcode-rank-data.json");
    let history = json!({
        "data": [
            {"date": "2024-01-01", "rank": 1500, "timestamp": "2024-01-01T06:00:00"},
            {"date": "2024-01-02", "rank": 1490, "timestamp": "2024-01-02T06:00:00"}
        ]
    });
    std::fs::write(&data_file, history.to_string()).unwrap();

    leetrank(UNREACHABLE, &data_file)
        .args(["history", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1,490"))
        .stdout(predicate::str::contains("1 of 2 records"));
}

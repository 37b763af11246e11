//! leetrank CLI — fetch a LeetCode profile ranking and append it to a local history.

pub mod cli;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod types;

pub use config::{ConfigOverrides, TrackerConfig};
pub use fetch::Fetcher;
pub use types::FetchError;

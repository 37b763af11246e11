//! Configuration loading and resolution.
//!
//! Every field resolves as: explicit CLI value, then environment variable,
//! then built-in default.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_USERNAME: &str = "umeshg17";
pub const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql/";
pub const DEFAULT_PROFILE_URL: &str = "https://leetcode.com/u/{username}/";
pub const DEFAULT_DATA_FILE: &str = "leetcode-rank-data.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_USERNAME: &str = "LEETRANK_USERNAME";
pub const ENV_GRAPHQL_URL: &str = "LEETRANK_GRAPHQL_URL";
pub const ENV_PROFILE_URL: &str = "LEETRANK_PROFILE_URL";
pub const ENV_DATA_FILE: &str = "LEETRANK_DATA_FILE";
pub const ENV_TIMEOUT: &str = "LEETRANK_TIMEOUT";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub username: Option<String>,
    pub graphql_url: Option<String>,
    pub profile_url: Option<String>,
    pub data_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Everything the fetcher and the store need to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Profile identity whose ranking is tracked.
    pub username: String,
    /// GraphQL endpoint for the structured query.
    pub graphql_url: String,
    /// Profile page URL; `{username}` is substituted.
    pub profile_url_template: String,
    /// History file, relative paths resolve against the working directory.
    pub data_file: PathBuf,
    /// Per-request network timeout.
    pub timeout: Duration,
}

impl TrackerConfig {
    /// Defaults for the given identity.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            profile_url_template: DEFAULT_PROFILE_URL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolve against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Self {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with<F>(overrides: &ConfigOverrides, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |explicit: Option<&String>, key: &str| -> Option<String> {
            explicit
                .cloned()
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
        };

        let username = lookup(overrides.username.as_ref(), ENV_USERNAME)
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
        let graphql_url = lookup(overrides.graphql_url.as_ref(), ENV_GRAPHQL_URL)
            .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());
        let profile_url_template = lookup(overrides.profile_url.as_ref(), ENV_PROFILE_URL)
            .unwrap_or_else(|| DEFAULT_PROFILE_URL.to_string());

        let data_file = overrides
            .data_file
            .clone()
            .or_else(|| env(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let timeout_secs = overrides.timeout_secs.unwrap_or_else(|| match env(ENV_TIMEOUT) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "ignoring invalid {ENV_TIMEOUT}, using {DEFAULT_TIMEOUT_SECS}s"
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        });

        Self {
            username,
            graphql_url,
            profile_url_template,
            data_file,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// The profile page URL for the configured identity.
    pub fn profile_url(&self) -> String {
        self.profile_url_template.replace("{username}", &self.username)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME)
    }
}

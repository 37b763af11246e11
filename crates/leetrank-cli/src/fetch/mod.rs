//! Layered ranking acquisition.
//!
//! Order of attempts, first hit wins:
//! 1. GraphQL profile query;
//! 2. profile page fetch, then `<script>` block scan;
//! 3. free-text scan of the same page.
//!
//! The page is only fetched when GraphQL answered without a usable ranking.
//! A GraphQL transport failure ends the attempt.
//!
//! Whatever goes wrong, [`Fetcher::fetch_rank`] answers `Some(rank)` or `None`.

pub mod graphql;
pub mod http_client;
pub mod scrape;

use crate::config::TrackerConfig;
use crate::types::FetchResult;
use http_client::HttpClient;

/// One way of reading a ranking out of profile page markup.
#[derive(Debug, Clone, Copy)]
pub struct PageStrategy {
    pub name: &'static str,
    pub scan: fn(&str) -> Option<u64>,
}

/// Page strategies in the order they are tried.
pub const PAGE_STRATEGIES: &[PageStrategy] = &[
    PageStrategy {
        name: "script",
        scan: scrape::scan_scripts,
    },
    PageStrategy {
        name: "text",
        scan: scrape::scan_text,
    },
];

/// Run the page strategies in order; returns the winning strategy and rank.
pub fn scan_page(html: &str) -> Option<(&'static str, u64)> {
    PAGE_STRATEGIES.iter().find_map(|strategy| {
        let rank = (strategy.scan)(html)?;
        Some((strategy.name, rank))
    })
}

/// Where a ranking came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankSource {
    GraphQl,
    Page(&'static str),
}

/// Fetches the ranking for one configured identity.
#[derive(Clone)]
pub struct Fetcher {
    client: HttpClient,
    config: TrackerConfig,
}

impl Fetcher {
    /// Build a fetcher with its own HTTP client.
    pub fn new(config: TrackerConfig) -> FetchResult<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: HttpClient, config: TrackerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Fetch the current ranking. Never fails: every error is logged and
    /// reported as `None`.
    pub async fn fetch_rank(&self) -> Option<u64> {
        self.fetch_rank_with_source().await.map(|(rank, _)| rank)
    }

    /// Like [`fetch_rank`](Self::fetch_rank), also naming the strategy that hit.
    pub async fn fetch_rank_with_source(&self) -> Option<(u64, RankSource)> {
        match self.try_fetch().await {
            Ok(Some((rank, source))) => {
                tracing::info!(rank, ?source, "ranking found");
                Some((rank, source))
            }
            Ok(None) => {
                tracing::warn!(
                    url = %self.config.profile_url(),
                    "could not find ranking on profile page"
                );
                None
            }
            Err(e) => {
                tracing::error!(error = %e, timed_out = e.is_timeout(), "error fetching ranking");
                None
            }
        }
    }

    async fn try_fetch(&self) -> FetchResult<Option<(u64, RankSource)>> {
        let username = &self.config.username;

        if let Some(rank) =
            graphql::query_ranking(&self.client, &self.config.graphql_url, username).await?
        {
            return Ok(Some((rank, RankSource::GraphQl)));
        }

        tracing::info!("GraphQL API failed, trying web scraping");
        let url = self.config.profile_url();
        let page = self.client.get(&url).await?.error_for_status()?;

        Ok(scan_page(&page.body).map(|(name, rank)| (rank, RankSource::Page(name))))
    }
}

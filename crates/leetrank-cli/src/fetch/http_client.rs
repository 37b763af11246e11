//! Async HTTP client wrapping reqwest.
//!
//! Not a browser, just HTTP requests with a browser User-Agent. Handles
//! redirects and timeouts. No retries: a failed request is reported to the
//! caller once.

use std::time::Duration;

use serde_json::Value;

use crate::types::{FetchError, FetchResult};

/// Desktop Chrome User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/91.0.4472.124 Safari/537.36";

/// Response from an HTTP request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a 4xx/5xx response into an error.
    pub fn error_for_status(self) -> FetchResult<Self> {
        if self.status >= 400 {
            return Err(FetchError::Status {
                url: self.url,
                status: self.status,
            });
        }
        Ok(self)
    }
}

/// HTTP client for the ranking fetcher.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with a fixed per-request timeout.
    pub fn new(timeout: Duration) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    /// Perform a single GET request.
    pub async fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        tracing::debug!(url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| request_error(url, source))?;
        read_response(url, resp).await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, url: &str, body: &Value) -> FetchResult<HttpResponse> {
        tracing::debug!(url, "POST");
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|source| request_error(url, source))?;
        read_response(url, resp).await
    }
}

fn request_error(url: &str, source: reqwest::Error) -> FetchError {
    FetchError::Request {
        url: url.to_string(),
        source,
    }
}

async fn read_response(url: &str, resp: reqwest::Response) -> FetchResult<HttpResponse> {
    let status = resp.status().as_u16();
    let final_url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|source| request_error(url, source))?;

    if final_url != url {
        tracing::debug!(url, final_url = %final_url, "followed redirect");
    }
    tracing::debug!(url, status, bytes = body.len(), "response received");

    Ok(HttpResponse {
        url: url.to_string(),
        final_url,
        status,
        body,
    })
}

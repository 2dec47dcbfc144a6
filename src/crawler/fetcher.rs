//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests returning the raw body bytes
//! - Error classification (unreachable, timeout, status, malformed body)
//!
//! Each URL is attempted exactly once; there is no retry logic.

use crate::config::FetcherConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum number of redirects followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// Reasons a fetch can fail
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Redirected off-site to {0}")]
    OffSite(String),
}

/// A successfully fetched resource
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// Content-Type header value, if present
    pub content_type: Option<String>,

    /// Raw body bytes
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Returns true if the response may contain HTML links
    ///
    /// Responses without a Content-Type are treated as HTML.
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.contains("text/html") || ct.contains("application/xhtml")
            }
            None => true,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::FetcherConfig;
/// use site_mirror::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves URLs over HTTP
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Fetches a URL once and returns its body
    ///
    /// # Error Classification
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Connection refused / DNS failure | `Unreachable` |
    /// | Timeout | `Timeout` |
    /// | Non-2xx status | `Status` |
    /// | Body could not be read or decoded | `Malformed` |
    /// | Anything else (e.g. too many redirects) | `Request` |
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Malformed(e.to_string())
                }
            })?
            .to_vec();

        Ok(FetchedPage {
            final_url,
            content_type,
            body,
        })
    }
}

/// Maps a reqwest send error to a fetch failure reason
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Unreachable(e.to_string())
    } else if e.is_decode() || e.is_body() {
        FetchError::Malformed(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

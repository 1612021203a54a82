//! HTTP data client
//!
//! This module issues the logical fetches against the remote JSON source:
//! - Building the HTTP client with user agent and timeouts
//! - Classifying response status into transient and terminal failures
//! - Driving each fetch through the retry loop
//! - Parsing response bodies into loosely-typed records

use crate::client::retry::{with_retry, IsTransient, RetryPolicy};
use crate::config::SourceConfig;
use crate::record::RawRecord;
use crate::{ConfigError, HarvestError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Absolute timeout applied to each individual request attempt
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Classified failure of a logical fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// 429 or any 5xx, eligible for retry
    #[error("transient HTTP {status} for {url}")]
    TransientStatus { url: String, status: u16 },

    /// Any other non-2xx status, terminal, never retried
    #[error("HTTP {status} for {url}")]
    FatalStatus { url: String, status: u16 },

    /// Connection, TLS, or per-attempt timeout failure, eligible for retry
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx response whose body is not a JSON array of objects; terminal,
    /// retrying cannot fix a malformed payload
    #[error("invalid response body for {url}: {reason}")]
    Body { url: String, reason: String },
}

impl IsTransient for FetchError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::TransientStatus { .. } | FetchError::Transport { .. }
        )
    }
}

/// Builds an HTTP client with proper configuration
///
/// The timeout here is the per-attempt bound; the retry loop decides how many
/// attempts a logical fetch gets.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("thread-harvest/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for the remote three-level data source
///
/// One logical fetch = request + status classification + retry budget.
/// Callers see either parsed records or a single classified [`FetchError`].
pub struct ApiClient {
    http: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Creates a client for the configured source with the contract retry policy
    pub fn new(config: &SourceConfig) -> Result<Self, HarvestError> {
        Self::with_policy(config, RetryPolicy::default())
    }

    /// Creates a client with a custom retry policy
    ///
    /// Used by tests to shrink the backoff schedule; production callers want
    /// [`ApiClient::new`].
    pub fn with_policy(config: &SourceConfig, retry: RetryPolicy) -> Result<Self, HarvestError> {
        url::Url::parse(&config.base_url).map_err(|e| {
            HarvestError::Config(ConfigError::InvalidUrl(format!(
                "Invalid base-url '{}': {}",
                config.base_url, e
            )))
        })?;

        let http = build_http_client()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// Fetches one collection of loosely-typed records
    ///
    /// Query parameters are passed through unmodified. Transient failures are
    /// retried per the client's policy; the returned error is the terminal
    /// classification of the last attempt.
    pub async fn fetch_records(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<RawRecord>, FetchError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        with_retry(&self.retry, || self.fetch_once(&url, params)).await
    }

    /// Lists all users
    pub async fn fetch_users(&self) -> Result<Vec<RawRecord>, FetchError> {
        self.fetch_records("users", &[]).await
    }

    /// Lists the posts belonging to one user
    pub async fn fetch_posts_for_user(&self, user_id: u64) -> Result<Vec<RawRecord>, FetchError> {
        self.fetch_records(&format!("users/{}/posts", user_id), &[])
            .await
    }

    /// Lists the comments belonging to one post
    pub async fn fetch_comments_for_post(
        &self,
        post_id: u64,
    ) -> Result<Vec<RawRecord>, FetchError> {
        self.fetch_records(&format!("posts/{}/comments", post_id), &[])
            .await
    }

    /// Performs a single attempt: request, classify, parse
    async fn fetch_once(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<RawRecord>, FetchError> {
        tracing::info!(url, "API GET start");

        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            tracing::warn!(url, status = status.as_u16(), "API GET transient status");
            return Err(FetchError::TransientStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(FetchError::FatalStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let records =
            response
                .json::<Vec<RawRecord>>()
                .await
                .map_err(|e| FetchError::Body {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;

        tracing::info!(url, count = records.len(), "API GET done");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_source(base: &str) -> SourceConfig {
        SourceConfig {
            base_url: base.to_string(),
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_malformed_base_url() {
        let result = ApiClient::new(&test_source("not a url"));
        assert!(matches!(result, Err(HarvestError::Config(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new(&test_source("http://example.com/api/")).unwrap();
        assert_eq!(client.base_url, "http://example.com/api");
    }

    #[test]
    fn test_transient_classification() {
        let transient = FetchError::TransientStatus {
            url: "http://example.com/users".to_string(),
            status: 503,
        };
        assert!(transient.is_transient());

        let rate_limited = FetchError::TransientStatus {
            url: "http://example.com/users".to_string(),
            status: 429,
        };
        assert!(rate_limited.is_transient());

        let fatal = FetchError::FatalStatus {
            url: "http://example.com/users".to_string(),
            status: 404,
        };
        assert!(!fatal.is_transient());

        let body = FetchError::Body {
            url: "http://example.com/users".to_string(),
            reason: "expected array".to_string(),
        };
        assert!(!body.is_transient());
    }
}

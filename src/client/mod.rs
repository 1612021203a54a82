//! Data client module
//!
//! This module contains the network-facing half of the pipeline:
//! - HTTP fetching with status classification
//! - Retry logic with exponential backoff

mod api;
mod retry;

pub use api::{build_http_client, ApiClient, FetchError, REQUEST_TIMEOUT};
pub use retry::{with_retry, IsTransient, RetryPolicy};

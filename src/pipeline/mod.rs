//! Pipeline module - fetch orchestration and run accounting
//!
//! This module drives the fetch-validate-select pipeline across its three
//! levels and accumulates the run counters the summary reports.

mod coordinator;
mod counters;

pub use coordinator::{Coordinator, PostBranch, UserBranch};
pub use counters::{LevelCounters, RunCounters, UserCounters};

use crate::client::ApiClient;
use crate::config::Config;
use crate::Result;

/// Runs a complete pipeline against the configured source
///
/// Builds the client, drives the coordinator, and hands back the result tree
/// together with the run counters.
pub async fn run_pipeline(config: &Config) -> Result<(Vec<UserBranch>, RunCounters)> {
    let client = ApiClient::new(&config.source)?;
    let mut coordinator = Coordinator::new(client, config.pipeline.clone());

    let tree = coordinator.run().await?;
    let counters = *coordinator.counters();

    Ok((tree, counters))
}

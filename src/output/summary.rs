//! Run summary reporting
//!
//! This module renders the end-of-run report: run metadata plus the per-level
//! counters accumulated by the pipeline.

use crate::pipeline::RunCounters;
use chrono::{DateTime, Utc};

/// Everything the end-of-run report needs
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config_hash: String,
    pub counters: RunCounters,
    pub rows_written: usize,
    pub csv_path: String,
}

impl RunSummary {
    /// Wall-clock duration of the run in whole seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Prints the run summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Run:");
    println!("  Started:     {}", summary.started_at.to_rfc3339());
    println!("  Finished:    {}", summary.finished_at.to_rfc3339());
    println!("  Duration:    {}s", summary.duration_seconds());
    println!("  Config hash: {}", summary.config_hash);
    println!();

    let users = &summary.counters.users;
    println!(
        "Users:    fetched={} valid={} invalid={} kept={}",
        users.fetched, users.valid, users.invalid, users.kept
    );

    let posts = &summary.counters.posts;
    println!(
        "Posts:    fetched={} valid={} invalid={} selected={} fetch_failed={}",
        posts.fetched, posts.valid, posts.invalid, posts.selected, posts.fetch_failed
    );

    let comments = &summary.counters.comments;
    println!(
        "Comments: fetched={} valid={} invalid={} selected={} fetch_failed={}",
        comments.fetched,
        comments.valid,
        comments.invalid,
        comments.selected,
        comments.fetch_failed
    );
    println!();

    println!(
        "CSV: wrote {} rows -> {}",
        summary.rows_written, summary.csv_path
    );

    let failures = summary.counters.branch_failures();
    if failures > 0 {
        println!(
            "Completed with {} branch failure(s); see logs for details.",
            failures
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_duration_seconds() {
        let summary = RunSummary {
            started_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            finished_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 30).unwrap(),
            config_hash: "abc".to_string(),
            counters: RunCounters::default(),
            rows_written: 0,
            csv_path: "./out.csv".to_string(),
        };

        assert_eq!(summary.duration_seconds(), 90);
    }
}

//! Thread-Harvest main entry point
//!
//! This is the command-line interface for the Thread-Harvest export pipeline.

use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use thread_harvest::config::load_config_with_hash;
use thread_harvest::output::{flatten_rows, print_summary, write_rows, RunSummary};
use thread_harvest::pipeline::run_pipeline;
use tracing_subscriber::EnvFilter;

/// Thread-Harvest: users → posts → comments CSV export
///
/// Thread-Harvest fetches the user list from a remote JSON source, follows
/// each even-id user to their newest posts and each post to its newest
/// comments, and writes one flat CSV artifact plus a run summary.
#[derive(Parser, Debug)]
#[command(name = "thread-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Export the newest forum activity to CSV", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would run without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_run(config, config_hash).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("thread_harvest=info,warn"),
            1 => EnvFilter::new("thread_harvest=debug,info"),
            2 => EnvFilter::new("thread_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the run plan
fn handle_dry_run(config: &thread_harvest::Config) {
    println!("=== Thread-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);

    println!("\nPipeline:");
    println!(
        "  Max concurrent requests: {}",
        config.pipeline.max_concurrent_requests
    );
    println!("  Posts per user: {}", config.pipeline.posts_per_user);
    println!("  Comments per post: {}", config.pipeline.comments_per_post);

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main export run
///
/// A pipeline failure (the users fetch) aborts before any artifact is
/// written; branch failures are reported in the summary but exit zero.
async fn handle_run(config: thread_harvest::Config, config_hash: String) -> anyhow::Result<()> {
    let started_at = Utc::now();

    let (tree, counters) = match run_pipeline(&config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            return Err(e.into());
        }
    };

    let rows = flatten_rows(&tree);
    let rows_written = write_rows(std::path::Path::new(&config.output.csv_path), &rows)?;

    let summary = RunSummary {
        started_at,
        finished_at: Utc::now(),
        config_hash,
        counters,
        rows_written,
        csv_path: config.output.csv_path.clone(),
    };

    print_summary(&summary);
    Ok(())
}

use serde::Deserialize;

/// Main configuration structure for Thread-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

/// Remote data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the JSON API (e.g., "https://jsonplaceholder.typicode.com")
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Pipeline behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of simultaneously in-flight requests across all stages
    #[serde(rename = "max-concurrent-requests", default = "default_concurrency")]
    pub max_concurrent_requests: usize,

    /// Number of newest posts to keep per user
    #[serde(rename = "posts-per-user", default = "default_posts_per_user")]
    pub posts_per_user: usize,

    /// Number of newest comments to keep per post
    #[serde(rename = "comments-per-post", default = "default_comments_per_post")]
    pub comments_per_post: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV output file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

fn default_concurrency() -> usize {
    10
}

fn default_posts_per_user() -> usize {
    5
}

fn default_comments_per_post() -> usize {
    3
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_concurrency(),
            posts_per_user: default_posts_per_user(),
            comments_per_post: default_comments_per_post(),
        }
    }
}

use crate::config::types::{Config, OutputConfig, PipelineConfig, SourceConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_pipeline_config(&config.pipeline)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the data source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    // http is allowed so the pipeline can run against local or mock sources
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates pipeline configuration
fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.posts_per_user < 1 {
        return Err(ConfigError::Validation(format!(
            "posts_per_user must be >= 1, got {}",
            config.posts_per_user
        )));
    }

    if config.comments_per_post < 1 {
        return Err(ConfigError::Validation(format!(
            "comments_per_post must be >= 1, got {}",
            config.comments_per_post
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            source: SourceConfig {
                base_url: "https://jsonplaceholder.typicode.com".to_string(),
            },
            pipeline: PipelineConfig::default(),
            output: OutputConfig {
                csv_path: "./output.csv".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_http_base_url_is_accepted() {
        let mut config = valid_config();
        config.source.base_url = "http://127.0.0.1:8080".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let mut config = valid_config();
        config.source.base_url = "ftp://example.com".to_string();
        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let mut config = valid_config();
        config.source.base_url = "not a url".to_string();
        let result = validate(&config);
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = valid_config();
        config.pipeline.max_concurrent_requests = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_concurrency_rejected() {
        let mut config = valid_config();
        config.pipeline.max_concurrent_requests = 500;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_selection_bounds_rejected() {
        let mut config = valid_config();
        config.pipeline.posts_per_user = 0;
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.pipeline.comments_per_post = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_csv_path_rejected() {
        let mut config = valid_config();
        config.output.csv_path = String::new();
        assert!(validate(&config).is_err());
    }
}

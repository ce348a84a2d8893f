use crate::config::types::{Config, CrawlSettings, OutputConfig};
use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// Upper bound on concurrent fetchers
pub const MAX_WORKERS: usize = 64;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_settings(&config.crawl)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl settings
pub fn validate_crawl_settings(settings: &CrawlSettings) -> Result<(), ConfigError> {
    validate_root_url(&settings.root_url)?;

    if settings.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            settings.max_pages
        )));
    }

    if !settings.delay.is_finite() || settings.delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "delay must be a non-negative number of seconds, got {}",
            settings.delay
        )));
    }

    if Duration::try_from_secs_f64(settings.delay).is_err() {
        return Err(ConfigError::Validation(format!(
            "delay {} is too large",
            settings.delay
        )));
    }

    if settings.workers < 1 || settings.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and {}, got {}",
            MAX_WORKERS, settings.workers
        )));
    }

    if settings.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1 second, got {}",
            settings.request_timeout
        )));
    }

    for pattern in &settings.exclude_patterns {
        if pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "exclude patterns cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "json_path cannot be empty".to_string(),
        ));
    }

    if config.text_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "text_path cannot be empty".to_string(),
        ));
    }

    if config.json_path == config.text_path {
        return Err(ConfigError::Validation(format!(
            "json_path and text_path must differ, both are '{}'",
            config.json_path.display()
        )));
    }

    if let Some(sqlite_path) = &config.sqlite_path {
        if sqlite_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sqlite_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the root URL: parseable, http(s), with a host
fn validate_root_url(root_url: &str) -> Result<(), ConfigError> {
    let root_url = root_url.trim();
    let url = Url::parse(root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root URL '{}': {}", root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Root URL '{}' must use http or https",
            root_url
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "Root URL '{}' has no host",
            root_url
        )));
    }

    Ok(())
}

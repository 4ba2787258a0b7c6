//! Configuration management for blockledger
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use blockledger::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Ledger artifact: {}", config.paths.ledger_path.display());
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `BLOCKLEDGER__<section>__<key>`
//!
//! Examples:
//! - `BLOCKLEDGER__PATHS__DOWNLOAD_DIR=/srv/exports`
//! - `BLOCKLEDGER__RETENTION__KEEP_ARCHIVES=5`
//! - `BLOCKLEDGER__ENRICHMENT__PAUSE_MS=1500`
//!
//! The enrichment API token is a secret and comes only from the environment
//! (`IPINFO_TOKEN` or `BLOCKLEDGER_ENRICHMENT_TOKEN`), never from TOML.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/blockledger.toml`.
//! This can be overridden using the `BLOCKLEDGER_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

// Re-export public types
pub use models::{
    ArchiveConfig, Config, EnrichmentConfig, HighlightConfig, PathsConfig, RetentionConfig,
};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`BLOCKLEDGER__*`)
    /// 2. TOML file (default: `config/blockledger.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails (zero retention, empty extensions).
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[highlight]
watch_orgs = ["Google LLC"]
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.highlight.watch_orgs, vec!["Google LLC"]);
    }

    #[test]
    fn test_validation_catches_zero_retention() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[retention]
keep_archives = 0
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError(ValidationError::ZeroRetention))
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[paths]
download_dir = "data/downloads"
output_dir = "data/output"
ledger_path = "data/output/ledger.json"

[archive]
primary_pattern = "blocked_hosts_*.tar.gz"
keyword = "blocked"
extension = "tar.gz"
payload_extension = "pf"
payload_keywords = ["snort", "block"]

[enrichment]
endpoint = "https://ipinfo.io"
connect_timeout_secs = 5
request_timeout_secs = 5
pause_ms = 1000

[highlight]
watch_orgs = ["Microsoft Corporation", "Google LLC", "Amazon.com", "Akamai"]

[retention]
keep_archives = 2
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(config.archive.payload_keywords, vec!["snort", "block"]);
        assert_eq!(config.enrichment.request_timeout_secs, 5);
        assert_eq!(config.highlight.watch_orgs.len(), 4);
        assert_eq!(config.retention.keep_archives, 2);
    }
}

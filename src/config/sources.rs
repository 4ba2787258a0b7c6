use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "BLOCKLEDGER_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/blockledger.toml";
const ENV_PREFIX: &str = "BLOCKLEDGER";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Load secrets from environment variables into config.
/// Secrets are never stored in TOML files, only in environment.
fn load_secrets(config: &mut Config) {
    if let Ok(token) = env::var("IPINFO_TOKEN") {
        config.enrichment.token = Some(token);
    }

    // Alternative: prefixed name for deployments with multiple tools
    if config.enrichment.token.is_none() {
        if let Ok(token) = env::var("BLOCKLEDGER_ENRICHMENT_TOKEN") {
            config.enrichment.token = Some(token);
        }
    }
}

/// Load configuration from a specific path and environment.
/// Every entry point goes through here, so environment overrides and
/// secrets apply regardless of how the config path was chosen.
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let mut builder = config::Config::builder();

    // Start with defaults (handled by struct Default implementations)
    // Add TOML file if it exists (optional)
    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // Add environment variable overrides
    // BLOCKLEDGER__RETENTION__KEEP_ARCHIVES -> retention.keep_archives
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let mut config: Config = builder.build()?.try_deserialize()?;
    load_secrets(&mut config);
    Ok(config)
}

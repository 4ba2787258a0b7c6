use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("retention.keep_archives must be at least 1")]
    ZeroRetention,

    #[error("archive.extension must not be empty")]
    EmptyArchiveExtension,

    #[error("archive.payload_extension must not be empty")]
    EmptyPayloadExtension,
}

/// Reject configurations the pipeline cannot run with.
///
/// An empty watch-organization list is allowed: it simply means no row is
/// ever highlighted.
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    if config.retention.keep_archives == 0 {
        return Err(ValidationError::ZeroRetention);
    }
    if config.archive.extension.is_empty() {
        return Err(ValidationError::EmptyArchiveExtension);
    }
    if config.archive.payload_extension.is_empty() {
        return Err(ValidationError::EmptyPayloadExtension);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_retention_rejected() {
        let mut config = Config::default();
        config.retention.keep_archives = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ZeroRetention)
        ));
    }

    #[test]
    fn test_empty_extension_rejected() {
        let mut config = Config::default();
        config.archive.extension.clear();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::EmptyArchiveExtension)
        ));
    }

    #[test]
    fn test_empty_watch_orgs_allowed() {
        let mut config = Config::default();
        config.highlight.watch_orgs.clear();
        assert!(validate(&config).is_ok());
    }
}

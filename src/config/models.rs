use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
}

/// Filesystem layout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Where the device drops dated export archives.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
    /// Scratch and export output for each run.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// The cumulative ledger artifact.
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            output_dir: default_output_dir(),
            ledger_path: default_ledger_path(),
        }
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("data/downloads")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("data/output/ledger.json")
}

/// Archive naming and payload discovery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Primary glob for export archives in the download directory.
    #[serde(default = "default_primary_pattern")]
    pub primary_pattern: String,
    /// Keyword tried anywhere in the filename when the primary glob
    /// matches nothing.
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Archive extension, the last-resort match tier.
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Extension of the payload file inside the archive (no leading dot).
    #[serde(default = "default_payload_extension")]
    pub payload_extension: String,
    /// Filename fragments tried when no file carries the payload extension.
    #[serde(default = "default_payload_keywords")]
    pub payload_keywords: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            primary_pattern: default_primary_pattern(),
            keyword: default_keyword(),
            extension: default_extension(),
            payload_extension: default_payload_extension(),
            payload_keywords: default_payload_keywords(),
        }
    }
}

fn default_primary_pattern() -> String {
    "blocked_hosts_*.tar.gz".to_string()
}

fn default_keyword() -> String {
    "blocked".to_string()
}

fn default_extension() -> String {
    "tar.gz".to_string()
}

fn default_payload_extension() -> String {
    "pf".to_string()
}

fn default_payload_keywords() -> Vec<String> {
    vec!["snort".to_string(), "block".to_string()]
}

/// Registration-metadata lookup service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API token (loaded from environment, not from config file)
    #[serde(skip)]
    pub token: Option<String>,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Pause between consecutive lookups. Rate-limit courtesy towards the
    /// service; it must remain a sequential delay.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            pause_ms: default_pause_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "https://ipinfo.io".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_pause_ms() -> u64 {
    1000
}

/// Highlight predicate over the organization field
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HighlightConfig {
    /// A row is highlighted when its organization contains any of these as a
    /// substring (case-sensitive).
    #[serde(default = "default_watch_orgs")]
    pub watch_orgs: Vec<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            watch_orgs: default_watch_orgs(),
        }
    }
}

fn default_watch_orgs() -> Vec<String> {
    [
        "Microsoft Corporation",
        "Google LLC",
        "Amazon.com",
        "Akamai",
    ]
    .map(String::from)
    .to_vec()
}

/// Archive retention
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetentionConfig {
    /// How many recent archives survive the post-run cleanup.
    #[serde(default = "default_keep_archives")]
    pub keep_archives: usize,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            keep_archives: default_keep_archives(),
        }
    }
}

fn default_keep_archives() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.archive.primary_pattern, "blocked_hosts_*.tar.gz");
        assert_eq!(config.archive.payload_extension, "pf");
        assert_eq!(config.retention.keep_archives, 2);
        assert_eq!(config.enrichment.pause_ms, 1000);
        assert_eq!(config.highlight.watch_orgs.len(), 4);
        assert!(config.enrichment.token.is_none());
    }
}

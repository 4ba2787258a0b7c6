//! Injected capabilities standing in for the device-facing automation
//!
//! Fetching a dated archive and submitting an address list are external
//! collaborators (in the original deployment, browser-driven device
//! automation). The core only sees these two traits, so the whole pipeline
//! runs and tests without any device or network.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::archive::{ArchiveError, ArchiveResolver};
use crate::config::Config;

/// Produces today's export archive on local disk.
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    async fn fetch_archive(&self) -> Result<PathBuf, ArchiveError>;
}

/// Accepts an ordered list of addresses for re-submission to the device.
/// No structured response beyond success/failure.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, addresses: &[String]) -> bool;
}

/// Source that resolves the newest archive already present in the download
/// directory — the path taken when no live fetch capability is wired in.
pub struct LocalArchiveSource {
    resolver: ArchiveResolver,
}

impl LocalArchiveSource {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: ArchiveResolver::new(&config.paths.download_dir, &config.archive),
        }
    }
}

#[async_trait]
impl ArchiveSource for LocalArchiveSource {
    async fn fetch_archive(&self) -> Result<PathBuf, ArchiveError> {
        self.resolver.find_latest()
    }
}

/// Sink that only logs the would-be submission and reports success. Used
/// when no device submission capability is wired in.
pub struct LoggingSubmissionSink;

#[async_trait]
impl SubmissionSink for LoggingSubmissionSink {
    async fn submit(&self, addresses: &[String]) -> bool {
        for address in addresses {
            info!(address, "would submit address");
        }
        info!(count = addresses.len(), "submission complete (logging sink)");
        true
    }
}

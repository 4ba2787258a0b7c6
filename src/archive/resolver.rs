//! Locates dated export archives in the download directory
//!
//! Archive naming varies across device versions, so candidate files are
//! found through a cascade of glob tiers, each consulted only when the
//! previous tier matched nothing:
//!
//! 1. the primary pattern, e.g. `blocked_hosts_*.tar.gz`
//! 2. any file with the known keyword anywhere in its name
//! 3. any file with the expected extension
//!
//! "Latest" and "previous" are decided by file modification time, never by
//! filename ordering.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::Pattern;
use tracing::{debug, info, warn};

use super::{ArchiveError, Result};
use crate::config::ArchiveConfig;

pub struct ArchiveResolver {
    dir: PathBuf,
    primary_pattern: String,
    keyword: String,
    extension: String,
}

impl ArchiveResolver {
    pub fn new(dir: impl Into<PathBuf>, archive: &ArchiveConfig) -> Self {
        Self {
            dir: dir.into(),
            primary_pattern: archive.primary_pattern.clone(),
            keyword: archive.keyword.clone(),
            extension: archive.extension.clone(),
        }
    }

    /// Find the most recently modified archive.
    pub fn find_latest(&self) -> Result<PathBuf> {
        let candidates = self.candidates()?;
        candidates
            .into_iter()
            .max_by_key(|p| modified(p))
            .inspect(|p| info!(path = %p.display(), "found latest archive"))
            .ok_or_else(|| ArchiveError::NoArchiveFound {
                dir: self.dir.clone(),
                pattern: self.primary_pattern.clone(),
            })
    }

    /// Find the second most recently modified archive, excluding `latest`.
    ///
    /// Absence is a valid state (first run), not an error.
    pub fn find_previous(&self, latest: &Path) -> Result<Option<PathBuf>> {
        let previous = self
            .candidates()?
            .into_iter()
            .filter(|p| p != latest)
            .max_by_key(|p| modified(p));

        match &previous {
            Some(p) => info!(path = %p.display(), "found previous archive"),
            None => info!("no previous archive available for comparison"),
        }
        Ok(previous)
    }

    /// Delete all but the `keep` most recently modified archives.
    ///
    /// Individual deletion failures are logged and skipped; the remaining
    /// candidates are still processed. Returns the number of files deleted.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let mut candidates = self.candidates()?;
        if candidates.len() <= keep {
            debug!(
                found = candidates.len(),
                keep, "nothing to prune in download directory"
            );
            return Ok(0);
        }

        // Newest first, so the tail is what gets deleted.
        candidates.sort_by_key(|p| std::cmp::Reverse(modified(p)));

        let mut deleted = 0;
        for path in candidates.drain(keep..) {
            match fs::remove_file(&path) {
                Ok(()) => {
                    info!(path = %path.display(), "deleted old archive");
                    deleted += 1;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "failed to delete old archive"),
            }
        }
        Ok(deleted)
    }

    /// All candidate archives, first non-empty glob tier wins.
    fn candidates(&self) -> Result<Vec<PathBuf>> {
        let tiers = [
            self.primary_pattern.clone(),
            format!("*{}*.{}", self.keyword, self.extension),
            format!("*.{}", self.extension),
        ];

        for pattern in &tiers {
            let matches = self.matching_files(pattern)?;
            if !matches.is_empty() {
                debug!(pattern, count = matches.len(), "archive candidates matched");
                return Ok(matches);
            }
        }
        Ok(Vec::new())
    }

    fn matching_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = Pattern::new(pattern)?;
        let mut matches = Vec::new();

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // A missing download directory is the same as an empty one.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(matches),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if pattern.matches(file_name) {
                matches.push(path);
            }
        }
        Ok(matches)
    }
}

fn modified(path: &Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

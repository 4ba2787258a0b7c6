//! Unpacks an export archive and normalizes its payload to a flat text file
//!
//! Real-world export archives vary in depth and naming: sometimes the
//! line-oriented payload sits directly inside the gzip'd tarball, sometimes
//! it is wrapped in a second tar layer, and sometimes it carries an
//! unexpected name. Payload discovery therefore walks a tier cascade and
//! stops at the first hit:
//!
//! 1. a file with the payload extension anywhere in the extracted tree
//! 2. a nested `.tar`, extracted in place, then tier 1 retried
//! 3. any file whose name contains one of the keyword hints
//!
//! The scratch directory used for extraction is removed before returning,
//! success or failure, so repeated runs never accumulate stale state.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, info, warn};

use super::{ArchiveError, Result};
use crate::config::ArchiveConfig;

const SCRATCH_DIR: &str = "scratch_extract";
const NORMALIZED_NAME: &str = "payload.txt";

/// What the payload file looks like inside an archive.
#[derive(Debug, Clone)]
pub struct PayloadSpec {
    /// Extension of the payload file, without the leading dot.
    pub extension: String,
    /// Filename fragments tried when no file carries the extension.
    pub keywords: Vec<String>,
}

impl From<&ArchiveConfig> for PayloadSpec {
    fn from(archive: &ArchiveConfig) -> Self {
        Self {
            extension: archive.payload_extension.clone(),
            keywords: archive.payload_keywords.clone(),
        }
    }
}

/// Unpack `archive_path` and copy its payload, verbatim, to
/// `<work_dir>/payload.txt`. Returns the normalized file's path.
pub fn unpack(archive_path: &Path, work_dir: &Path, payload_spec: &PayloadSpec) -> Result<PathBuf> {
    fs::create_dir_all(work_dir)?;
    let scratch = work_dir.join(SCRATCH_DIR);
    fs::create_dir_all(&scratch)?;

    let result = unpack_into(archive_path, work_dir, &scratch, payload_spec);

    // Guaranteed cleanup, whatever the discovery outcome was.
    if let Err(e) = fs::remove_dir_all(&scratch) {
        warn!(path = %scratch.display(), error = %e, "failed to remove scratch directory");
    }

    result
}

fn unpack_into(
    archive_path: &Path,
    work_dir: &Path,
    scratch: &Path,
    payload_spec: &PayloadSpec,
) -> Result<PathBuf> {
    debug!(archive = %archive_path.display(), "extracting archive");

    let file = File::open(archive_path)?;
    let mut outer = Archive::new(GzDecoder::new(BufReader::new(file)));
    outer.unpack(scratch)?;

    let payload = locate_payload(archive_path, scratch, payload_spec)?;
    debug!(payload = %payload.display(), "located payload file");

    let content = fs::read_to_string(&payload)?;
    let target = work_dir.join(NORMALIZED_NAME);
    fs::write(&target, &content)?;

    info!(
        archive = %archive_path.display(),
        target = %target.display(),
        lines = content.lines().count(),
        "normalized archive payload"
    );
    Ok(target)
}

fn locate_payload(
    archive_path: &Path,
    scratch: &Path,
    payload_spec: &PayloadSpec,
) -> Result<PathBuf> {
    // Tier 1: payload extension anywhere in the tree.
    if let Some(path) = find_by_extension(scratch, &payload_spec.extension)? {
        return Ok(path);
    }

    // Tier 2: a nested tar layer, extracted in place, then tier 1 again.
    if let Some(nested) = find_by_extension(scratch, "tar")? {
        debug!(nested = %nested.display(), "found nested archive, extracting");
        let mut inner = Archive::new(File::open(&nested)?);
        inner.unpack(scratch)?;
        if let Some(path) = find_by_extension(scratch, &payload_spec.extension)? {
            return Ok(path);
        }
    }

    // Tier 3: keyword hints in the filename.
    if let Some(path) = find_by_keywords(scratch, &payload_spec.keywords)? {
        return Ok(path);
    }

    Err(ArchiveError::PayloadNotFound {
        archive: archive_path.to_path_buf(),
    })
}

fn find_by_extension(dir: &Path, extension: &str) -> Result<Option<PathBuf>> {
    find_file(dir, &|path| {
        path.extension().and_then(|e| e.to_str()) == Some(extension)
    })
}

fn find_by_keywords(dir: &Path, keywords: &[String]) -> Result<Option<PathBuf>> {
    find_file(dir, &|path| {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        keywords.iter().any(|k| name.contains(k.as_str()))
    })
}

/// Depth-first search for the first file satisfying `pred`.
fn find_file(dir: &Path, pred: &dyn Fn(&Path) -> bool) -> Result<Option<PathBuf>> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(found) = find_file(&path, pred)? {
                return Ok(Some(found));
            }
        } else if pred(&path) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

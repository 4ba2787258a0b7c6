//! The reverse workflow: highlighted subset out of the ledger, optionally
//! submitted back to the device

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::capabilities::SubmissionSink;
use super::error::Result;
use crate::config::Config;
use crate::ledger::{LedgerStore, extract_highlighted, org_label, write_export};

/// What one extraction run produced.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub date_key: String,
    pub addresses: Vec<String>,
    /// Path of the export file, if one was left on disk.
    pub export_path: Option<PathBuf>,
    pub submitted: bool,
}

/// Extract the highlighted addresses of the newest ledger section, write
/// them to an export file, and optionally hand them to a submission sink.
///
/// An empty extraction leaves no export file behind. After a successful
/// submission the export file is removed as well; when submission fails or
/// was not requested, the file is preserved for manual use.
pub async fn run_extraction(
    config: &Config,
    org_filter: Option<&str>,
    sink: Option<&dyn SubmissionSink>,
) -> Result<ExtractionOutcome> {
    let store = LedgerStore::new(&config.paths.ledger_path);
    let extraction = extract_highlighted(&store, org_filter)?;
    let label = org_label(org_filter);

    let export_path = write_export(&config.paths.output_dir, &extraction, &label)?;

    if extraction.addresses.is_empty() {
        info!(date_key = extraction.date_key, "no addresses matched, removing empty export");
        remove_export(&export_path);
        return Ok(ExtractionOutcome {
            date_key: extraction.date_key,
            addresses: extraction.addresses,
            export_path: None,
            submitted: false,
        });
    }

    let submitted = match sink {
        Some(sink) => sink.submit(&extraction.addresses).await,
        None => false,
    };

    let export_path = if submitted {
        info!(path = %export_path.display(), "submission succeeded, removing export file");
        remove_export(&export_path);
        None
    } else {
        info!(path = %export_path.display(), "export file preserved");
        Some(export_path)
    };

    Ok(ExtractionOutcome {
        date_key: extraction.date_key,
        addresses: extraction.addresses,
        export_path,
        submitted,
    })
}

fn remove_export(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to remove export file");
    }
}

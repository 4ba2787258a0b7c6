//! The daily ingest workflow
//!
//! resolve today's and the previous archive → unpack both → extract address
//! sets → diff → enrich the newly seen addresses → append one dated section
//! to the ledger → clean up transient files and prune old archives.
//!
//! Every stage runs to completion before the next begins; nothing here is
//! concurrent.

use std::fs;
use std::net::IpAddr;
use std::time::Duration;

use chrono::Local;
use tracing::{info, warn};

use super::capabilities::ArchiveSource;
use super::error::Result;
use crate::addresses::{self, newly_seen};
use crate::archive::{ArchiveResolver, PayloadSpec, unpack};
use crate::config::Config;
use crate::enrich::{EnrichmentGateway, enrich_all};
use crate::ledger::LedgerStore;

const CURRENT_WORK_DIR: &str = "current";
const PREVIOUS_WORK_DIR: &str = "previous";

/// What one ingest run did.
#[derive(Debug)]
pub struct IngestSummary {
    pub date_key: String,
    /// Unique addresses in today's export.
    pub extracted: usize,
    /// Addresses not present in the previous export.
    pub newly_seen: usize,
    pub failed_lookups: usize,
    /// Whether a ledger section was written (false on an empty day).
    pub appended: bool,
    pub pruned_archives: usize,
}

/// Run one daily ingest.
pub async fn run_ingest(
    config: &Config,
    source: &dyn ArchiveSource,
    gateway: &dyn EnrichmentGateway,
) -> Result<IngestSummary> {
    let output_dir = &config.paths.output_dir;
    fs::create_dir_all(output_dir)?;

    // Stage 1: locate today's and the previous archive.
    let latest = source.fetch_archive().await?;
    let resolver = ArchiveResolver::new(&config.paths.download_dir, &config.archive);
    let previous = resolver.find_previous(&latest)?;

    // Stage 2: unpack both into separate work directories.
    let payload_spec = PayloadSpec::from(&config.archive);
    let current_payload = unpack(&latest, &output_dir.join(CURRENT_WORK_DIR), &payload_spec)?;
    let previous_payload = previous
        .as_deref()
        .map(|p| unpack(p, &output_dir.join(PREVIOUS_WORK_DIR), &payload_spec))
        .transpose()?;

    // Stage 3: extract canonical address sets and diff.
    let current_set = addresses::extract_from_path(&current_payload)?;
    let previous_set = previous_payload
        .as_deref()
        .map(addresses::extract_from_path)
        .transpose()?;
    let new_addresses = newly_seen(&current_set, previous_set.as_ref());

    // Sorted for deterministic row order in the ledger section.
    let mut batch: Vec<IpAddr> = new_addresses.into_iter().collect();
    batch.sort();

    // Stage 4: enrich and append today's section.
    let pause = Duration::from_millis(config.enrichment.pause_ms);
    let outcome = enrich_all(gateway, &batch, pause).await;

    let date_key = Local::now().format("%d_%m_%Y").to_string();
    let store = LedgerStore::new(&config.paths.ledger_path);
    let appended = store.append_section(&date_key, &outcome.records, &config.highlight.watch_orgs)?;

    // Stage 5: housekeeping. Failures here are logged, never fatal — the
    // ledger append already succeeded.
    for work_dir in [CURRENT_WORK_DIR, PREVIOUS_WORK_DIR] {
        let path = output_dir.join(work_dir);
        if path.exists() {
            if let Err(e) = fs::remove_dir_all(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove work directory");
            }
        }
    }
    let pruned_archives = match resolver.prune(config.retention.keep_archives) {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "archive pruning failed");
            0
        }
    };

    let summary = IngestSummary {
        date_key,
        extracted: current_set.len(),
        newly_seen: batch.len(),
        failed_lookups: outcome.failed_lookups,
        appended,
        pruned_archives,
    };
    info!(
        date_key = summary.date_key,
        extracted = summary.extracted,
        newly_seen = summary.newly_seen,
        failed_lookups = summary.failed_lookups,
        appended = summary.appended,
        pruned_archives = summary.pruned_archives,
        "ingest run complete"
    );
    Ok(summary)
}

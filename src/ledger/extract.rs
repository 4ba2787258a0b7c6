//! Reverse path: read the highlighted subset back out of the ledger
//!
//! Selects the most recent date-shaped section by calendar date (parsed and
//! compared, never lexical — string order would misorder months and days
//! across years), filters its highlighted rows, and writes the line-oriented
//! export file used for re-submission.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{info, warn};

use super::document::{LedgerDocument, Section};
use super::error::{LedgerError, Result};
use super::store::LedgerStore;

const DATE_KEY_FORMAT: &str = "%d_%m_%Y";

static DATE_KEY_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}_\d{2}_\d{4}$").unwrap());

/// A highlighted-subset extraction from one section.
#[derive(Debug)]
pub struct Extraction {
    /// Address values of qualifying rows, in row order.
    pub addresses: Vec<String>,
    /// Date key of the section they came from.
    pub date_key: String,
}

/// The most recent date-shaped section of the document.
pub fn newest_dated_section(doc: &LedgerDocument) -> Result<&Section> {
    doc.sections
        .iter()
        .filter_map(|section| {
            if !DATE_KEY_SHAPE.is_match(&section.date_key) {
                return None;
            }
            NaiveDate::parse_from_str(&section.date_key, DATE_KEY_FORMAT)
                .ok()
                .map(|date| (date, section))
        })
        .max_by_key(|(date, _)| *date)
        .map(|(_, section)| section)
        .ok_or(LedgerError::NoDatedSections)
}

/// Extract the addresses of highlighted rows from the newest dated section.
///
/// With an `org_filter`, a row additionally has to contain the filter as a
/// substring of its organization value. If filtering was requested but the
/// section carries no organization column, filtering is disabled and all
/// highlighted rows qualify.
pub fn extract_highlighted(store: &LedgerStore, org_filter: Option<&str>) -> Result<Extraction> {
    let doc = store.load()?;
    let section = newest_dated_section(&doc)?;
    info!(date_key = section.date_key, "selected newest ledger section");

    let address_col = section
        .address_column()
        .ok_or_else(|| LedgerError::NoAddressColumn(section.date_key.clone()))?;

    let org_col = section.organization_column();
    let filter = match (org_filter, org_col) {
        (Some(_), None) => {
            warn!(
                date_key = section.date_key,
                "organization column missing, falling back to all highlighted rows"
            );
            None
        }
        (filter, _) => filter,
    };

    let addresses: Vec<String> = section
        .rows
        .iter()
        .filter(|row| {
            row.highlighted
                && match (filter, org_col) {
                    (Some(f), Some(col)) => {
                        row.values.get(col).is_some_and(|org| org.contains(f))
                    }
                    _ => true,
                }
        })
        .filter_map(|row| row.values.get(address_col))
        .filter(|address| !address.is_empty())
        .cloned()
        .collect();

    info!(
        date_key = section.date_key,
        count = addresses.len(),
        "extracted highlighted addresses"
    );

    Ok(Extraction {
        addresses,
        date_key: section.date_key.clone(),
    })
}

/// Filesystem-safe label for the organization filter used, `all` when none.
/// A filter with no alphanumeric content labels as `all` too, so the export
/// filename never ends up with an empty segment.
pub fn org_label(org_filter: Option<&str>) -> String {
    let label = org_filter
        .map(|org| {
            let mut label = String::new();
            for c in org.chars() {
                if c.is_ascii_alphanumeric() {
                    label.extend(c.to_lowercase());
                } else if !label.ends_with('_') {
                    label.push('_');
                }
            }
            label.trim_matches('_').to_string()
        })
        .unwrap_or_default();

    if label.is_empty() {
        "all".to_string()
    } else {
        label
    }
}

/// Write the extraction as a line-oriented text file, one address per line,
/// named after the section date key and the filter label. Returns the path.
pub fn write_export(output_dir: &Path, extraction: &Extraction, label: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!(
        "highlighted_{}_{}.txt",
        extraction.date_key, label
    ));

    let mut body = extraction.addresses.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    fs::write(&path, body)?;

    info!(path = %path.display(), count = extraction.addresses.len(), "wrote export file");
    Ok(path)
}

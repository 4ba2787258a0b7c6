//! Persistence for the ledger artifact
//!
//! The artifact is a single JSON document. Writes go through a temp file
//! plus rename, so a failure mid-build leaves the previous on-disk artifact
//! untouched and a reader never observes a partial section.
//!
//! The store assumes a single logical writer: the design is one daily batch
//! process, and concurrent invocations against the same artifact are out of
//! scope. There is deliberately no lock.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::document::{LedgerDocument, Section};
use super::error::{LedgerError, Result};
use crate::enrich::EnrichmentRecord;

pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document. Fails with [`LedgerError::LedgerMissing`]
    /// when the artifact does not exist.
    pub fn load(&self) -> Result<LedgerDocument> {
        if !self.path.exists() {
            return Err(LedgerError::LedgerMissing(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Append one day's section, replacing any existing section with the
    /// same date key wholesale. Creates the artifact on first use.
    ///
    /// An empty record list is a no-op: no section is created, nothing on
    /// disk changes, and `false` is returned.
    pub fn append_section(
        &self,
        date_key: &str,
        records: &[EnrichmentRecord],
        watch_orgs: &[String],
    ) -> Result<bool> {
        if records.is_empty() {
            info!(date_key, "no records to append, leaving ledger untouched");
            return Ok(false);
        }

        let mut doc = if self.path.exists() {
            self.load()?
        } else {
            info!(path = %self.path.display(), "creating new ledger artifact");
            LedgerDocument::default()
        };

        let section = Section::build(date_key, records, watch_orgs);
        let highlighted = section.rows.iter().filter(|r| r.highlighted).count();
        doc.replace_section(section);
        self.save(&doc)?;

        info!(
            date_key,
            rows = records.len(),
            highlighted,
            "appended section to ledger"
        );
        Ok(true)
    }

    /// Atomic persist: serialize fully, write a temp file, rename over the
    /// target.
    fn save(&self, doc: &LedgerDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec_pretty(doc)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json)?;
        fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), bytes = json.len(), "persisted ledger");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(address: &str, org: &str) -> EnrichmentRecord {
        EnrichmentRecord {
            address: address.to_string(),
            organization: org.to_string(),
            country: String::new(),
            hostname: String::new(),
        }
    }

    fn test_store() -> (LedgerStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LedgerStore::new(temp_dir.path().join("ledger.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_load_missing_ledger() {
        let (store, _temp) = test_store();
        assert!(matches!(
            store.load(),
            Err(LedgerError::LedgerMissing(_))
        ));
    }

    #[test]
    fn test_append_creates_artifact() {
        let (store, _temp) = test_store();

        let appended = store
            .append_section("01_01_2025", &[record("8.8.8.8", "Google LLC")], &[])
            .unwrap();

        assert!(appended);
        let doc = store.load().unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].date_key, "01_01_2025");
    }

    #[test]
    fn test_append_same_key_is_idempotent() {
        let (store, _temp) = test_store();
        let records = vec![record("8.8.8.8", ""), record("1.1.1.1", "")];

        store.append_section("01_01_2025", &records, &[]).unwrap();
        store.append_section("01_01_2025", &records, &[]).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.section("01_01_2025").unwrap().rows.len(), 2);
    }

    #[test]
    fn test_append_preserves_other_sections() {
        let (store, _temp) = test_store();

        store
            .append_section("01_01_2025", &[record("8.8.8.8", "")], &[])
            .unwrap();
        store
            .append_section("02_01_2025", &[record("9.9.9.9", "")], &[])
            .unwrap();
        // Re-run day one with different content.
        store
            .append_section("01_01_2025", &[record("4.4.4.4", "")], &[])
            .unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(
            doc.section("02_01_2025").unwrap().rows[0].values[0],
            "9.9.9.9"
        );
        assert_eq!(
            doc.section("01_01_2025").unwrap().rows[0].values[0],
            "4.4.4.4"
        );
    }

    #[test]
    fn test_empty_records_is_noop() {
        let (store, _temp) = test_store();

        let appended = store.append_section("01_01_2025", &[], &[]).unwrap();
        assert!(!appended);
        // Not even an empty artifact is created.
        assert!(!store.path().exists());

        // An empty day also leaves existing sections alone.
        store
            .append_section("01_01_2025", &[record("8.8.8.8", "")], &[])
            .unwrap();
        let appended = store.append_section("02_01_2025", &[], &[]).unwrap();
        assert!(!appended);
        let doc = store.load().unwrap();
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn test_highlight_flags_persisted() {
        let (store, _temp) = test_store();
        let watch = vec!["Google LLC".to_string()];

        store
            .append_section(
                "01_01_2025",
                &[record("8.8.8.8", "Google LLC"), record("1.1.1.1", "Cloudflare")],
                &watch,
            )
            .unwrap();

        let doc = store.load().unwrap();
        let section = doc.section("01_01_2025").unwrap();
        assert!(section.rows[0].highlighted);
        assert!(!section.rows[1].highlighted);
        assert_eq!(section.table.name, "IPData_01_01_2025");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let (store, _temp) = test_store();
        store
            .append_section("01_01_2025", &[record("8.8.8.8", "")], &[])
            .unwrap();
        assert!(!store.path().with_extension("tmp").exists());
    }
}

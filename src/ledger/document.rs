//! Data model for the cumulative ledger artifact
//!
//! The ledger is one structured document holding an ordered collection of
//! date-keyed sections. Each section is a self-contained table: fixed header
//! row, one row per enrichment record, per-column display widths, a per-row
//! highlight marker, and a named styled table region. Sections for other
//! dates are never touched when one section is replaced.

use serde::{Deserialize, Serialize};

use crate::enrich::{EnrichmentRecord, FIELD_NAMES};

/// Fill applied to every cell of a highlighted row.
pub const HIGHLIGHT_FILL: &str = "FFFF0000";

/// Style name of each section's table region.
pub const TABLE_STYLE: &str = "TableStyleMedium6";

/// Padding added to the widest cell when computing column display widths.
const WIDTH_PADDING: usize = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerDocument {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Date key in `DD_MM_YYYY` form.
    pub date_key: String,
    /// Header row, fixed field order.
    pub columns: Vec<String>,
    /// Display width per column, derived from content length.
    pub column_widths: Vec<usize>,
    pub rows: Vec<Row>,
    pub table: TableRegion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Cell values in column order.
    pub values: Vec<String>,
    /// Full-row marker: the organization matched a watch organization.
    pub highlighted: bool,
}

/// Named styled region spanning a section's populated rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRegion {
    pub name: String,
    pub style: String,
    pub highlight_fill: String,
}

impl LedgerDocument {
    pub fn section(&self, date_key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.date_key == date_key)
    }

    /// Insert `section`, removing any existing section with the same date
    /// key first. Wholesale replace, never a merge: re-running a day must
    /// not duplicate rows.
    pub fn replace_section(&mut self, section: Section) {
        self.sections.retain(|s| s.date_key != section.date_key);
        self.sections.push(section);
    }
}

impl Section {
    /// Build a section table from enrichment records.
    pub fn build(date_key: &str, records: &[EnrichmentRecord], watch_orgs: &[String]) -> Self {
        let columns: Vec<String> = FIELD_NAMES.map(String::from).to_vec();

        let rows: Vec<Row> = records
            .iter()
            .map(|record| Row {
                values: record.values().map(String::from).to_vec(),
                highlighted: is_highlighted(&record.organization, watch_orgs),
            })
            .collect();

        let column_widths = columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let widest_cell = rows
                    .iter()
                    .filter_map(|row| row.values.get(i))
                    .map(|v| v.chars().count())
                    .max()
                    .unwrap_or(0);
                widest_cell.max(header.chars().count()) + WIDTH_PADDING
            })
            .collect();

        Self {
            date_key: date_key.to_string(),
            columns,
            column_widths,
            rows,
            table: TableRegion {
                name: table_name(date_key),
                style: TABLE_STYLE.to_string(),
                highlight_fill: HIGHLIGHT_FILL.to_string(),
            },
        }
    }

    pub fn address_column(&self) -> Option<usize> {
        self.columns.iter().position(|c| c == "address")
    }

    pub fn organization_column(&self) -> Option<usize> {
        self.columns.iter().position(|c| c == "organization")
    }

    /// Fixed-width text rendering of the table. Highlighted rows carry a
    /// leading `*` marker.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("[{}] {}\n", self.date_key, self.table.name));

        out.push_str("  ");
        for (header, width) in self.columns.iter().zip(self.column_widths.iter().copied()) {
            out.push_str(&format!("{header:<width$}"));
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str(if row.highlighted { "* " } else { "  " });
            for (value, width) in row.values.iter().zip(self.column_widths.iter().copied()) {
                out.push_str(&format!("{value:<width$}"));
            }
            out.push('\n');
        }
        out
    }
}

/// The highlight predicate: case-sensitive substring containment of any
/// watch organization. Shared by section building and reverse extraction.
pub fn is_highlighted(organization: &str, watch_orgs: &[String]) -> bool {
    !organization.is_empty() && watch_orgs.iter().any(|org| organization.contains(org.as_str()))
}

/// Table region name for a section, unique per date key. Non-alphanumeric
/// separators are normalized so the name stays identifier-safe.
pub fn table_name(date_key: &str) -> String {
    let safe: String = date_key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("IPData_{safe}")
}

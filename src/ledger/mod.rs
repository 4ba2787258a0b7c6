//! The cumulative, date-sectioned ledger of observed addresses

mod document;
mod error;
mod extract;
mod store;

pub use document::{
    HIGHLIGHT_FILL, LedgerDocument, Row, Section, TABLE_STYLE, TableRegion, is_highlighted,
    table_name,
};
pub use error::{LedgerError, Result};
pub use extract::{Extraction, extract_highlighted, newest_dated_section, org_label, write_export};
pub use store::LedgerStore;

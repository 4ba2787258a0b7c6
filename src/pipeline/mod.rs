//! Sequential orchestration of the ingest and extraction workflows

mod capabilities;
mod error;
mod extract;
mod ingest;

pub use capabilities::{ArchiveSource, LocalArchiveSource, LoggingSubmissionSink, SubmissionSink};
pub use error::{PipelineError, Result};
pub use extract::{ExtractionOutcome, run_extraction};
pub use ingest::{IngestSummary, run_ingest};

//! Archive location, unpacking, and retention for daily export files

mod resolver;
mod unpack;

pub use resolver::ArchiveResolver;
pub use unpack::{PayloadSpec, unpack};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("no archive matching {pattern} or similar found in {dir}")]
    NoArchiveFound { dir: PathBuf, pattern: String },

    #[error("no payload file found in {archive} (tried payload extension, nested archive, keyword hints)")]
    PayloadNotFound { archive: PathBuf },

    #[error("invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

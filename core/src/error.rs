//! Error types for index builds.
//!
//! Failures are split by stage: reading the corpus ([`SourceError`]) and
//! writing or reading a persisted index ([`PersistError`]). [`IndexError`]
//! wraps both so the top of a build can report which stage failed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("source decode failed: {0}")]
    Source(#[from] SourceError),

    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),

    #[error("invalid docno {0:?}: expected at least 8 ASCII characters with letters or digits at the path positions")]
    InvalidDocNo(String),
}

/// Errors raised while reading documents from the corpus.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed document record: {0}")]
    Malformed(String),
}

/// Errors raised while persisting or loading an index.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encoding error: {0}")]
    Encode(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistError::Io { path: path.into(), source }
    }
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::Io { path: path.into(), source }
    }
}

//! Errors raised by the storage and configuration adapters
//!
//! The simulation itself never fails; only the collaborators that touch the
//! filesystem report errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported high score file version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;

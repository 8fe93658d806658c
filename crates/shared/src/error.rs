use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading coverage report files from disk.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read coverage report {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("coverage report {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("coverage report {path} is invalid: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

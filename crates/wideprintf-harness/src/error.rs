//! Harness error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: Box<HarnessError>,
    },
    #[error("unsupported function '{0}'")]
    UnsupportedFunction(String),
    #[error("invalid argument '{0}': expected kind:value")]
    InvalidArgument(String),
    #[error("no fixture JSON files found in {0}")]
    NoFixtures(PathBuf),
}

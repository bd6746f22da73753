use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a catalog backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("query execution failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("failed to read fixture '{path}': {source}")]
    FixtureIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid fixture '{path}': {source}")]
    FixtureFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("the memory backend requires database.fixture_path")]
    MissingFixture,
}

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query parameter 'q' is required")]
    EmptyQuery,

    #[error("cannot walk document root {}: {source}", .root.display())]
    WalkStart {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("search task failed: {0}")]
    Internal(String),
}

/// Raised while loading the catalog at startup. Always fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse links file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

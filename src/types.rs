// Core error types for sds-parser
use std::path::PathBuf;

// Error types
#[derive(Debug, thiserror::Error)]
pub enum SdsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("fetch of {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("{origin} is not a PDF document")]
    NotPdf { origin: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SdsError>;

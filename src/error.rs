use std::path::PathBuf;
use thiserror::Error;

/// The main error type for voc-tools operations.
///
/// Only structural failures end up here. A malformed annotation or caption
/// file is reported as an error record instead (see [`crate::record::Label`]).
#[derive(Debug, Error)]
pub enum VocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset path does not exist: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("Expected dataset directory is missing: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("Invalid dataset layout at {}: {message}", path.display())]
    Layout { path: PathBuf, message: String },

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to write CSV to {}: {source}", path.display())]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

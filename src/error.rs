// Error taxonomy for loading campaign data
//
// Only loading can fail. Filtering, aggregation, ranking and rendering are
// total over any input and never return an error.

use std::path::PathBuf;
use thiserror::Error;

/// The source collection could not be turned into campaign records.
/// Fatal for initialization: no view can be built without records.
#[derive(Debug, Error)]
pub enum DataFormatError {
    #[error("campaign data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("campaign data is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read campaign data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("campaign data must be an array of records")]
    NotAnArray,

    #[error("record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("record {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported data file {path} (expected .json or .csv)")]
    UnsupportedFormat { path: PathBuf },
}

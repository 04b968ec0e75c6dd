use std::path::PathBuf;
use thiserror::Error;

use crate::status::StatusCode;

/// The main error type for framecheck operations.
#[derive(Debug, Error)]
pub enum FramecheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse keypoints from {path}: {source}")]
    KeypointsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write keypoints to {path}: {source}")]
    KeypointsWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid keypoint JSON: {0}")]
    KeypointsJson(#[from] serde_json::Error),

    #[error("Invalid keypoint data in detection {detection}: {message}")]
    InvalidKeypoints { detection: usize, message: String },

    #[error("Image dimensions are required to normalize pixel keypoints")]
    MissingImageDimensions,

    #[error("Framing check failed with status {status}")]
    FramingRejected { status: StatusCode },

    #[error("Framing check failed for {rejected} of {total} image(s)")]
    BatchRejected { rejected: usize, total: usize },

    #[error("Failed to traverse {path}: {message}")]
    Traversal { path: PathBuf, message: String },

    #[error("Failed to write CSV report: {0}")]
    ReportCsv(#[from] csv::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

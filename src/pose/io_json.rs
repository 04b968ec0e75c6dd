//! Native JSON format for recorded detector output.
//!
//! The layout mirrors the tensors a pose detector hands back: per detection,
//! a list of 17 normalized `[x, y]` positions (`xyn`) and a parallel list of
//! 17 confidences (`conf`). Detectors that localize keypoints without scoring
//! them leave `conf` out or set it to `null`.
//!
//! ```json
//! {
//!   "detections": [
//!     { "xyn": [[0.51, 0.12], ...], "conf": [0.97, ...] }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::keypoint::KeypointSet;
use super::model::{DetectorOutput, PoseDetection};
use crate::error::FramecheckError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct JsonDetectorOutput {
    #[serde(default)]
    detections: Vec<JsonDetection>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonDetection {
    #[serde(default)]
    xyn: Vec<[f64; 2]>,

    #[serde(default)]
    conf: Option<Vec<f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
}

/// Reads detector output from a JSON file in the native format.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if a detection
/// with confidence data does not hold exactly 17 keypoints.
pub fn read_keypoints_json(path: &Path) -> Result<DetectorOutput, FramecheckError> {
    let file = File::open(path).map_err(FramecheckError::Io)?;
    let reader = BufReader::new(file);

    let raw: JsonDetectorOutput =
        serde_json::from_reader(reader).map_err(|source| FramecheckError::KeypointsParse {
            path: path.to_path_buf(),
            source,
        })?;
    json_to_output(raw)
}

/// Writes detector output to a JSON file in the native format.
pub fn write_keypoints_json(path: &Path, output: &DetectorOutput) -> Result<(), FramecheckError> {
    let file = File::create(path).map_err(FramecheckError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &output_to_json(output)).map_err(|source| {
        FramecheckError::KeypointsWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads detector output from a JSON string in the native format.
pub fn from_json_str(json: &str) -> Result<DetectorOutput, FramecheckError> {
    json_to_output(serde_json::from_str(json)?)
}

/// Reads detector output from JSON bytes in the native format.
///
/// Useful for fuzzing and for sidecars that are not known to be UTF-8.
pub fn from_json_slice(bytes: &[u8]) -> Result<DetectorOutput, FramecheckError> {
    json_to_output(serde_json::from_slice(bytes)?)
}

/// Writes detector output to a JSON string in the native format.
pub fn to_json_string(output: &DetectorOutput) -> Result<String, FramecheckError> {
    Ok(serde_json::to_string_pretty(&output_to_json(output))?)
}

fn json_to_output(raw: JsonDetectorOutput) -> Result<DetectorOutput, FramecheckError> {
    let mut detections = Vec::with_capacity(raw.detections.len());

    for (idx, det) in raw.detections.into_iter().enumerate() {
        // No confidence data means the positions are never consulted.
        let keypoints = match det.conf {
            Some(conf) => Some(KeypointSet::from_parts(&det.xyn, &conf).map_err(|message| {
                FramecheckError::InvalidKeypoints {
                    detection: idx,
                    message,
                }
            })?),
            None => None,
        };
        detections.push(PoseDetection {
            keypoints,
            score: det.score,
        });
    }

    Ok(DetectorOutput::new(detections))
}

fn output_to_json(output: &DetectorOutput) -> JsonDetectorOutput {
    let detections = output
        .detections
        .iter()
        .map(|det| match &det.keypoints {
            Some(set) => JsonDetection {
                xyn: set.as_slice().iter().map(|k| [k.x(), k.y()]).collect(),
                conf: Some(set.as_slice().iter().map(|k| k.confidence).collect()),
                score: det.score,
            },
            None => JsonDetection {
                xyn: Vec::new(),
                conf: None,
                score: det.score,
            },
        })
        .collect();

    JsonDetectorOutput { detections }
}

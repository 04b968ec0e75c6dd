//! COCO-style keypoint triplets in pixel space.
//!
//! Many detectors export person keypoints the way COCO results files do: one
//! flat list of `[x1, y1, c1, ..., x17, y17, c17]` per detection, with `x`
//! and `y` in pixels of the analysed image. The framing classifier works on
//! normalized coordinates, so this reader divides by the image size, taken
//! from the file when present and otherwise from the caller.
//!
//! ```json
//! {
//!   "width": 640,
//!   "height": 480,
//!   "detections": [
//!     { "keypoints": [320.0, 48.0, 0.97, ...], "score": 0.93 }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::coord::Coord;
use super::keypoint::{Keypoint, KeypointLabel, KeypointSet};
use super::model::{DetectorOutput, PoseDetection};
use super::space::Pixel;
use crate::error::FramecheckError;

/// Values per detection: (x, y, confidence) for each of the 17 keypoints.
const TRIPLET_LEN: usize = KeypointLabel::COUNT * 3;

#[derive(Debug, Deserialize)]
struct CocoKeypointFile {
    #[serde(default)]
    width: Option<u32>,

    #[serde(default)]
    height: Option<u32>,

    #[serde(default)]
    detections: Vec<CocoPose>,
}

#[derive(Debug, Deserialize)]
struct CocoPose {
    #[serde(default)]
    keypoints: Option<Vec<f64>>,

    #[serde(default)]
    score: Option<f64>,
}

/// Reads COCO-style keypoints from a file.
///
/// `image_dims` is used when the file does not record `width`/`height`.
pub fn read_coco_keypoints(
    path: &Path,
    image_dims: Option<(u32, u32)>,
) -> Result<DetectorOutput, FramecheckError> {
    let file = File::open(path).map_err(FramecheckError::Io)?;
    let reader = BufReader::new(file);

    let raw: CocoKeypointFile =
        serde_json::from_reader(reader).map_err(|source| FramecheckError::KeypointsParse {
            path: path.to_path_buf(),
            source,
        })?;
    coco_to_output(raw, image_dims)
}

/// Reads COCO-style keypoints from a JSON string.
pub fn from_coco_str(
    json: &str,
    image_dims: Option<(u32, u32)>,
) -> Result<DetectorOutput, FramecheckError> {
    coco_to_output(serde_json::from_str(json)?, image_dims)
}

/// Reads COCO-style keypoints from JSON bytes.
pub fn from_coco_slice(
    bytes: &[u8],
    image_dims: Option<(u32, u32)>,
) -> Result<DetectorOutput, FramecheckError> {
    coco_to_output(serde_json::from_slice(bytes)?, image_dims)
}

fn coco_to_output(
    raw: CocoKeypointFile,
    image_dims: Option<(u32, u32)>,
) -> Result<DetectorOutput, FramecheckError> {
    if raw.detections.is_empty() {
        return Ok(DetectorOutput::default());
    }

    let dims = match (raw.width, raw.height) {
        (Some(w), Some(h)) => Some((w, h)),
        _ => image_dims,
    };

    let mut detections = Vec::with_capacity(raw.detections.len());
    for (idx, pose) in raw.detections.into_iter().enumerate() {
        let keypoints = match pose.keypoints {
            Some(values) => {
                let (width, height) = dims.ok_or(FramecheckError::MissingImageDimensions)?;
                Some(triplets_to_set(&values, width, height).map_err(|message| {
                    FramecheckError::InvalidKeypoints {
                        detection: idx,
                        message,
                    }
                })?)
            }
            None => None,
        };
        detections.push(PoseDetection {
            keypoints,
            score: pose.score,
        });
    }

    Ok(DetectorOutput::new(detections))
}

/// Fuzz-only entrypoint for triplet normalization.
#[cfg(feature = "fuzzing")]
pub fn fuzz_triplets_to_set(values: &[f64], width: u32, height: u32) -> Result<(), FramecheckError> {
    triplets_to_set(values, width, height)
        .map(|_| ())
        .map_err(|message| FramecheckError::InvalidKeypoints {
            detection: 0,
            message,
        })
}

fn triplets_to_set(values: &[f64], width: u32, height: u32) -> Result<KeypointSet, String> {
    if values.len() != TRIPLET_LEN {
        return Err(format!(
            "expected {} keypoint values, found {}",
            TRIPLET_LEN,
            values.len()
        ));
    }
    if width == 0 || height == 0 {
        return Err(format!("invalid image dimensions {}x{}", width, height));
    }

    let mut set = KeypointSet::default();
    for (label, triplet) in KeypointLabel::ALL.into_iter().zip(values.chunks_exact(3)) {
        let position = Coord::<Pixel>::new(triplet[0], triplet[1]).to_normalized(width, height);
        set.set(
            label,
            Keypoint {
                position,
                confidence: triplet[2],
            },
        );
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triplets(nose: [f64; 3], ankles: [[f64; 3]; 2]) -> String {
        let mut values = vec![[0.0, 0.0, 0.1]; 17];
        values[0] = nose;
        values[15] = ankles[0];
        values[16] = ankles[1];
        values
            .iter()
            .flat_map(|t| t.iter().map(|v| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[test]
    fn test_normalizes_by_file_dimensions() {
        let kps = triplets([320.0, 48.0, 0.9], [[300.0, 432.0, 0.8], [340.0, 240.0, 0.2]]);
        let json = format!(
            r#"{{"width": 640, "height": 480, "detections": [{{"keypoints": [{kps}], "score": 0.93}}]}}"#
        );

        let output = from_coco_str(&json, None).unwrap();
        let set = output.primary().unwrap();
        assert_eq!(set.get(KeypointLabel::Nose).x(), 0.5);
        assert_eq!(set.get(KeypointLabel::Nose).y(), 0.1);
        assert_eq!(set.get(KeypointLabel::LeftAnkle).y(), 0.9);
        assert_eq!(set.get(KeypointLabel::RightAnkle).confidence, 0.2);
        assert_eq!(output.detections[0].score, Some(0.93));
    }

    #[test]
    fn test_falls_back_to_caller_dimensions() {
        let kps = triplets([50.0, 20.0, 0.9], [[50.0, 180.0, 0.9], [0.0, 0.0, 0.0]]);
        let json = format!(r#"{{"detections": [{{"keypoints": [{kps}]}}]}}"#);

        let output = from_coco_str(&json, Some((100, 200))).unwrap();
        let set = output.primary().unwrap();
        assert_eq!(set.get(KeypointLabel::Nose).y(), 0.1);
        assert_eq!(set.get(KeypointLabel::LeftAnkle).y(), 0.9);
    }

    #[test]
    fn test_missing_dimensions_is_an_error() {
        let kps = triplets([50.0, 20.0, 0.9], [[50.0, 180.0, 0.9], [0.0, 0.0, 0.0]]);
        let json = format!(r#"{{"detections": [{{"keypoints": [{kps}]}}]}}"#);
        assert!(matches!(
            from_coco_str(&json, None).unwrap_err(),
            FramecheckError::MissingImageDimensions
        ));
    }

    #[test]
    fn test_no_detections_needs_no_dimensions() {
        let output = from_coco_str(r#"{"detections": []}"#, None).unwrap();
        assert_eq!(output.primary(), None);
    }

    #[test]
    fn test_missing_keypoints_has_no_confidence() {
        let output = from_coco_str(r#"{"detections": [{"score": 0.4}]}"#, None).unwrap();
        assert_eq!(output.detections.len(), 1);
        assert_eq!(output.primary(), None);
    }

    #[test]
    fn test_wrong_value_count_is_rejected() {
        let json = r#"{"width": 10, "height": 10, "detections": [{"keypoints": [1.0, 2.0, 0.5]}]}"#;
        let err = from_coco_str(json, None).unwrap_err();
        assert!(err.to_string().contains("expected 51 keypoint values"));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let kps = triplets([50.0, 20.0, 0.9], [[50.0, 180.0, 0.9], [0.0, 0.0, 0.0]]);
        let json = format!(r#"{{"width": 0, "height": 200, "detections": [{{"keypoints": [{kps}]}}]}}"#);
        assert!(matches!(
            from_coco_slice(json.as_bytes(), None).unwrap_err(),
            FramecheckError::InvalidKeypoints { .. }
        ));
    }
}

//! Body keypoints in the 17-point COCO layout.

use std::fmt;

use serde::Serialize;

use super::coord::Coord;
use super::space::Normalized;

/// COCO body-part identifiers, in detector output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum KeypointLabel {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointLabel {
    /// Number of keypoints in a set.
    pub const COUNT: usize = 17;

    /// All labels in detector output order.
    pub const ALL: [KeypointLabel; Self::COUNT] = [
        KeypointLabel::Nose,
        KeypointLabel::LeftEye,
        KeypointLabel::RightEye,
        KeypointLabel::LeftEar,
        KeypointLabel::RightEar,
        KeypointLabel::LeftShoulder,
        KeypointLabel::RightShoulder,
        KeypointLabel::LeftElbow,
        KeypointLabel::RightElbow,
        KeypointLabel::LeftWrist,
        KeypointLabel::RightWrist,
        KeypointLabel::LeftHip,
        KeypointLabel::RightHip,
        KeypointLabel::LeftKnee,
        KeypointLabel::RightKnee,
        KeypointLabel::LeftAnkle,
        KeypointLabel::RightAnkle,
    ];

    /// Position of this label in the detector output.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The COCO name of this body part, e.g. `left_ankle`.
    pub fn name(self) -> &'static str {
        match self {
            KeypointLabel::Nose => "nose",
            KeypointLabel::LeftEye => "left_eye",
            KeypointLabel::RightEye => "right_eye",
            KeypointLabel::LeftEar => "left_ear",
            KeypointLabel::RightEar => "right_ear",
            KeypointLabel::LeftShoulder => "left_shoulder",
            KeypointLabel::RightShoulder => "right_shoulder",
            KeypointLabel::LeftElbow => "left_elbow",
            KeypointLabel::RightElbow => "right_elbow",
            KeypointLabel::LeftWrist => "left_wrist",
            KeypointLabel::RightWrist => "right_wrist",
            KeypointLabel::LeftHip => "left_hip",
            KeypointLabel::RightHip => "right_hip",
            KeypointLabel::LeftKnee => "left_knee",
            KeypointLabel::RightKnee => "right_knee",
            KeypointLabel::LeftAnkle => "left_ankle",
            KeypointLabel::RightAnkle => "right_ankle",
        }
    }
}

impl fmt::Display for KeypointLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single detected keypoint.
///
/// Construction is permissive: positions outside `[0, 1]` and confidences
/// outside `[0, 1]` are kept as reported so the classifier sees exactly what
/// the detector produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoint {
    /// Position as a fraction of image width/height.
    pub position: Coord<Normalized>,
    /// Detector certainty that the keypoint is correctly localized.
    pub confidence: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            position: Coord::new(x, y),
            confidence,
        }
    }

    /// Normalized x coordinate.
    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Normalized y coordinate.
    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Returns true if the confidence strictly exceeds `threshold`.
    #[inline]
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }
}

/// The full set of 17 keypoints for one detected subject.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeypointSet {
    keypoints: [Keypoint; KeypointLabel::COUNT],
}

impl KeypointSet {
    pub fn new(keypoints: [Keypoint; KeypointLabel::COUNT]) -> Self {
        Self { keypoints }
    }

    /// Builds a set from parallel position and confidence lists, as emitted
    /// by pose detectors.
    ///
    /// Fails with a description of the problem if either list does not hold
    /// exactly [`KeypointLabel::COUNT`] entries.
    pub fn from_parts(positions: &[[f64; 2]], confidences: &[f64]) -> Result<Self, String> {
        if positions.len() != KeypointLabel::COUNT {
            return Err(format!(
                "expected {} keypoint positions, found {}",
                KeypointLabel::COUNT,
                positions.len()
            ));
        }
        if confidences.len() != KeypointLabel::COUNT {
            return Err(format!(
                "expected {} keypoint confidences, found {}",
                KeypointLabel::COUNT,
                confidences.len()
            ));
        }

        let mut keypoints = [Keypoint::default(); KeypointLabel::COUNT];
        for (slot, ([x, y], conf)) in keypoints
            .iter_mut()
            .zip(positions.iter().zip(confidences.iter()))
        {
            *slot = Keypoint::new(*x, *y, *conf);
        }
        Ok(Self { keypoints })
    }

    /// Returns the keypoint for `label`.
    #[inline]
    pub fn get(&self, label: KeypointLabel) -> &Keypoint {
        &self.keypoints[label.index()]
    }

    /// Replaces the keypoint for `label`.
    pub fn set(&mut self, label: KeypointLabel, keypoint: Keypoint) {
        self.keypoints[label.index()] = keypoint;
    }

    /// Builder-style variant of [`KeypointSet::set`].
    pub fn with(mut self, label: KeypointLabel, keypoint: Keypoint) -> Self {
        self.set(label, keypoint);
        self
    }

    /// Iterates over `(label, keypoint)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (KeypointLabel, &Keypoint)> {
        KeypointLabel::ALL.into_iter().zip(self.keypoints.iter())
    }

    /// The keypoints in label order.
    pub fn as_slice(&self) -> &[Keypoint] {
        &self.keypoints
    }
}

//! Detector output as consumed by the framing classifier.

use super::keypoint::KeypointSet;

/// One subject found by the pose detector.
///
/// `keypoints` is `None` when the detector reported positions without any
/// confidence data; such a detection cannot be reasoned about and counts as
/// "no person detected".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseDetection {
    pub keypoints: Option<KeypointSet>,
    /// Optional whole-detection score reported by the detector.
    pub score: Option<f64>,
}

impl PoseDetection {
    pub fn new(keypoints: KeypointSet) -> Self {
        Self {
            keypoints: Some(keypoints),
            score: None,
        }
    }

    /// A detection whose confidence data is missing.
    pub fn without_confidence() -> Self {
        Self::default()
    }
}

/// Everything the detector reported for one image, in detector order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectorOutput {
    pub detections: Vec<PoseDetection>,
}

impl DetectorOutput {
    pub fn new(detections: Vec<PoseDetection>) -> Self {
        Self { detections }
    }

    /// The subject whose framing is checked: the first detection.
    ///
    /// Returns `None` if nothing was detected or the first detection carries
    /// no confidence data.
    pub fn primary(&self) -> Option<&KeypointSet> {
        self.detections.first()?.keypoints.as_ref()
    }

    /// Owned variant of [`DetectorOutput::primary`].
    pub fn into_primary(self) -> Option<KeypointSet> {
        self.detections.into_iter().next()?.keypoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_first_detection() {
        let first = KeypointSet::default();
        let mut second = KeypointSet::default();
        second.set(
            crate::pose::KeypointLabel::Nose,
            crate::pose::Keypoint::new(0.5, 0.5, 0.9),
        );
        let output = DetectorOutput::new(vec![
            PoseDetection::new(first.clone()),
            PoseDetection::new(second),
        ]);
        assert_eq!(output.primary(), Some(&first));
        assert_eq!(output.into_primary(), Some(first));
    }

    #[test]
    fn test_primary_absent_without_confidence_or_detections() {
        assert_eq!(DetectorOutput::default().primary(), None);

        let output = DetectorOutput::new(vec![
            PoseDetection::without_confidence(),
            PoseDetection::new(KeypointSet::default()),
        ]);
        assert_eq!(output.primary(), None);
    }
}

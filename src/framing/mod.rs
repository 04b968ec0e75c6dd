//! Full-body framing classification.
//!
//! Given the keypoints of one photographed subject, decide whether the photo
//! shows the whole body at a usable distance, or name the single most
//! important framing defect. The checks form an ordered decision list; the
//! first one that fails determines the status:
//!
//! 1. a subject was detected at all
//! 2. the nose is confidently localized
//! 3. at least one ankle is confidently localized
//! 4. the nose is not above the top margin
//! 5. the lowest visible ankle is not below the bottom margin
//! 6. the nose-to-ankle span covers enough of the frame height
//!
//! Positions are only trusted once their keypoint clears
//! [`CONFIDENCE_THRESHOLD`], so noisy localizations never produce a geometric
//! defect.

mod report;

pub use report::{FramingReport, KeyConfidences};

use crate::pose::{KeypointLabel, KeypointSet};
use crate::status::FramingStatus;

/// A keypoint counts as visible when its confidence is strictly above this.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// The nose must not be above this normalized y.
pub const TOP_MARGIN: f64 = 0.05;

/// The lowest visible ankle must not be below this normalized y.
pub const BOTTOM_MARGIN: f64 = 0.95;

/// Minimum normalized vertical span between nose and lowest visible ankle.
pub const MIN_HEIGHT_RATIO: f64 = 0.35;

/// Classifies the framing of a subject.
///
/// `None` means the keypoint provider detected nobody. The function is total
/// and pure: every input maps to exactly one status.
///
/// # Example
///
/// ```
/// use framecheck::framing::classify;
/// use framecheck::pose::{Keypoint, KeypointLabel, KeypointSet};
/// use framecheck::status::FramingStatus;
///
/// let subject = KeypointSet::default()
///     .with(KeypointLabel::Nose, Keypoint::new(0.5, 0.10, 0.9))
///     .with(KeypointLabel::LeftAnkle, Keypoint::new(0.5, 0.30, 0.9));
///
/// assert_eq!(classify(Some(&subject)), FramingStatus::TooFar);
/// assert_eq!(classify(None), FramingStatus::NoPersonDetected);
/// ```
pub fn classify(keypoints: Option<&KeypointSet>) -> FramingStatus {
    assess(keypoints).status
}

/// Classifies the framing of a subject and reports the measurements used.
///
/// The returned status is always the one [`classify`] gives for the same
/// input.
pub fn assess(keypoints: Option<&KeypointSet>) -> FramingReport {
    let Some(set) = keypoints else {
        return FramingReport::new(FramingStatus::NoPersonDetected);
    };

    let nose = set.get(KeypointLabel::Nose);
    let left_ankle = set.get(KeypointLabel::LeftAnkle);
    let right_ankle = set.get(KeypointLabel::RightAnkle);

    log::debug!(
        "keypoint confidences: nose {:.2}, left ankle {:.2}, right ankle {:.2}",
        nose.confidence,
        left_ankle.confidence,
        right_ankle.confidence
    );

    let mut report = FramingReport::new(FramingStatus::Ok);
    report.confidences = Some(KeyConfidences {
        nose: nose.confidence,
        left_ankle: left_ankle.confidence,
        right_ankle: right_ankle.confidence,
    });
    report.out_of_frame = set
        .iter()
        .filter(|(_, kp)| kp.is_confident(CONFIDENCE_THRESHOLD) && !kp.position.is_in_frame())
        .map(|(label, _)| label)
        .collect();

    if !nose.is_confident(CONFIDENCE_THRESHOLD) {
        report.status = FramingStatus::HeadNotVisible;
        return report;
    }

    let visible_ankles: Vec<f64> = [left_ankle, right_ankle]
        .into_iter()
        .filter(|ankle| ankle.is_confident(CONFIDENCE_THRESHOLD))
        .map(|ankle| ankle.y())
        .collect();
    if visible_ankles.is_empty() {
        report.status = FramingStatus::TooCloseShowFeet;
        return report;
    }

    let nose_y = nose.y();
    report.nose_y = Some(nose_y);
    if nose_y < TOP_MARGIN {
        report.status = FramingStatus::TooCloseHeadCut;
        return report;
    }

    let max_ankle_y = visible_ankles
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);
    report.max_ankle_y = Some(max_ankle_y);
    if max_ankle_y > BOTTOM_MARGIN {
        report.status = FramingStatus::TooCloseFeetCut;
        return report;
    }

    let height_ratio = max_ankle_y - nose_y;
    report.height_ratio = Some(height_ratio);
    if height_ratio < MIN_HEIGHT_RATIO {
        report.status = FramingStatus::TooFar;
    }

    report
}

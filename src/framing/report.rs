//! Framing report types for structured diagnostics.
//!
//! A [`FramingReport`] records the status the classifier reached together with
//! the measurements it looked at on the way, so a rejected photo can be
//! explained to a user or inspected programmatically.

use std::fmt;

use serde::Serialize;

use super::{BOTTOM_MARGIN, CONFIDENCE_THRESHOLD, MIN_HEIGHT_RATIO, TOP_MARGIN};
use crate::pose::KeypointLabel;
use crate::status::{FramingStatus, StatusCode};

/// The result of assessing one subject's framing.
///
/// Measurements are only filled in once the decision list reached the step
/// that needs them: a subject rejected for an invisible head has confidences
/// but no `height_ratio`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FramingReport {
    /// The classification outcome.
    pub status: FramingStatus,

    /// Confidences of the three keypoints the classifier consults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidences: Option<KeyConfidences>,

    /// Confidently detected keypoints that lie outside the image.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub out_of_frame: Vec<KeypointLabel>,

    /// Normalized y of the nose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nose_y: Option<f64>,

    /// Normalized y of the lowest confidently detected ankle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ankle_y: Option<f64>,

    /// Vertical nose-to-ankle span as a fraction of image height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_ratio: Option<f64>,
}

impl FramingReport {
    /// Creates a report with only a status.
    pub fn new(status: FramingStatus) -> Self {
        Self {
            status,
            confidences: None,
            out_of_frame: Vec::new(),
            nose_y: None,
            max_ankle_y: None,
            height_ratio: None,
        }
    }
}

impl fmt::Display for FramingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framing: {}", self.status)?;
        writeln!(f, "  {}", StatusCode::from(self.status).guidance())?;

        if let Some(conf) = &self.confidences {
            writeln!(f)?;
            writeln!(
                f,
                "  nose confidence:        {:.2} (threshold > {})",
                conf.nose, CONFIDENCE_THRESHOLD
            )?;
            writeln!(f, "  left ankle confidence:  {:.2}", conf.left_ankle)?;
            writeln!(f, "  right ankle confidence: {:.2}", conf.right_ankle)?;
        }
        if !self.out_of_frame.is_empty() {
            let labels: Vec<String> = self.out_of_frame.iter().map(ToString::to_string).collect();
            writeln!(f, "  outside the frame:      {}", labels.join(", "))?;
        }
        if let Some(nose_y) = self.nose_y {
            writeln!(f, "  nose y:                 {:.3} (min {})", nose_y, TOP_MARGIN)?;
        }
        if let Some(max_ankle_y) = self.max_ankle_y {
            writeln!(
                f,
                "  lowest ankle y:         {:.3} (max {})",
                max_ankle_y, BOTTOM_MARGIN
            )?;
        }
        if let Some(ratio) = self.height_ratio {
            writeln!(
                f,
                "  height ratio:           {:.3} (min {})",
                ratio, MIN_HEIGHT_RATIO
            )?;
        }

        Ok(())
    }
}

/// Confidences for the nose and both ankles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KeyConfidences {
    pub nose: f64,
    pub left_ankle: f64,
    pub right_ankle: f64,
}

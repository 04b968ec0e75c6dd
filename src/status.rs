//! Status codes reported to callers.
//!
//! [`FramingStatus`] is the closed set of outcomes the framing classifier can
//! produce. [`StatusCode`] adds the upstream codes raised before the
//! classifier is reached (provider unavailable, undecodable image, unexpected
//! failure). Both serialize to the exact literal strings existing callers
//! match on, e.g. `"TOO_CLOSE_FEET_CUT"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The outcome of classifying one subject's framing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FramingStatus {
    /// Full body visible, inside the margins, tall enough in frame.
    Ok,
    /// The keypoint provider found nobody.
    NoPersonDetected,
    /// The nose keypoint is not confidently localized.
    HeadNotVisible,
    /// Neither ankle is confidently localized.
    TooCloseShowFeet,
    /// The nose sits above the top margin.
    TooCloseHeadCut,
    /// The lowest visible ankle sits below the bottom margin.
    TooCloseFeetCut,
    /// The nose-to-ankle span is too small a share of the frame height.
    TooFar,
}

impl FramingStatus {
    /// All classifier outcomes, in decision-list order.
    pub const ALL: [FramingStatus; 7] = [
        FramingStatus::NoPersonDetected,
        FramingStatus::HeadNotVisible,
        FramingStatus::TooCloseShowFeet,
        FramingStatus::TooCloseHeadCut,
        FramingStatus::TooCloseFeetCut,
        FramingStatus::TooFar,
        FramingStatus::Ok,
    ];

    /// Returns the wire literal for this status.
    pub fn as_str(self) -> &'static str {
        StatusCode::from(self).as_str()
    }
}

impl fmt::Display for FramingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every status a framing check can report, including upstream failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    NoPersonDetected,
    HeadNotVisible,
    TooCloseShowFeet,
    TooCloseHeadCut,
    TooCloseFeetCut,
    TooFar,
    /// The keypoint provider could not be initialized.
    ErrorModelNotLoaded,
    /// The image bytes could not be decoded.
    ErrorDecoding,
    /// Any other failure, caught at the service boundary.
    Error,
}

impl StatusCode {
    /// All status codes, classifier outcomes first.
    pub const ALL: [StatusCode; 10] = [
        StatusCode::Ok,
        StatusCode::NoPersonDetected,
        StatusCode::HeadNotVisible,
        StatusCode::TooCloseShowFeet,
        StatusCode::TooCloseHeadCut,
        StatusCode::TooCloseFeetCut,
        StatusCode::TooFar,
        StatusCode::ErrorModelNotLoaded,
        StatusCode::ErrorDecoding,
        StatusCode::Error,
    ];

    /// Returns the wire literal for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NoPersonDetected => "NO_PERSON_DETECTED",
            StatusCode::HeadNotVisible => "HEAD_NOT_VISIBLE",
            StatusCode::TooCloseShowFeet => "TOO_CLOSE_SHOW_FEET",
            StatusCode::TooCloseHeadCut => "TOO_CLOSE_HEAD_CUT",
            StatusCode::TooCloseFeetCut => "TOO_CLOSE_FEET_CUT",
            StatusCode::TooFar => "TOO_FAR",
            StatusCode::ErrorModelNotLoaded => "ERROR_MODEL_NOT_LOADED",
            StatusCode::ErrorDecoding => "ERROR_DECODING",
            StatusCode::Error => "ERROR",
        }
    }

    /// A short instruction for the person being photographed.
    pub fn guidance(self) -> &'static str {
        match self {
            StatusCode::Ok => "Perfect! Hold still.",
            StatusCode::TooCloseShowFeet | StatusCode::TooCloseFeetCut => {
                "Too Close! Step back to show your feet."
            }
            StatusCode::TooCloseHeadCut => "Too Close! Step back to show your head.",
            StatusCode::HeadNotVisible => "Face not visible. Please look at the camera.",
            StatusCode::TooFar => "Too Far! Step a bit closer.",
            StatusCode::NoPersonDetected => "No person detected. Stand in frame.",
            StatusCode::ErrorModelNotLoaded | StatusCode::ErrorDecoding | StatusCode::Error => {
                "Position yourself clearly in frame."
            }
        }
    }

    /// Returns true for the codes raised before classification.
    pub fn is_upstream_error(self) -> bool {
        matches!(
            self,
            StatusCode::ErrorModelNotLoaded | StatusCode::ErrorDecoding | StatusCode::Error
        )
    }

    /// Returns true if the photo is framed correctly.
    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }
}

impl From<FramingStatus> for StatusCode {
    fn from(status: FramingStatus) -> Self {
        match status {
            FramingStatus::Ok => StatusCode::Ok,
            FramingStatus::NoPersonDetected => StatusCode::NoPersonDetected,
            FramingStatus::HeadNotVisible => StatusCode::HeadNotVisible,
            FramingStatus::TooCloseShowFeet => StatusCode::TooCloseShowFeet,
            FramingStatus::TooCloseHeadCut => StatusCode::TooCloseHeadCut,
            FramingStatus::TooCloseFeetCut => StatusCode::TooCloseFeetCut,
            FramingStatus::TooFar => StatusCode::TooFar,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known status literals.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown status code '{0}'")]
pub struct UnknownStatusCode(pub String);

impl FromStr for StatusCode {
    type Err = UnknownStatusCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatusCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownStatusCode(s.to_string()))
    }
}

/// The response object returned to callers: `{"status": "<CODE>"}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: StatusCode,
}

impl StatusResponse {
    pub fn new(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

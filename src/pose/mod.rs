//! Pose keypoint data model and detector output readers.
//!
//! A pose detector turns an image into zero or more [`PoseDetection`]s, each
//! carrying a [`KeypointSet`] of 17 COCO body keypoints. This module holds
//! those types and the readers for recorded detector output; it does not run
//! a detector.
//!
//! # Design Principles
//!
//! 1. **Fixed layout**: a [`KeypointSet`] always holds exactly 17 keypoints
//!    in [`KeypointLabel`] order. "Nobody detected" is `Option::None`, never
//!    a set of zeros.
//!
//! 2. **Typed spaces**: pixel positions must be converted through
//!    [`Coord::to_normalized`] before they can become a [`Keypoint`].
//!
//! 3. **Permissive construction**: confidences and positions are kept as
//!    reported, out-of-range or not.
//!
//! # Example
//!
//! ```
//! use framecheck::pose::{Keypoint, KeypointLabel, KeypointSet};
//!
//! let subject = KeypointSet::default()
//!     .with(KeypointLabel::Nose, Keypoint::new(0.5, 0.1, 0.95))
//!     .with(KeypointLabel::LeftAnkle, Keypoint::new(0.45, 0.9, 0.9));
//!
//! assert_eq!(subject.get(KeypointLabel::Nose).confidence, 0.95);
//! ```

mod coord;
pub mod io_coco_json;
pub mod io_json;
mod keypoint;
mod model;
mod space;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use coord::Coord;
pub use keypoint::{Keypoint, KeypointLabel, KeypointSet};
pub use model::{DetectorOutput, PoseDetection};
pub use space::{Normalized, Pixel};

use crate::error::FramecheckError;

/// On-disk layouts for recorded detector output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeypointFormat {
    /// Normalized `xyn`/`conf` lists ([`io_json`]).
    #[default]
    Json,
    /// Pixel-space `[x, y, c]` triplets ([`io_coco_json`]).
    Coco,
}

impl KeypointFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            KeypointFormat::Json => "json",
            KeypointFormat::Coco => "coco",
        }
    }

    /// Reads detector output in this format.
    ///
    /// `image_dims` is only consulted by formats that store pixel positions.
    pub fn read(
        self,
        path: &Path,
        image_dims: Option<(u32, u32)>,
    ) -> Result<DetectorOutput, FramecheckError> {
        match self {
            KeypointFormat::Json => io_json::read_keypoints_json(path),
            KeypointFormat::Coco => io_coco_json::read_coco_keypoints(path, image_dims),
        }
    }

    /// Parses detector output in this format from bytes.
    pub fn parse_slice(
        self,
        bytes: &[u8],
        image_dims: Option<(u32, u32)>,
    ) -> Result<DetectorOutput, FramecheckError> {
        match self {
            KeypointFormat::Json => io_json::from_json_slice(bytes),
            KeypointFormat::Coco => io_coco_json::from_coco_slice(bytes, image_dims),
        }
    }
}

impl fmt::Display for KeypointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeypointFormat {
    type Err = FramecheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" | "keypoints-json" => Ok(KeypointFormat::Json),
            "coco" | "coco-json" => Ok(KeypointFormat::Coco),
            other => Err(FramecheckError::UnsupportedFormat(format!(
                "'{}' (supported: json, coco)",
                other
            ))),
        }
    }
}

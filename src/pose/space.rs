//! Coordinate space marker types.
//!
//! Detectors report keypoints either in pixels of the analysed image or as
//! fractions of its size. These zero-sized markers keep the two apart at
//! compile time; the framing classifier only accepts normalized positions.

use std::fmt;

/// Marker type for pixel coordinates of the analysed image.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for normalized coordinates (0.0 to 1.0, origin top-left,
/// y growing downward).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

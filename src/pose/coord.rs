//! Typed keypoint positions using PhantomData for compile-time safety.

use std::marker::PhantomData;

use super::space::{Normalized, Pixel};

/// A 2D position with a type-level marker for the coordinate space.
///
/// The `TSpace` parameter is either [`Pixel`] or [`Normalized`], so a pixel
/// position can never reach the classifier without being normalized first.
#[derive(Clone, Copy, PartialEq)]
pub struct Coord<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Coord<TSpace> {
    /// Creates a new coordinate with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }
}

impl Coord<Pixel> {
    /// Converts a pixel position to a fraction of the image size.
    #[inline]
    pub fn to_normalized(self, width: u32, height: u32) -> Coord<Normalized> {
        Coord::new(self.x / width as f64, self.y / height as f64)
    }
}

impl Coord<Normalized> {
    /// Returns true if the position lies inside the image (inclusive).
    #[inline]
    pub fn is_in_frame(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

impl<TSpace> std::fmt::Debug for Coord<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coord")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<TSpace> Default for Coord<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_normalized() {
        let px: Coord<Pixel> = Coord::new(320.0, 120.0);
        let norm = px.to_normalized(640, 480);
        assert_eq!(norm.x, 0.5);
        assert_eq!(norm.y, 0.25);
        assert!(norm.is_in_frame());
    }

    #[test]
    fn test_is_in_frame_bounds() {
        assert!(Coord::<Normalized>::new(0.0, 1.0).is_in_frame());
        assert!(!Coord::<Normalized>::new(-0.01, 0.5).is_in_frame());
        assert!(!Coord::<Normalized>::new(0.5, 1.2).is_in_frame());
    }
}

//! Keypoint providers: where keypoint sets come from.
//!
//! A [`KeypointProvider`] turns image bytes into a [`Detection`]. Turning
//! pixels into keypoints is the job of a pose model that lives outside this
//! crate; the providers here either replay recorded model output
//! ([`SidecarProvider`]) or stand in for a model that failed to load
//! ([`UnavailableProvider`]).
//!
//! Providers report failures as values, never by panicking: the framing
//! classifier only ever sees [`Detection::Detected`] or
//! [`Detection::NoDetection`], and the service layer maps
//! [`Detection::ProviderFailure`] to an upstream status code.

mod decode;
mod sidecar;

pub use decode::{decode_dimensions, ImageDims};
pub use sidecar::SidecarProvider;

use std::path::Path;

use thiserror::Error;

use crate::pose::{DetectorOutput, KeypointSet};

/// An image handed to a provider.
#[derive(Clone, Copy, Debug)]
pub struct ImageInput<'a> {
    /// Raw, still-encoded image bytes.
    pub bytes: &'a [u8],
    /// Where the bytes were read from, if anywhere.
    pub path: Option<&'a Path>,
}

impl<'a> ImageInput<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self { bytes, path: None }
    }

    pub fn from_file(path: &'a Path, bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            path: Some(path),
        }
    }

    /// A printable name for log messages.
    pub fn display_name(&self) -> String {
        match self.path {
            Some(path) => path.display().to_string(),
            None => format!("<{} bytes>", self.bytes.len()),
        }
    }
}

/// What a provider found in one image.
#[derive(Clone, Debug, PartialEq)]
pub enum Detection {
    /// A subject with a full keypoint set.
    Detected(KeypointSet),
    /// Nobody was found, or the first subject carried no confidence data.
    NoDetection,
    /// The provider could not produce an answer.
    ProviderFailure(ProviderFailure),
}

impl Detection {
    /// Picks the subject to check from recorded detector output.
    pub fn from_output(output: DetectorOutput) -> Self {
        match output.into_primary() {
            Some(set) => Detection::Detected(set),
            None => Detection::NoDetection,
        }
    }

    /// The keypoint set the classifier should see, or the failure that
    /// prevents classification.
    pub fn into_keypoints(self) -> Result<Option<KeypointSet>, ProviderFailure> {
        match self {
            Detection::Detected(set) => Ok(Some(set)),
            Detection::NoDetection => Ok(None),
            Detection::ProviderFailure(failure) => Err(failure),
        }
    }
}

/// Why a provider could not produce a detection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    /// The provider never became ready (e.g. its model failed to load).
    #[error("keypoint provider not loaded: {0}")]
    ModelNotLoaded(String),

    /// The image bytes are not a decodable raster image.
    #[error("could not decode image: {0}")]
    Decoding(String),

    /// Anything else that went wrong inside the provider.
    #[error("keypoint provider failed: {0}")]
    Internal(String),
}

/// A source of keypoint sets for images.
///
/// Implementations must be shareable across threads; each call is
/// independent of every other.
pub trait KeypointProvider: Send + Sync {
    /// Detects the subject in `image`.
    fn detect(&self, image: &ImageInput<'_>) -> Detection;
}

impl<P: KeypointProvider + ?Sized> KeypointProvider for Box<P> {
    fn detect(&self, image: &ImageInput<'_>) -> Detection {
        (**self).detect(image)
    }
}

impl<P: KeypointProvider + ?Sized> KeypointProvider for &P {
    fn detect(&self, image: &ImageInput<'_>) -> Detection {
        (**self).detect(image)
    }
}

/// A provider whose initialization failed.
///
/// Every call answers [`ProviderFailure::ModelNotLoaded`] with the reason
/// given at construction.
#[derive(Clone, Debug)]
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl KeypointProvider for UnavailableProvider {
    fn detect(&self, _image: &ImageInput<'_>) -> Detection {
        Detection::ProviderFailure(ProviderFailure::ModelNotLoaded(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::PoseDetection;

    #[test]
    fn test_unavailable_provider_always_fails() {
        let provider = UnavailableProvider::new("weights missing");
        let detection = provider.detect(&ImageInput::from_bytes(b"anything"));
        assert_eq!(
            detection,
            Detection::ProviderFailure(ProviderFailure::ModelNotLoaded(
                "weights missing".into()
            ))
        );
    }

    #[test]
    fn test_from_output_uses_primary_subject() {
        assert_eq!(
            Detection::from_output(DetectorOutput::default()),
            Detection::NoDetection
        );
        assert_eq!(
            Detection::from_output(DetectorOutput::new(vec![PoseDetection::without_confidence()])),
            Detection::NoDetection
        );

        let set = KeypointSet::default();
        assert_eq!(
            Detection::from_output(DetectorOutput::new(vec![PoseDetection::new(set.clone())])),
            Detection::Detected(set)
        );
    }

    #[test]
    fn test_into_keypoints() {
        assert_eq!(Detection::NoDetection.into_keypoints(), Ok(None));
        let failure = ProviderFailure::Decoding("bad header".into());
        assert_eq!(
            Detection::ProviderFailure(failure.clone()).into_keypoints(),
            Err(failure)
        );
    }

    #[test]
    fn test_boxed_provider_delegates() {
        let provider: Box<dyn KeypointProvider> = Box::new(UnavailableProvider::new("x"));
        assert!(matches!(
            provider.detect(&ImageInput::from_bytes(&[])),
            Detection::ProviderFailure(ProviderFailure::ModelNotLoaded(_))
        ));
    }
}

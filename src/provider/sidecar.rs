//! Replays detector output recorded next to each image.
//!
//! A pose model run offline (or on another machine) writes its output for
//! `photo.jpg` to `photo.jpg.keypoints.json`. The sidecar provider decodes the
//! image header, finds that file, and hands the first subject to the
//! classifier.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::decode::decode_dimensions;
use super::{Detection, ImageInput, KeypointProvider, ProviderFailure};
use crate::config::ProviderConfig;

/// A [`KeypointProvider`] backed by recorded detector output files.
#[derive(Clone, Debug)]
pub struct SidecarProvider {
    config: ProviderConfig,
}

impl SidecarProvider {
    /// Opens a sidecar provider.
    ///
    /// # Errors
    /// Fails with [`ProviderFailure::ModelNotLoaded`] if a keypoints directory
    /// is configured but does not exist.
    pub fn open(config: ProviderConfig) -> Result<Self, ProviderFailure> {
        if let Some(dir) = &config.keypoints_dir {
            if !dir.is_dir() {
                return Err(ProviderFailure::ModelNotLoaded(format!(
                    "keypoints directory {} does not exist",
                    dir.display()
                )));
            }
        }
        if config.sidecar_suffix.is_empty() {
            return Err(ProviderFailure::ModelNotLoaded(
                "sidecar suffix must not be empty".into(),
            ));
        }
        Ok(Self { config })
    }

    /// Where the recorded output for `image_path` is expected.
    pub fn sidecar_path(&self, image_path: &Path) -> PathBuf {
        let mut name = match image_path.file_name() {
            Some(name) => name.to_os_string(),
            None => OsString::new(),
        };
        name.push(&self.config.sidecar_suffix);

        match &self.config.keypoints_dir {
            Some(dir) => dir.join(name),
            None => image_path.with_file_name(name),
        }
    }
}

impl KeypointProvider for SidecarProvider {
    fn detect(&self, image: &ImageInput<'_>) -> Detection {
        let dims = match decode_dimensions(image.bytes) {
            Ok(dims) => dims,
            Err(failure) => return Detection::ProviderFailure(failure),
        };

        let Some(image_path) = image.path else {
            return Detection::ProviderFailure(ProviderFailure::Internal(
                "recorded keypoints can only be looked up for images read from a file".into(),
            ));
        };

        let sidecar = self.sidecar_path(image_path);
        if !sidecar.is_file() {
            return Detection::ProviderFailure(ProviderFailure::Internal(format!(
                "no recorded keypoints at {}",
                sidecar.display()
            )));
        }

        match self.config.format.read(&sidecar, Some(dims.as_tuple())) {
            Ok(output) => {
                log::debug!(
                    "{}: {} detection(s) in {}",
                    image.display_name(),
                    output.detections.len(),
                    sidecar.display()
                );
                Detection::from_output(output)
            }
            Err(err) => Detection::ProviderFailure(ProviderFailure::Internal(err.to_string())),
        }
    }
}

//! Provider configuration.
//!
//! The CLI fills these fields from flags, falling back to the
//! `FRAMECHECK_*` environment variables and then to the defaults below.

use std::path::PathBuf;

use crate::pose::KeypointFormat;

/// Suffix appended to an image file name to find its recorded keypoints.
pub const DEFAULT_SIDECAR_SUFFIX: &str = ".keypoints.json";

/// Environment variable naming the directory that holds keypoint sidecars.
pub const ENV_KEYPOINTS_DIR: &str = "FRAMECHECK_KEYPOINTS_DIR";

/// Environment variable overriding [`DEFAULT_SIDECAR_SUFFIX`].
pub const ENV_SIDECAR_SUFFIX: &str = "FRAMECHECK_SIDECAR_SUFFIX";

/// Environment variable selecting the sidecar format.
pub const ENV_FORMAT: &str = "FRAMECHECK_FORMAT";

/// Where and how recorded keypoints are read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Directory holding the sidecars. `None` looks next to each image.
    pub keypoints_dir: Option<PathBuf>,
    /// Appended to the image file name, e.g. `photo.jpg.keypoints.json`.
    pub sidecar_suffix: String,
    /// Layout of the sidecar files.
    pub format: KeypointFormat,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            keypoints_dir: None,
            sidecar_suffix: DEFAULT_SIDECAR_SUFFIX.to_string(),
            format: KeypointFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.keypoints_dir, None);
        assert_eq!(config.sidecar_suffix, ".keypoints.json");
        assert_eq!(config.format, KeypointFormat::Json);
    }
}

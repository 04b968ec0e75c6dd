//! The framing check boundary.
//!
//! [`FramingService`] owns the keypoint provider for the lifetime of the
//! process and turns every request into exactly one [`StatusCode`]. Provider
//! failures become the upstream codes; a panic anywhere below this layer is
//! caught, logged and reported as [`StatusCode::Error`].

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::config::ProviderConfig;
use crate::framing::{self, FramingReport};
use crate::provider::{
    ImageInput, KeypointProvider, ProviderFailure, SidecarProvider, UnavailableProvider,
};
use crate::status::StatusCode;

/// The full result of checking one image.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    /// The status reported to the caller.
    pub status: StatusCode,
    /// The classifier's report, when classification ran.
    pub report: Option<FramingReport>,
    /// The provider failure, when classification could not run.
    pub failure: Option<ProviderFailure>,
}

impl CheckOutcome {
    fn classified(report: FramingReport) -> Self {
        Self {
            status: report.status.into(),
            report: Some(report),
            failure: None,
        }
    }

    fn failed(failure: ProviderFailure) -> Self {
        let status = match &failure {
            ProviderFailure::ModelNotLoaded(_) => StatusCode::ErrorModelNotLoaded,
            ProviderFailure::Decoding(_) => StatusCode::ErrorDecoding,
            ProviderFailure::Internal(_) => StatusCode::Error,
        };
        Self {
            status,
            report: None,
            failure: Some(failure),
        }
    }
}

/// Checks photo framing using one long-lived keypoint provider.
#[derive(Debug)]
pub struct FramingService<P> {
    provider: P,
}

impl FramingService<Box<dyn KeypointProvider>> {
    /// Builds a service around a [`SidecarProvider`].
    ///
    /// If the provider cannot be opened the service still starts, holding an
    /// [`UnavailableProvider`], and every check reports
    /// [`StatusCode::ErrorModelNotLoaded`].
    pub fn from_config(config: ProviderConfig) -> Self {
        let provider: Box<dyn KeypointProvider> = match SidecarProvider::open(config) {
            Ok(provider) => Box::new(provider),
            Err(failure) => {
                log::warn!("keypoint provider unavailable: {failure}");
                Box::new(UnavailableProvider::new(failure.to_string()))
            }
        };
        Self { provider }
    }
}

impl<P: KeypointProvider> FramingService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Checks one image and returns its status.
    pub fn check(&self, image: &ImageInput<'_>) -> StatusCode {
        self.assess(image).status
    }

    /// Checks one image and returns the status with its diagnostics.
    pub fn assess(&self, image: &ImageInput<'_>) -> CheckOutcome {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            match self.provider.detect(image).into_keypoints() {
                Ok(keypoints) => CheckOutcome::classified(framing::assess(keypoints.as_ref())),
                Err(failure) => CheckOutcome::failed(failure),
            }
        }));

        let outcome = result.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            log::error!("{}: framing check panicked: {}", image.display_name(), message);
            CheckOutcome::failed(ProviderFailure::Internal(message))
        });

        match &outcome.failure {
            Some(failure) => log::warn!("{}: {}", image.display_name(), failure),
            None => log::debug!("{}: {}", image.display_name(), outcome.status),
        }
        outcome
    }

    /// Reads an image file and checks it.
    ///
    /// An unreadable file is reported as [`StatusCode::Error`].
    pub fn assess_file(&self, path: &Path) -> CheckOutcome {
        match std::fs::read(path) {
            Ok(bytes) => self.assess(&ImageInput::from_file(path, &bytes)),
            Err(err) => {
                log::warn!("{}: {}", path.display(), err);
                CheckOutcome::failed(ProviderFailure::Internal(err.to_string()))
            }
        }
    }

    /// Reads an image file and returns its status.
    pub fn check_file(&self, path: &Path) -> StatusCode {
        self.assess_file(path).status
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

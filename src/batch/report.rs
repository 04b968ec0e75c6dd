//! Batch report types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::FramecheckError;
use crate::status::StatusCode;

/// The status of every image under a directory.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    /// Number of images per status, for every status that occurred.
    pub summary: BTreeMap<StatusCode, usize>,

    /// One entry per image, sorted by path.
    pub entries: Vec<BatchEntry>,
}

/// The status of one image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub status: StatusCode,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the status of one image.
    pub fn add(&mut self, path: PathBuf, status: StatusCode) {
        *self.summary.entry(status).or_default() += 1;
        self.entries.push(BatchEntry { path, status });
    }

    /// Total number of images checked.
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Number of images with the given status.
    pub fn count(&self, status: StatusCode) -> usize {
        self.summary.get(&status).copied().unwrap_or(0)
    }

    /// Number of correctly framed images.
    pub fn ok_count(&self) -> usize {
        self.count(StatusCode::Ok)
    }

    /// Number of images with any status other than `OK`.
    pub fn rejected_count(&self) -> usize {
        self.total() - self.ok_count()
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, FramecheckError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the entries as `path,status` CSV rows.
    pub fn to_csv_string(&self) -> Result<String, FramecheckError> {
        let mut csv_writer = csv::Writer::from_writer(Vec::new());
        for entry in &self.entries {
            csv_writer.serialize(entry)?;
        }
        let bytes = csv_writer
            .into_inner()
            .map_err(|e| FramecheckError::Io(e.into_error()))?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "No images found");
        }

        writeln!(
            f,
            "Checked {} image(s): {} ok, {} rejected",
            self.total(),
            self.ok_count(),
            self.rejected_count()
        )?;
        writeln!(f)?;

        for (status, count) in &self.summary {
            writeln!(f, "  {:<24} {}", status.as_str(), count)?;
        }
        writeln!(f)?;

        for entry in &self.entries {
            writeln!(f, "  [{}] {}", entry.status, entry.path.display())?;
        }

        Ok(())
    }
}

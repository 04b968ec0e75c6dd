//! Framing checks over a directory of images.

mod report;

pub use report::{BatchEntry, BatchReport};

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FramecheckError;
use crate::provider::KeypointProvider;
use crate::service::FramingService;

/// File extensions treated as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// Options for batch checking.
#[derive(Clone, Debug)]
pub struct BatchOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_links: true,
        }
    }
}

/// Checks every image under `root` and collects the results.
///
/// Images are visited in path order, so reports are reproducible.
///
/// # Errors
/// Returns an error only if `root` itself cannot be read. Entries below it
/// that cannot be visited are logged. An unreachable entry with an image
/// extension (such as a dangling symlink) is still checked, which reports it
/// as `ERROR`; anything else is skipped.
pub fn check_directory<P: KeypointProvider>(
    service: &FramingService<P>,
    root: &Path,
    opts: &BatchOptions,
) -> Result<BatchReport, FramecheckError> {
    let images = collect_images(root, opts)?;
    log::debug!("{}: {} image(s) to check", root.display(), images.len());

    let mut report = BatchReport::new();
    for path in images {
        let status = service.check_file(&path);
        report.add(path, status);
    }
    Ok(report)
}

fn collect_images(root: &Path, opts: &BatchOptions) -> Result<Vec<PathBuf>, FramecheckError> {
    let mut walker = WalkDir::new(root).follow_links(opts.follow_links);
    if !opts.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(FramecheckError::Traversal {
                    path: root.to_path_buf(),
                    message: source.to_string(),
                });
            }
            Err(source) => {
                log::warn!("{}: skipping unreadable entry: {}", root.display(), source);
                // check_file reports an unreadable path as ERROR.
                if let Some(path) = source.path().filter(|path| has_image_extension(path)) {
                    files.push(path.to_path_buf());
                }
                continue;
            }
        };

        if entry.file_type().is_file() && has_image_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}

use crate::detection::RawDetection;
use image::{ImageError, ImageReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub mod sidecar;

pub use sidecar::SidecarDetector;

/// Source of raw boxes for an image.
///
/// "Nothing found" is an empty vector, never an error.
pub trait Detector {
    fn name(&self) -> &'static str;
    fn detect(&self, image: &ImageInput) -> Result<Vec<RawDetection>, DetectorError>;
}

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("image unreadable: {}: {reason}", path.display())]
    ImageUnreadable { path: PathBuf, reason: String },
    #[error("detector failure ({detector}): {reason}")]
    DetectorFailure {
        detector: &'static str,
        reason: String,
    },
}

/// An image file whose header parsed as a known image format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub path: PathBuf,
    /// File name, used as the image identifier in results and reports.
    pub identifier: String,
    /// Pixel size from the header, `None` when the format is recognized but
    /// this build has no decoder for it.
    pub dimensions: Option<(u32, u32)>,
}

impl ImageInput {
    /// Check that `path` is a regular, non-empty file holding a recognizable image.
    ///
    /// Only the header is read; pixels are left to the detectors.
    pub fn open(path: &Path) -> Result<Self, DetectorError> {
        let unreadable = |reason: String| DetectorError::ImageUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = std::fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
        if !metadata.is_file() {
            return Err(unreadable("not a regular file".to_string()));
        }
        if metadata.len() == 0 {
            return Err(unreadable("file is empty".to_string()));
        }

        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| unreadable(e.to_string()))?;
        let Some(format) = reader.format() else {
            return Err(unreadable("unrecognized image format".to_string()));
        };
        let dimensions = match reader.into_dimensions() {
            Ok((0, _)) | Ok((_, 0)) => return Err(unreadable("image has no pixels".to_string())),
            Ok(size) => Some(size),
            Err(ImageError::Unsupported(err)) => {
                debug!(image = %path.display(), ?format, %err, "no decoder, header not checked");
                None
            }
            Err(err) => return Err(unreadable(err.to_string())),
        };

        Ok(Self {
            path: path.to_path_buf(),
            identifier: identifier_for(path),
            dimensions,
        })
    }

    /// File name without extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.identifier.clone())
    }
}

/// File name of `path`, or the whole path when it has none.
pub fn identifier_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Detector that never finds anything, leaving filename inference to do the work.
pub struct NullDetector;

impl NullDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for NullDetector {
    fn name(&self) -> &'static str {
        "none"
    }

    fn detect(&self, _image: &ImageInput) -> Result<Vec<RawDetection>, DetectorError> {
        Ok(Vec::new())
    }
}

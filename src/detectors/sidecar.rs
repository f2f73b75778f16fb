//! Reads detector output that was produced ahead of time.
//!
//! An external model writes one JSON file per image, named
//! `<image stem>.detections.json`, holding an array of
//! `{"label", "confidence", "bbox": {"x", "y", "width", "height"}}` objects.

use super::{Detector, DetectorError, ImageInput};
use crate::detection::RawDetection;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SIDECAR_SUFFIX: &str = ".detections.json";

pub struct SidecarDetector {
    /// Where sidecars live; `None` means next to each image.
    dir: Option<PathBuf>,
}

impl SidecarDetector {
    pub fn new() -> Self {
        Self { dir: None }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    pub fn sidecar_path(&self, image: &ImageInput) -> PathBuf {
        let file_name = format!("{}{}", image.stem(), SIDECAR_SUFFIX);
        match &self.dir {
            Some(dir) => dir.join(file_name),
            None => image
                .path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(file_name),
        }
    }

    fn failure(&self, reason: String) -> DetectorError {
        DetectorError::DetectorFailure {
            detector: self.name(),
            reason,
        }
    }
}

impl Default for SidecarDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for SidecarDetector {
    fn name(&self) -> &'static str {
        "sidecar"
    }

    fn detect(&self, image: &ImageInput) -> Result<Vec<RawDetection>, DetectorError> {
        let path = self.sidecar_path(image);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(image = %image.identifier, sidecar = %path.display(), "no sidecar");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.failure(format!("{}: {err}", path.display()))),
        };

        let detections: Vec<RawDetection> = serde_json::from_str(&content)
            .map_err(|err| self.failure(format!("{}: {err}", path.display())))?;
        debug!(
            image = %image.identifier,
            count = detections.len(),
            "loaded sidecar detections"
        );
        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{write_image, write_sidecar};
    use tempfile::TempDir;

    #[test]
    fn missing_sidecar_means_nothing_detected() {
        let dir = TempDir::new().unwrap();
        let image = ImageInput::open(&write_image(dir.path(), "plate.jpg").unwrap()).unwrap();
        assert!(SidecarDetector::new().detect(&image).unwrap().is_empty());
    }

    #[test]
    fn reads_sidecar_next_to_image() {
        let dir = TempDir::new().unwrap();
        let image = ImageInput::open(&write_image(dir.path(), "plate.jpg").unwrap()).unwrap();
        write_sidecar(
            dir.path(),
            "plate",
            r#"[{"label": "rice", "confidence": 0.9, "bbox": {"x": 0, "y": 0, "width": 200, "height": 150}}]"#,
        )
        .unwrap();

        let detections = SidecarDetector::new().detect(&image).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].label, "rice");
        assert_eq!(detections[0].bbox.width, 200.0);
    }

    #[test]
    fn reads_sidecar_from_configured_dir() {
        let images = TempDir::new().unwrap();
        let sidecars = TempDir::new().unwrap();
        let image = ImageInput::open(&write_image(images.path(), "lunch.png").unwrap()).unwrap();
        write_sidecar(sidecars.path(), "lunch", "[]").unwrap();

        let detector = SidecarDetector::in_dir(sidecars.path());
        assert_eq!(
            detector.sidecar_path(&image),
            sidecars.path().join("lunch.detections.json")
        );
        assert!(detector.detect(&image).unwrap().is_empty());
    }

    #[test]
    fn malformed_sidecar_is_a_detector_failure() {
        let dir = TempDir::new().unwrap();
        let image = ImageInput::open(&write_image(dir.path(), "plate.jpg").unwrap()).unwrap();
        write_sidecar(dir.path(), "plate", "{not json").unwrap();

        let err = SidecarDetector::new().detect(&image).unwrap_err();
        assert!(matches!(
            err,
            DetectorError::DetectorFailure {
                detector: "sidecar",
                ..
            }
        ));
    }
}

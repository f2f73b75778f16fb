use crate::detection::{BoundingBox, RawDetection};
use crate::detectors::sidecar::SIDECAR_SUFFIX;
use std::io;
use std::path::{Path, PathBuf};

/// A 1x1 grayscale PNG. The content sniffer wins over the extension, so it
/// opens fine under any image file name.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x00, 0x00, 0x00, 0x00, 0x3a, 0x7e, 0x9b,
    0x55, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x60, 0x00, 0x00, 0x00,
    0x02, 0x00, 0x01, 0x48, 0xaf, 0xa4, 0x71, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae,
    0x42, 0x60, 0x82,
];

/// Write a tiny valid image under the given file name.
///
/// # Example
///
/// ```rust
/// use platecal::test_utils::write_image;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = write_image(dir.path(), "rice_plate.jpg").unwrap();
/// assert!(path.ends_with("rice_plate.jpg"));
/// ```
pub fn write_image(dir: &Path, file_name: &str) -> io::Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, TINY_PNG)?;
    Ok(path)
}

/// Write raw sidecar JSON for the image with the given stem.
pub fn write_sidecar(dir: &Path, stem: &str, json: &str) -> io::Result<PathBuf> {
    let path = dir.join(format!("{stem}{SIDECAR_SUFFIX}"));
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Serialize detections into a sidecar for the image with the given stem.
pub fn write_detections(
    dir: &Path,
    stem: &str,
    detections: &[RawDetection],
) -> io::Result<PathBuf> {
    let json = serde_json::to_string_pretty(detections).map_err(io::Error::other)?;
    write_sidecar(dir, stem, &json)
}

/// Detection at the origin with the given size.
pub fn raw_box(label: &str, confidence: f64, width: f64, height: f64) -> RawDetection {
    RawDetection::new(label, confidence, BoundingBox::new(0.0, 0.0, width, height))
}

use crate::calculator::ImageResult;
use crate::engine::CalorieEngine;
use crate::report::ReportWriter;
use crate::session::SessionAggregator;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Image extensions picked up from the input directory, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "avif", "webp"];

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Supported image files directly inside `dir`, sorted by file name.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.exists() {
        return Err(BatchError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(BatchError::NotADirectory(dir.to_path_buf()));
    }

    let io_err = |source| BatchError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Walks a directory of plate photos, one image at a time.
pub struct BatchRunner<'e> {
    engine: &'e CalorieEngine,
    writer: ReportWriter,
}

impl<'e> BatchRunner<'e> {
    pub fn new(engine: &'e CalorieEngine, writer: ReportWriter) -> Self {
        Self { engine, writer }
    }

    /// Process every image in `dir`, writing a report and recording each result.
    ///
    /// Per-image problems never stop the loop; only an unusable input
    /// directory does. `on_result` sees each result after it is recorded.
    pub fn run(
        &self,
        dir: &Path,
        mut on_result: impl FnMut(&ImageResult),
    ) -> Result<SessionAggregator, BatchError> {
        let images = discover_images(dir)?;
        let mut session = SessionAggregator::new();
        info!(dir = %dir.display(), count = images.len(), "starting batch");

        for path in &images {
            let mut result = self.engine.analyze_path(path);
            if let Err(err) = self.writer.write(&result) {
                error!(image = %result.image, %err, "could not write report");
                result = ImageResult::failure(result.image, err.to_string());
            }
            session.record(&result);
            on_result(&result);
        }

        Ok(session)
    }
}

use crate::calculator::{CalorieCalculator, ImageResult};
use crate::detection::RawDetection;
use crate::detectors::{Detector, ImageInput, NullDetector, identifier_for};
use crate::estimator::DEFAULT_IMAGE_SCALE_CM_PER_PX;
use crate::foods::KnowledgeBase;
use crate::reconciler::{FallbackSettings, Reconciler};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub image_scale_cm_per_px: f64,
    pub fallback: FallbackSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            image_scale_cm_per_px: DEFAULT_IMAGE_SCALE_CM_PER_PX,
            fallback: FallbackSettings::default(),
        }
    }
}

/// Runs detector, reconciler and calculator for one image at a time.
pub struct CalorieEngine {
    knowledge: KnowledgeBase,
    detector: Box<dyn Detector>,
    settings: EngineSettings,
}

impl CalorieEngine {
    /// Engine with no detector; only filename inference produces foods.
    pub fn new(knowledge: KnowledgeBase, settings: EngineSettings) -> Self {
        Self {
            knowledge,
            detector: Box::new(NullDetector::new()),
            settings,
        }
    }

    pub fn with_detector<D: Detector + 'static>(mut self, detector: D) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn detector_name(&self) -> &'static str {
        self.detector.name()
    }

    /// Analyze one image file. Collaborator errors become a failure result.
    pub fn analyze_path(&self, path: &Path) -> ImageResult {
        match ImageInput::open(path) {
            Ok(image) => self.analyze(&image),
            Err(err) => {
                warn!(image = %path.display(), %err, "skipping image");
                ImageResult::failure(identifier_for(path), err.to_string())
            }
        }
    }

    pub fn analyze(&self, image: &ImageInput) -> ImageResult {
        match self.detector.detect(image) {
            Ok(raw) => {
                debug!(
                    image = %image.identifier,
                    detector = self.detector.name(),
                    count = raw.len(),
                    "detector finished"
                );
                self.process(&raw, &image.identifier)
            }
            Err(err) => {
                warn!(image = %image.identifier, %err, "detector failed");
                ImageResult::failure(image.identifier.clone(), err.to_string())
            }
        }
    }

    /// Reconcile raw detections and compute calories, no I/O involved.
    pub fn process(&self, raw: &[RawDetection], image_identifier: &str) -> ImageResult {
        let reconciler = Reconciler::new(&self.knowledge, self.settings.fallback);
        let detections = reconciler.reconcile(raw, image_identifier);
        CalorieCalculator::new(&self.knowledge, self.settings.image_scale_cm_per_px)
            .compute_image_result(image_identifier, &detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Outcome;
    use crate::detection::DetectionSource;
    use crate::detectors::SidecarDetector;
    use crate::foods::FoodKind;
    use crate::test_utils::{raw_box, write_detections, write_image, write_sidecar};
    use tempfile::TempDir;

    fn engine() -> CalorieEngine {
        CalorieEngine::new(KnowledgeBase::builtin(), EngineSettings::default())
            .with_detector(SidecarDetector::new())
    }

    #[test]
    fn rice_and_chicken_plate() {
        let result = engine().process(
            &[
                raw_box("rice", 0.91, 240.0, 160.0),
                raw_box("chicken", 0.84, 130.0, 100.0),
            ],
            "rice_plate.jpg",
        );

        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.food_count(), 2);
        let sum: f64 = result.estimates.iter().map(|e| e.calories_kcal).sum();
        assert!((result.total_calories_kcal - sum).abs() < 1e-9);
        for est in &result.estimates {
            assert!(est.weight_g >= 30.0 && est.weight_g <= 400.0);
        }
    }

    #[test]
    fn unknown_label_gives_success_empty() {
        let result = engine().process(&[raw_box("blob", 0.7, 100.0, 100.0)], "unknown_blob.jpg");
        assert_eq!(result.outcome, Outcome::SuccessEmpty);
        assert_eq!(result.total_calories_kcal, 0.0);
    }

    #[test]
    fn empty_detector_uses_filename() {
        let result = engine().process(&[], "apple_snack.png");
        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.estimates.len(), 1);
        assert_eq!(result.estimates[0].food, FoodKind::Apple);
        assert_eq!(result.estimates[0].source, DetectionSource::FilenameFallback);
    }

    #[test]
    fn analyze_path_reads_sidecar() {
        let dir = TempDir::new().unwrap();
        let path = write_image(dir.path(), "dinner.jpg").unwrap();
        write_detections(dir.path(), "dinner", &[raw_box("beef", 0.9, 150.0, 120.0)]).unwrap();

        let result = engine().analyze_path(&path);
        assert_eq!(result.image, "dinner.jpg");
        assert_eq!(result.estimates[0].food, FoodKind::Beef);
        assert_eq!(result.estimates[0].source, DetectionSource::Detector);
    }

    #[test]
    fn unreadable_image_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let result = engine().analyze_path(&dir.path().join("missing_rice.jpg"));
        assert!(result.is_failure());
        assert_eq!(result.image, "missing_rice.jpg");
    }

    #[test]
    fn garbage_bytes_do_not_fall_back_to_filename() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rice_plate.jpg");
        std::fs::write(&path, "definitely not a jpeg").unwrap();

        let result = engine().analyze_path(&path);
        assert!(result.is_failure());
        assert!(result.estimates.is_empty());
        assert_eq!(result.total_calories_kcal, 0.0);
    }

    #[test]
    fn detector_failure_is_a_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_image(dir.path(), "rice.jpg").unwrap();
        write_sidecar(dir.path(), "rice", "not json").unwrap();

        let result = engine().analyze_path(&path);
        assert!(result.is_failure());
        assert!(result.estimates.is_empty());
    }

    #[test]
    fn default_engine_has_no_detector() {
        let engine = CalorieEngine::new(KnowledgeBase::builtin(), EngineSettings::default());
        assert_eq!(engine.detector_name(), "none");
    }
}

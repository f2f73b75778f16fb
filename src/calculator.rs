use crate::detection::Detection;
use crate::estimator::{FoodEstimate, estimate};
use crate::foods::KnowledgeBase;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// At least one food was estimated.
    Success,
    /// The image was processed but no food survived.
    SuccessEmpty,
    /// The image could not be processed at all.
    Failure { reason: String },
}

/// Everything known about one processed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ImageResult {
    pub image: String,
    pub estimates: Vec<FoodEstimate>,
    pub total_calories_kcal: f64,
    pub outcome: Outcome,
}

impl ImageResult {
    pub fn failure(image: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            estimates: Vec::new(),
            total_calories_kcal: 0.0,
            outcome: Outcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn food_count(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure { .. })
    }
}

/// Turns reconciled detections into per-image calorie figures.
pub struct CalorieCalculator<'kb> {
    knowledge: &'kb KnowledgeBase,
    image_scale_cm_per_px: f64,
}

impl<'kb> CalorieCalculator<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase, image_scale_cm_per_px: f64) -> Self {
        Self {
            knowledge,
            image_scale_cm_per_px,
        }
    }

    /// Estimate every detection and total the calories.
    ///
    /// Detections carry an already-resolved food, so every one of them yields
    /// an estimate. The outcome is never a failure at this level.
    pub fn compute_image_result(&self, image: &str, detections: &[Detection]) -> ImageResult {
        let estimates: Vec<FoodEstimate> = detections
            .iter()
            .map(|detection| {
                let profile = self.knowledge.profile(detection.food);
                estimate(detection, profile, self.image_scale_cm_per_px)
            })
            .collect();

        // fold from +0.0: an empty `sum()` of floats is -0.0 and would print as "-0.0"
        let total_calories_kcal = estimates
            .iter()
            .fold(0.0, |total, est| total + est.calories_kcal);

        let outcome = if estimates.is_empty() {
            Outcome::SuccessEmpty
        } else {
            Outcome::Success
        };

        ImageResult {
            image: image.to_string(),
            estimates,
            total_calories_kcal,
            outcome,
        }
    }
}

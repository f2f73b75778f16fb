use crate::calculator::{ImageResult, Outcome};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Batch totals at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionSummary {
    pub processed: usize,
    /// Successful images, including those with no food.
    pub succeeded: usize,
    pub failed: usize,
    /// Successful images that ended with no food estimates.
    pub zero_detections: usize,
    pub cumulative_calories_kcal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FailedImage {
    pub image: String,
    pub reason: String,
}

/// Running totals for one batch.
///
/// Owned by the batch driver and updated once per image. A parallel driver
/// must serialize calls to [`SessionAggregator::record`], e.g. behind a mutex.
#[derive(Debug, Clone, Default)]
pub struct SessionAggregator {
    summary: SessionSummary,
    failures: Vec<FailedImage>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ImageResult) {
        self.summary.processed += 1;
        match &result.outcome {
            Outcome::Success => self.summary.succeeded += 1,
            Outcome::SuccessEmpty => {
                self.summary.succeeded += 1;
                self.summary.zero_detections += 1;
            }
            Outcome::Failure { reason } => {
                self.summary.failed += 1;
                self.failures.push(FailedImage {
                    image: result.image.clone(),
                    reason: reason.clone(),
                });
            }
        }
        // The running total never decreases.
        if result.total_calories_kcal.is_finite() && result.total_calories_kcal > 0.0 {
            self.summary.cumulative_calories_kcal += result.total_calories_kcal;
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary.clone()
    }

    pub fn failures(&self) -> &[FailedImage] {
        &self.failures
    }
}

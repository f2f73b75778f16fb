//! Bounding box to weight and calories.
//!
//! The model is a uniform slab: the box footprint is scaled to centimetres,
//! extruded by the food's assumed height and multiplied by its density. Real
//! food is neither box-shaped nor uniformly tall, so the height assumption is
//! the largest source of error here. The weight clamp keeps the result inside
//! a plausible serving range whatever the box looks like.

use crate::detection::{Detection, DetectionSource};
use crate::foods::{FoodKind, FoodProfile};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Centimetres per pixel when nothing better is known.
///
/// A 640x480 frame at this scale covers about 491 cm², the area of a 25 cm plate.
pub const DEFAULT_IMAGE_SCALE_CM_PER_PX: f64 = 0.04;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FoodEstimate {
    pub food: FoodKind,
    pub area_cm2: f64,
    pub volume_cm3: f64,
    /// Clamped to the profile's plausible range.
    pub weight_g: f64,
    pub confidence: f64,
    pub calories_kcal: f64,
    pub source: DetectionSource,
}

/// Estimate weight and calories for one detection.
///
/// Zero, negative or non-finite box sides (and a non-positive scale) give an
/// area of zero, which the clamp lifts to the profile's minimum weight.
/// Confidence is carried through and never enters the arithmetic.
pub fn estimate(
    detection: &Detection,
    profile: &FoodProfile,
    image_scale_cm_per_px: f64,
) -> FoodEstimate {
    let scale_ok = image_scale_cm_per_px.is_finite() && image_scale_cm_per_px > 0.0;
    let area_cm2 = match detection.bbox.area_px() {
        Some(px) if scale_ok => px * image_scale_cm_per_px * image_scale_cm_per_px,
        _ => {
            debug!(
                food = %detection.food,
                bbox = ?detection.bbox,
                scale = image_scale_cm_per_px,
                "degenerate geometry, weight falls back to minimum"
            );
            0.0
        }
    };

    let volume_cm3 = area_cm2 * profile.assumed_height_cm;
    let raw_weight_g = volume_cm3 * profile.density_g_per_cm3;
    let weight_g = clamp_weight(raw_weight_g, profile);
    if weight_g != raw_weight_g {
        debug!(
            food = %detection.food,
            raw_weight_g,
            weight_g,
            "weight clamped to plausible range"
        );
    }

    FoodEstimate {
        food: detection.food,
        area_cm2,
        volume_cm3,
        weight_g,
        confidence: detection.confidence,
        calories_kcal: weight_g / 100.0 * profile.kcal_per_100g,
        source: detection.source,
    }
}

// `f64::clamp` panics on inverted bounds; max-then-min settles on the upper
// bound instead.
fn clamp_weight(weight_g: f64, profile: &FoodProfile) -> f64 {
    weight_g.max(profile.min_weight_g).min(profile.max_weight_g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BoundingBox;
    use crate::foods::KnowledgeBase;

    fn rice_detection(width: f64, height: f64) -> Detection {
        Detection::from_detector(
            FoodKind::Rice,
            0.9,
            BoundingBox::new(10.0, 10.0, width, height),
        )
    }

    #[test]
    fn follows_area_volume_mass_chain() {
        let kb = KnowledgeBase::builtin();
        let rice = kb.profile(FoodKind::Rice);
        // 100x100 px at 0.04 cm/px = 16 cm², x3 cm = 48 cm³, x0.8 = 38.4 g
        let est = estimate(&rice_detection(100.0, 100.0), rice, 0.04);
        assert!((est.area_cm2 - 16.0).abs() < 1e-9);
        assert!((est.volume_cm3 - 48.0).abs() < 1e-9);
        assert!((est.weight_g - 38.4).abs() < 1e-9);
        assert!((est.calories_kcal - 38.4 / 100.0 * 130.0).abs() < 1e-9);
        assert_eq!(est.source, DetectionSource::Detector);
    }

    #[test]
    fn small_box_clamps_to_minimum() {
        let kb = KnowledgeBase::builtin();
        let rice = kb.profile(FoodKind::Rice);
        let est = estimate(&rice_detection(5.0, 5.0), rice, 0.04);
        assert_eq!(est.weight_g, rice.min_weight_g);
    }

    #[test]
    fn large_box_clamps_to_maximum() {
        let kb = KnowledgeBase::builtin();
        let rice = kb.profile(FoodKind::Rice);
        let est = estimate(&rice_detection(5000.0, 5000.0), rice, 0.04);
        assert_eq!(est.weight_g, rice.max_weight_g);
        assert!((est.calories_kcal - 4.0 * 130.0).abs() < 1e-9);
    }

    #[test]
    fn zero_width_gives_minimum_weight_not_zero() {
        let kb = KnowledgeBase::builtin();
        let rice = kb.profile(FoodKind::Rice);
        let est = estimate(&rice_detection(0.0, 120.0), rice, 0.04);
        assert_eq!(est.area_cm2, 0.0);
        assert_eq!(est.weight_g, rice.min_weight_g);
        assert!(est.calories_kcal > 0.0);
    }

    #[test]
    fn negative_dimensions_give_minimum_weight() {
        let kb = KnowledgeBase::builtin();
        let beef = kb.profile(FoodKind::Beef);
        let det = Detection::from_detector(
            FoodKind::Beef,
            0.4,
            BoundingBox::new(0.0, 0.0, -200.0, -200.0),
        );
        assert_eq!(estimate(&det, beef, 0.04).weight_g, beef.min_weight_g);
    }

    #[test]
    fn weight_stays_in_bounds_across_box_sizes() {
        let kb = KnowledgeBase::builtin();
        let sides = [-10.0, 0.0, 0.5, 1.0, 30.0, 120.0, 400.0, 2000.0, 1e9];
        for profile in kb.profiles() {
            for &w in &sides {
                for &h in &sides {
                    let det = Detection::from_detector(
                        profile.kind,
                        0.5,
                        BoundingBox::new(0.0, 0.0, w, h),
                    );
                    let est = estimate(&det, profile, DEFAULT_IMAGE_SCALE_CM_PER_PX);
                    assert!(
                        est.weight_g >= profile.min_weight_g
                            && est.weight_g <= profile.max_weight_g,
                        "{} {}x{} -> {}",
                        profile.kind,
                        w,
                        h,
                        est.weight_g
                    );
                }
            }
        }
    }

    #[test]
    fn confidence_does_not_change_weight() {
        let kb = KnowledgeBase::builtin();
        let chicken = kb.profile(FoodKind::Chicken);
        let bbox = BoundingBox::new(0.0, 0.0, 150.0, 90.0);
        let low = estimate(
            &Detection::from_detector(FoodKind::Chicken, 0.1, bbox),
            chicken,
            0.04,
        );
        let high = estimate(
            &Detection::from_detector(FoodKind::Chicken, 0.99, bbox),
            chicken,
            0.04,
        );
        assert_eq!(low.weight_g, high.weight_g);
        assert_eq!(low.calories_kcal, high.calories_kcal);
        assert_eq!(low.confidence, 0.1);
        assert_eq!(high.confidence, 0.99);
    }

    #[test]
    fn invalid_scale_is_treated_as_degenerate() {
        let kb = KnowledgeBase::builtin();
        let rice = kb.profile(FoodKind::Rice);
        let est = estimate(&rice_detection(300.0, 300.0), rice, 0.0);
        assert_eq!(est.weight_g, rice.min_weight_g);
    }
}

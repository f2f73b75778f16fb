use crate::foods::FoodKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Confidence assigned to foods inferred from the image filename.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Nominal box used for filename-inferred foods, in pixels.
///
/// At the default image scale this covers about 196 cm², roughly 40% of a
/// 25 cm plate.
pub const FALLBACK_BOX_WIDTH_PX: f64 = 350.0;
pub const FALLBACK_BOX_HEIGHT_PX: f64 = 350.0;

/// Axis-aligned box in pixel coordinates. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box anchored at the origin, used when no real geometry exists.
    pub fn nominal(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Pixel area, or `None` when either side is zero, negative or not finite.
    pub fn area_px(&self) -> Option<f64> {
        let valid = |side: f64| side.is_finite() && side > 0.0;
        if valid(self.width) && valid(self.height) {
            Some(self.width * self.height)
        } else {
            None
        }
    }
}

/// One box as reported by a detector, label untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawDetection {
    pub label: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, confidence: f64, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionSource {
    Detector,
    FilenameFallback,
}

/// A food believed to be on the plate, resolved against the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    pub food: FoodKind,
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub source: DetectionSource,
}

impl Detection {
    pub fn from_detector(food: FoodKind, confidence: f64, bbox: BoundingBox) -> Self {
        Self {
            food,
            confidence: clamp_confidence(confidence),
            bbox,
            source: DetectionSource::Detector,
        }
    }

    pub fn from_filename(food: FoodKind, confidence: f64, bbox: BoundingBox) -> Self {
        Self {
            food,
            confidence: clamp_confidence(confidence),
            bbox,
            source: DetectionSource::FilenameFallback,
        }
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_rejects_degenerate_sides() {
        assert_eq!(BoundingBox::new(0.0, 0.0, 10.0, 20.0).area_px(), Some(200.0));
        assert_eq!(BoundingBox::new(0.0, 0.0, 0.0, 20.0).area_px(), None);
        assert_eq!(BoundingBox::new(0.0, 0.0, -5.0, -5.0).area_px(), None);
        assert_eq!(BoundingBox::new(0.0, 0.0, f64::NAN, 5.0).area_px(), None);
        assert_eq!(
            BoundingBox::new(0.0, 0.0, f64::INFINITY, 5.0).area_px(),
            None
        );
    }

    #[test]
    fn confidence_is_clamped_into_unit_range() {
        let bbox = BoundingBox::nominal(1.0, 1.0);
        assert_eq!(Detection::from_detector(FoodKind::Rice, 1.7, bbox).confidence, 1.0);
        assert_eq!(Detection::from_detector(FoodKind::Rice, -0.2, bbox).confidence, 0.0);
        assert_eq!(
            Detection::from_detector(FoodKind::Rice, f64::NAN, bbox).confidence,
            0.0
        );
    }

    #[test]
    fn raw_detection_reads_sidecar_shape() {
        let raw: RawDetection = serde_json::from_str(
            r#"{"label": "rice", "confidence": 0.91, "bbox": {"x": 1, "y": 2, "width": 30, "height": 40}}"#,
        )
        .unwrap();
        assert_eq!(raw.label, "rice");
        assert_eq!(raw.bbox, BoundingBox::new(1.0, 2.0, 30.0, 40.0));
    }

    #[test]
    fn source_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&DetectionSource::FilenameFallback).unwrap(),
            "\"filename-fallback\""
        );
    }
}

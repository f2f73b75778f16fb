use crate::detection::{
    BoundingBox, Detection, FALLBACK_BOX_HEIGHT_PX, FALLBACK_BOX_WIDTH_PX, FALLBACK_CONFIDENCE,
    RawDetection,
};
use crate::foods::{FoodKind, KnowledgeBase, normalize_name};
use std::collections::HashMap;
use tracing::{debug, info};

/// Keywords shorter than this are never matched inside identifiers.
const MIN_KEYWORD_LEN: usize = 3;

/// How filename-inferred foods are presented to the estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackSettings {
    pub confidence: f64,
    pub box_width_px: f64,
    pub box_height_px: f64,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            confidence: FALLBACK_CONFIDENCE,
            box_width_px: FALLBACK_BOX_WIDTH_PX,
            box_height_px: FALLBACK_BOX_HEIGHT_PX,
        }
    }
}

/// Decides which foods are on a plate from detector output or, failing that,
/// from the image identifier.
pub struct Reconciler<'kb> {
    knowledge: &'kb KnowledgeBase,
    fallback: FallbackSettings,
}

impl<'kb> Reconciler<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase, fallback: FallbackSettings) -> Self {
        Self {
            knowledge,
            fallback,
        }
    }

    /// Resolve raw detections for one image.
    ///
    /// Non-empty detector output is used as-is, minus labels the knowledge base
    /// does not know. Empty output falls back to keywords found in
    /// `image_identifier`. An empty result is a valid outcome.
    pub fn reconcile(&self, raw: &[RawDetection], image_identifier: &str) -> Vec<Detection> {
        if !raw.is_empty() {
            return self.from_detector(raw, image_identifier);
        }

        let inferred = self.from_identifier(image_identifier);
        if inferred.is_empty() {
            debug!(image = %image_identifier, "no detections and no filename match");
        } else {
            info!(
                image = %image_identifier,
                foods = ?inferred.iter().map(|d| d.food).collect::<Vec<_>>(),
                "detector found nothing, using filename keywords"
            );
        }
        inferred
    }

    fn from_detector(&self, raw: &[RawDetection], image_identifier: &str) -> Vec<Detection> {
        raw.iter()
            .filter_map(|candidate| match self.knowledge.lookup(&candidate.label) {
                Ok(profile) => Some(Detection::from_detector(
                    profile.kind,
                    candidate.confidence,
                    candidate.bbox,
                )),
                Err(err) => {
                    debug!(image = %image_identifier, %err, "skipping detection");
                    None
                }
            })
            .collect()
    }

    fn from_identifier(&self, image_identifier: &str) -> Vec<Detection> {
        let bbox = BoundingBox::nominal(self.fallback.box_width_px, self.fallback.box_height_px);
        infer_foods(self.knowledge, image_identifier)
            .into_iter()
            .map(|food| Detection::from_filename(food, self.fallback.confidence, bbox))
            .collect()
    }
}

/// Foods named in an identifier, in order of first appearance.
///
/// Longer keywords claim their span first, so "pineapple" yields only
/// pineapple and "batata doce" only sweet potato.
pub fn infer_foods(knowledge: &KnowledgeBase, identifier: &str) -> Vec<FoodKind> {
    let haystack = normalize_name(identifier);
    if haystack.is_empty() {
        return Vec::new();
    }

    let mut keywords: Vec<(&str, FoodKind)> = knowledge
        .keywords()
        .filter(|(keyword, _)| keyword.len() >= MIN_KEYWORD_LEN)
        .collect();
    keywords.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    // Normalized text is ASCII, so byte offsets are character offsets.
    let mut claimed = vec![false; haystack.len()];
    let mut first_seen: HashMap<FoodKind, usize> = HashMap::new();
    for (keyword, food) in keywords {
        for (start, _) in haystack.match_indices(keyword) {
            let span = start..start + keyword.len();
            if claimed[span.clone()].iter().any(|taken| *taken) {
                continue;
            }
            claimed[span].iter_mut().for_each(|taken| *taken = true);
            first_seen
                .entry(food)
                .and_modify(|pos| *pos = (*pos).min(start))
                .or_insert(start);
        }
    }

    let mut found: Vec<(usize, FoodKind)> = first_seen
        .into_iter()
        .map(|(food, pos)| (pos, food))
        .collect();
    found.sort();
    found.into_iter().map(|(_, food)| food).collect()
}

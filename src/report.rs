//! Human-readable output: one text report per image, plus the end-of-run summary.

use crate::calculator::{ImageResult, Outcome};
use crate::session::{FailedImage, SessionSummary};
use colored::{ColoredString, Colorize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const REPORT_SUFFIX: &str = "_calories.txt";

const TITLE_RULE_WIDTH: usize = 50;
const SECTION_RULE_WIDTH: usize = 30;

#[derive(Debug, Error)]
#[error("failed to write report {}: {source}", path.display())]
pub struct ReportError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// `<image stem>_calories.txt`
pub fn report_file_name(image: &str) -> String {
    let stem = Path::new(image)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| image.to_string());
    format!("{stem}{REPORT_SUFFIX}")
}

pub fn render_report(result: &ImageResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("CALORIE ANALYSIS - {}\n", result.image));
    out.push_str(&format!("{}\n", "=".repeat(TITLE_RULE_WIDTH)));
    out.push('\n');

    if let Outcome::Failure { reason } = &result.outcome {
        out.push_str(&format!("ERROR: {reason}\n"));
        return out;
    }

    out.push_str(&format!("Total calories: {:.1} kcal\n", result.total_calories_kcal));
    out.push_str(&format!("Foods detected: {}\n", result.food_count()));
    out.push('\n');

    if result.estimates.is_empty() {
        out.push_str("No foods were detected in the image.\n");
        return out;
    }

    out.push_str("Food details:\n");
    out.push_str(&format!("{}\n", "-".repeat(SECTION_RULE_WIDTH)));
    for est in &result.estimates {
        out.push_str(&format!(
            "• {}: {:.1}g ({:.1} kcal) [Confidence: {:.2}]\n",
            est.food.display_name(),
            est.weight_g,
            est.calories_kcal,
            est.confidence
        ));
    }
    out
}

/// Writes per-image reports into one directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write(&self, result: &ImageResult) -> Result<PathBuf, ReportError> {
        let path = self.output_dir.join(report_file_name(&result.image));
        std::fs::write(&path, render_report(result)).map_err(|source| ReportError {
            path: path.clone(),
            source,
        })?;
        debug!(image = %result.image, report = %path.display(), "report written");
        Ok(path)
    }
}

/// End-of-run console summary.
pub fn render_summary(summary: &SessionSummary, failures: &[FailedImage], color: bool) -> String {
    let mut out = String::new();
    out.push_str(&paint("PROCESSING SUMMARY", color, |s| s.bold().cyan()));
    out.push('\n');
    out.push_str(&format!("{}\n", "-".repeat(SECTION_RULE_WIDTH)));
    out.push_str(&format!("Images processed: {}\n", summary.processed));
    out.push_str(&format!("Successes: {}\n", summary.succeeded));
    out.push_str(&format!("Errors: {}\n", summary.failed));
    out.push_str(&format!("No foods detected: {}\n", summary.zero_detections));
    if summary.succeeded > 0 {
        let total = format!("{:.1} kcal", summary.cumulative_calories_kcal);
        out.push_str(&format!(
            "Total calories detected: {}\n",
            paint(&total, color, |s| s.green())
        ));
    }

    if !failures.is_empty() {
        out.push('\n');
        out.push_str(&paint("Errors found:", color, |s| s.red()));
        out.push('\n');
        for failure in failures {
            out.push_str(&format!("  - {}: {}\n", failure.image, failure.reason));
        }
    }
    out
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DetectionSource;
    use crate::estimator::FoodEstimate;
    use crate::foods::FoodKind;
    use tempfile::TempDir;

    fn estimate(food: FoodKind, weight_g: f64, calories_kcal: f64, confidence: f64) -> FoodEstimate {
        FoodEstimate {
            food,
            area_cm2: 0.0,
            volume_cm3: 0.0,
            weight_g,
            confidence,
            calories_kcal,
            source: DetectionSource::Detector,
        }
    }

    fn plate() -> ImageResult {
        ImageResult {
            image: "rice_plate.jpg".to_string(),
            estimates: vec![
                estimate(FoodKind::Rice, 150.0, 195.0, 0.91),
                estimate(FoodKind::SweetPotato, 120.04, 103.2344, 0.5),
            ],
            total_calories_kcal: 298.2344,
            outcome: Outcome::Success,
        }
    }

    #[test]
    fn report_lists_each_food() {
        insta::assert_snapshot!(render_report(&plate()).trim_end(), @r"
CALORIE ANALYSIS - rice_plate.jpg
==================================================

Total calories: 298.2 kcal
Foods detected: 2

Food details:
------------------------------
• Rice: 150.0g (195.0 kcal) [Confidence: 0.91]
• Sweet Potato: 120.0g (103.2 kcal) [Confidence: 0.50]
");
    }

    #[test]
    fn report_for_empty_plate() {
        let result = ImageResult {
            image: "blank.png".to_string(),
            estimates: Vec::new(),
            total_calories_kcal: 0.0,
            outcome: Outcome::SuccessEmpty,
        };
        let report = render_report(&result);
        assert!(report.contains("Total calories: 0.0 kcal\n"));
        assert!(report.contains("Foods detected: 0\n"));
        assert!(report.ends_with("No foods were detected in the image.\n"));
        assert!(!report.contains("Food details:"));
    }

    #[test]
    fn report_for_failure() {
        let report = render_report(&ImageResult::failure("bad.jpg", "image unreadable"));
        assert!(report.starts_with("CALORIE ANALYSIS - bad.jpg\n"));
        assert!(report.ends_with("ERROR: image unreadable\n"));
        assert!(!report.contains("Total calories"));
    }

    #[test]
    fn report_file_name_uses_stem() {
        assert_eq!(report_file_name("rice_plate.jpg"), "rice_plate_calories.txt");
        assert_eq!(report_file_name("noext"), "noext_calories.txt");
    }

    #[test]
    fn writer_creates_file_in_output_dir() {
        let dir = TempDir::new().unwrap();
        let path = ReportWriter::new(dir.path()).write(&plate()).unwrap();
        assert_eq!(path, dir.path().join("rice_plate_calories.txt"));
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written, render_report(&plate()));
    }

    #[test]
    fn writer_reports_missing_dir() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path().join("nope"));
        let err = writer.write(&plate()).unwrap_err();
        assert!(err.to_string().contains("rice_plate_calories.txt"));
    }

    #[test]
    fn summary_without_color() {
        let summary = SessionSummary {
            processed: 3,
            succeeded: 2,
            failed: 1,
            zero_detections: 1,
            cumulative_calories_kcal: 393.04,
        };
        let failures = vec![FailedImage {
            image: "c.jpg".into(),
            reason: "image unreadable".into(),
        }];
        insta::assert_snapshot!(render_summary(&summary, &failures, false).trim_end(), @r"
PROCESSING SUMMARY
------------------------------
Images processed: 3
Successes: 2
Errors: 1
No foods detected: 1
Total calories detected: 393.0 kcal

Errors found:
  - c.jpg: image unreadable
");
    }

    #[test]
    fn every_line_is_terminated() {
        let report = render_report(&plate());
        assert_eq!(report.lines().count(), 10);
        assert_eq!(report.matches('\n').count(), 10);

        let summary = SessionSummary {
            processed: 1,
            succeeded: 1,
            cumulative_calories_kcal: 12.5,
            ..SessionSummary::default()
        };
        let out = render_summary(&summary, &[], true);
        assert!(out.ends_with("kcal\u{1b}[0m\n") || out.ends_with("12.5 kcal\n"), "{out:?}");
        assert_eq!(out.lines().count(), out.matches('\n').count());
    }

    #[test]
    fn summary_skips_total_when_nothing_succeeded() {
        let summary = SessionSummary {
            processed: 1,
            failed: 1,
            ..SessionSummary::default()
        };
        let out = render_summary(&summary, &[], false);
        assert!(!out.contains("Total calories"));
        assert!(!out.contains("Errors found"));
    }
}

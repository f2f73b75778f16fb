use platecal::batch::BatchRunner;
use platecal::calculator::Outcome;
use platecal::config::PlatecalConfig;
use platecal::detection::DetectionSource;
use platecal::detectors::SidecarDetector;
use platecal::report::ReportWriter;
use platecal::test_utils::{raw_box, write_detections, write_image};
use platecal::{CalorieEngine, EngineSettings, FoodKind, KnowledgeBase};
use tempfile::TempDir;

fn engine() -> CalorieEngine {
    CalorieEngine::new(KnowledgeBase::builtin(), EngineSettings::default())
        .with_detector(SidecarDetector::new())
}

#[test]
fn image_total_is_sum_of_estimates() {
    let result = engine().process(
        &[
            raw_box("rice", 0.9, 250.0, 200.0),
            raw_box("frango", 0.8, 150.0, 100.0),
            raw_box("spaceship", 0.99, 300.0, 300.0),
            raw_box("salada", 0.6, 0.0, 120.0),
        ],
        "dinner.jpg",
    );

    assert_eq!(result.outcome, Outcome::Success);
    let foods: Vec<_> = result.estimates.iter().map(|e| e.food).collect();
    assert_eq!(foods, vec![FoodKind::Rice, FoodKind::Chicken, FoodKind::Salad]);

    let sum = result
        .estimates
        .iter()
        .fold(0.0, |acc, e| acc + e.calories_kcal);
    assert!((result.total_calories_kcal - sum).abs() < 1e-9);

    // Zero-width salad box lands on the minimum weight.
    assert_eq!(result.estimates[2].weight_g, 30.0);
    assert!((result.estimates[2].calories_kcal - 6.0).abs() < 1e-9);
}

#[test]
fn every_estimate_stays_within_bounds() {
    let knowledge = KnowledgeBase::builtin();
    let engine = CalorieEngine::new(knowledge.clone(), EngineSettings::default());
    for side in [0.0, 1.0, 50.0, 400.0, 5000.0] {
        for profile in knowledge.profiles() {
            let result = engine.process(&[raw_box(profile.kind.name(), 0.7, side, side)], "x.jpg");
            let est = &result.estimates[0];
            assert!(est.weight_g >= 30.0 && est.weight_g <= 400.0, "{est:?}");
            assert!(est.calories_kcal >= 0.0);
        }
    }
}

#[test]
fn filename_fallback_only_when_detector_is_silent() {
    let engine = engine();

    let fallback = engine.process(&[], "feijao_e_arroz.jpg");
    let foods: Vec<_> = fallback.estimates.iter().map(|e| e.food).collect();
    assert_eq!(foods, vec![FoodKind::Beans, FoodKind::Rice]);
    assert!(
        fallback
            .estimates
            .iter()
            .all(|e| e.source == DetectionSource::FilenameFallback && e.confidence == 0.5)
    );

    // Detector output that resolves to nothing does not trigger the fallback.
    let unknown = engine.process(&[raw_box("spaceship", 0.9, 10.0, 10.0)], "rice.jpg");
    assert_eq!(unknown.outcome, Outcome::SuccessEmpty);
}

#[test]
fn configured_scale_and_heights_flow_through() {
    let mut config = PlatecalConfig::default();
    config.estimation.image_scale_cm_per_px = 0.02;
    config.heights.insert("arroz".into(), 1.5);
    config.validate().unwrap();

    let engine = CalorieEngine::new(config.knowledge_base().unwrap(), config.engine_settings());
    // 500x400 px at 0.02 cm/px = 80 cm², x 1.5 cm x 0.8 g/cm3 = 96 g.
    let result = engine.process(&[raw_box("rice", 0.9, 500.0, 400.0)], "plate.jpg");
    assert!((result.estimates[0].weight_g - 96.0).abs() < 1e-9);
    assert!((result.total_calories_kcal - 124.8).abs() < 1e-9);
}

#[test]
fn batch_session_matches_per_image_results() {
    let dir = TempDir::new().unwrap();
    write_image(dir.path(), "a_lunch.jpg").unwrap();
    write_detections(
        dir.path(),
        "a_lunch",
        &[raw_box("beef", 0.9, 150.0, 120.0), raw_box("fries", 0.8, 200.0, 100.0)],
    )
    .unwrap();
    write_image(dir.path(), "b_banana.webp").unwrap();
    write_image(dir.path(), "c_nothing.bmp").unwrap();
    std::fs::write(dir.path().join("d_corrupt.tiff"), b"").unwrap();
    std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

    let engine = engine();
    let runner = BatchRunner::new(&engine, ReportWriter::new(dir.path()));
    let mut per_image = Vec::new();
    let session = runner
        .run(dir.path(), |result| per_image.push(result.clone()))
        .unwrap();
    let summary = session.summary();

    assert_eq!(summary.processed, 4);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.zero_detections, 1);
    assert_eq!(summary.processed, summary.succeeded + summary.failed);

    let expected = per_image
        .iter()
        .filter(|r| !r.is_failure())
        .fold(0.0, |acc, r| acc + r.total_calories_kcal);
    assert!((summary.cumulative_calories_kcal - expected).abs() < 1e-9);
    assert_eq!(session.failures()[0].image, "d_corrupt.tiff");
}

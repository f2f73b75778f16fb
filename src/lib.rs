pub mod batch;
pub mod calculator;
pub mod config;
pub mod detection;
pub mod detectors;
pub mod engine;
pub mod estimator;
pub mod foods;
pub mod reconciler;
pub mod report;
pub mod session;
pub mod test_utils;

pub use calculator::{ImageResult, Outcome};
pub use engine::{CalorieEngine, EngineSettings};
pub use foods::{FoodKind, KnowledgeBase};
pub use session::{SessionAggregator, SessionSummary};

use crate::detection::{FALLBACK_BOX_HEIGHT_PX, FALLBACK_BOX_WIDTH_PX, FALLBACK_CONFIDENCE};
use crate::engine::EngineSettings;
use crate::estimator::DEFAULT_IMAGE_SCALE_CM_PER_PX;
use crate::foods::{
    DEFAULT_MAX_WEIGHT_G, DEFAULT_MIN_WEIGHT_G, FoodKind, KnowledgeBase, WeightBounds,
};
use crate::reconciler::FallbackSettings;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const APP_DIR: &str = "platecal";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlatecalConfig {
    #[serde(default)]
    pub estimation: EstimationConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Assumed food height overrides in cm, keyed by food name or synonym.
    #[serde(default)]
    pub heights: BTreeMap<String, f64>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub image_scale_cm_per_px: f64,
    pub min_weight_g: f64,
    pub max_weight_g: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub confidence: f64,
    pub box_width_px: f64,
    pub box_height_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub color: bool,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            image_scale_cm_per_px: DEFAULT_IMAGE_SCALE_CM_PER_PX,
            min_weight_g: DEFAULT_MIN_WEIGHT_G,
            max_weight_g: DEFAULT_MAX_WEIGHT_G,
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            confidence: FALLBACK_CONFIDENCE,
            box_width_px: FALLBACK_BOX_WIDTH_PX,
            box_height_px: FALLBACK_BOX_HEIGHT_PX,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl PlatecalConfig {
    /// User config if present and parseable, otherwise defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_file_path()
            && let Ok(content) = std::fs::read_to_string(&config_path)
            && let Ok(config) = toml::from_str(&content)
        {
            debug!(path = %config_path.display(), "loaded config");
            return config;
        }
        Self::default()
    }

    /// Load an explicit config file. Unlike [`load`](Self::load), any problem is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let config_path = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(write_err)
    }

    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|mut path| {
            path.push(CONFIG_FILE);
            path
        })
    }

    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let est = &self.estimation;
        if !positive(est.image_scale_cm_per_px) {
            return Err(invalid(format!(
                "image_scale_cm_per_px must be positive, got {}",
                est.image_scale_cm_per_px
            )));
        }
        if !est.min_weight_g.is_finite() || est.min_weight_g < 0.0 {
            return Err(invalid(format!(
                "min_weight_g must not be negative, got {}",
                est.min_weight_g
            )));
        }
        if !est.max_weight_g.is_finite() || est.min_weight_g > est.max_weight_g {
            return Err(invalid(format!(
                "min_weight_g ({}) exceeds max_weight_g ({})",
                est.min_weight_g, est.max_weight_g
            )));
        }

        let fb = &self.fallback;
        if !(0.0..=1.0).contains(&fb.confidence) {
            return Err(invalid(format!(
                "fallback confidence must be within [0, 1], got {}",
                fb.confidence
            )));
        }
        if !positive(fb.box_width_px) || !positive(fb.box_height_px) {
            return Err(invalid(format!(
                "fallback box must have positive sides, got {}x{}",
                fb.box_width_px, fb.box_height_px
            )));
        }

        self.height_overrides().map(|_| ())
    }

    /// Height overrides resolved to foods.
    pub fn height_overrides(&self) -> Result<HashMap<FoodKind, f64>, ConfigError> {
        let mut resolved = HashMap::with_capacity(self.heights.len());
        for (name, &height) in &self.heights {
            let kind = FoodKind::resolve(name)
                .ok_or_else(|| invalid(format!("unknown food in [heights]: {name}")))?;
            if !positive(height) {
                return Err(invalid(format!(
                    "height for {name} must be positive, got {height}"
                )));
            }
            resolved.insert(kind, height);
        }
        Ok(resolved)
    }

    pub fn knowledge_base(&self) -> Result<KnowledgeBase, ConfigError> {
        let bounds = WeightBounds {
            min_g: self.estimation.min_weight_g,
            max_g: self.estimation.max_weight_g,
        };
        let knowledge = KnowledgeBase::with_overrides(bounds, &self.height_overrides()?);
        knowledge
            .validate()
            .map_err(|err| invalid(err.to_string()))?;
        Ok(knowledge)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            image_scale_cm_per_px: self.estimation.image_scale_cm_per_px,
            fallback: FallbackSettings {
                confidence: self.fallback.confidence,
                box_width_px: self.fallback.box_width_px,
                box_height_px: self.fallback.box_height_px,
            },
        }
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

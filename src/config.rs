//! Configuration loader - YAML tuning file + .env paths

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Main configuration loaded from snake.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trail: TrailConfig,
    pub render: RenderConfig,
}

/// Sampling and trimming parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// A move must be strictly farther than this (px) to be recorded
    pub min_sample_distance: f64,
    /// Hard cap on buffered samples
    pub capacity: usize,
    /// Samples kept after the cap is exceeded
    pub retain: usize,
    /// Arc length of the drawn trail (px)
    pub target_length: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            min_sample_distance: 1.0,
            capacity: 1000,
            retain: 800,
            target_length: 1000.0,
        }
    }
}

/// Drawing and color animation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub stroke_width: f32,
    pub head_radius: f32,
    /// Degrees added per hue timer firing
    pub hue_step: f32,
    pub hue_period_ms: u64,
    pub start_hue: f32,
    /// Stroke width at the tail as a fraction of `stroke_width` (viewer only)
    pub tail_taper: f32,
    /// Polyline samples per curve segment when drawing natively
    pub curve_segments: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stroke_width: 12.0,
            head_radius: 14.0,
            hue_step: 0.3,
            hue_period_ms: 50,
            start_hue: 0.0,
            tail_taper: 1.0,
            curve_segments: 6,
        }
    }
}

impl RenderConfig {
    pub fn hue_period(&self) -> Duration {
        Duration::from_millis(self.hue_period_ms)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("trail.retain must be between 1 and trail.capacity ({capacity}), got {retain}")]
    InvalidRetain { retain: usize, capacity: usize },
    #[error("trail.target_length must be positive, got {0}")]
    InvalidTargetLength(f64),
    #[error("trail.min_sample_distance must not be negative, got {0}")]
    InvalidSampleDistance(f64),
    #[error("render.{field} must be positive, got {value}")]
    InvalidSize { field: &'static str, value: f32 },
    #[error("render.hue_period_ms must be at least 1")]
    ZeroHuePeriod,
    #[error("render.tail_taper must be in (0, 1], got {0}")]
    InvalidTaper(f32),
    #[error("render.curve_segments must be at least 1")]
    ZeroCurveSegments,
}

/// Paths loaded from .env
#[derive(Debug, Clone)]
pub struct EnvSettings {
    pub log_dir: String,
    pub screenshot_dir: PathBuf,
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!("Loading config from {:?}", path);
            Self::load(path)
        } else {
            tracing::warn!("Config file not found: {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let trail = &self.trail;
        if trail.retain == 0 || trail.retain > trail.capacity {
            return Err(ConfigError::InvalidRetain {
                retain: trail.retain,
                capacity: trail.capacity,
            });
        }
        if !(trail.target_length > 0.0) {
            return Err(ConfigError::InvalidTargetLength(trail.target_length));
        }
        if !(trail.min_sample_distance >= 0.0) {
            return Err(ConfigError::InvalidSampleDistance(trail.min_sample_distance));
        }

        let render = &self.render;
        for (field, value) in [
            ("stroke_width", render.stroke_width),
            ("head_radius", render.head_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidSize { field, value });
            }
        }
        if render.hue_period_ms == 0 {
            return Err(ConfigError::ZeroHuePeriod);
        }
        if !(render.tail_taper > 0.0 && render.tail_taper <= 1.0) {
            return Err(ConfigError::InvalidTaper(render.tail_taper));
        }
        if render.curve_segments == 0 {
            return Err(ConfigError::ZeroCurveSegments);
        }

        Ok(())
    }
}

impl EnvSettings {
    /// Load settings from .env file
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        EnvSettings {
            log_dir: std::env::var("SNAKE_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            screenshot_dir: std::env::var("SNAKE_SCREENSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("screenshots")),
        }
    }
}

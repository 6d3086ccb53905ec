//! Pointer trail geometry
//!
//! - collector: bounded, denoised history of pointer samples
//! - synth: arc-length trimming of the history into a fixed-length trail
//! - path: smooth quadratic curve description of a trail

pub mod collector;
pub mod path;
pub mod synth;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use collector::TrailBuffer;
pub use synth::{synthesize, Synthesized};

/// A position in viewport pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Point halfway between `self` and `other`
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Point at `t` along the segment from `self` to `other` (t = 0 is `self`)
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

#[derive(Error, Debug)]
pub enum TrailFileError {
    #[error("Unsupported trail file extension: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to read trail file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON trail: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid YAML trail: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Sample {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Load a recorded trail (a list of `{x, y}` samples) from JSON or YAML
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, TrailFileError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let samples: Vec<Point> = match ext.as_str() {
        "json" => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        "yaml" | "yml" => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        other => return Err(TrailFileError::UnsupportedFormat(other.to_string())),
    };

    if let Some(index) = samples.iter().position(|p| !p.is_finite()) {
        return Err(TrailFileError::NonFinite { index });
    }

    tracing::debug!("Loaded {} samples from {:?}", samples.len(), path);
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.midpoint(b), Point::new(1.5, 2.0));
        assert_eq!(a.lerp(b, 0.5), a.midpoint(b));
    }

    #[test]
    fn test_load_json_samples() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"x": 0, "y": 0}}, {{"x": 10.5, "y": -2}}]"#).unwrap();

        let samples = load_samples(file.path()).unwrap();
        assert_eq!(samples, vec![Point::new(0.0, 0.0), Point::new(10.5, -2.0)]);
    }

    #[test]
    fn test_load_yaml_samples() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "- {{x: 1, y: 2}}\n- {{x: 3, y: 4}}").unwrap();

        let samples = load_samples(file.path()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Point::new(3.0, 4.0));
    }

    #[test]
    fn test_non_finite_samples_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "- {{x: 0, y: 0}}\n- {{x: .nan, y: 0}}\n- {{x: 10, y: 0}}").unwrap();
        let err = load_samples(file.path()).unwrap_err();
        assert!(matches!(err, TrailFileError::NonFinite { index: 1 }));

        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "- {{x: 1, y: -.inf}}").unwrap();
        let err = load_samples(file.path()).unwrap_err();
        assert!(matches!(err, TrailFileError::NonFinite { index: 0 }));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let err = load_samples(file.path()).unwrap_err();
        assert!(matches!(err, TrailFileError::UnsupportedFormat(ref e) if e == "csv"));
    }
}

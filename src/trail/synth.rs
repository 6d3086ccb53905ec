//! Path synthesizer - trims the pointer history to a fixed arc length

use super::path::SmoothPath;
use super::Point;
use serde::Serialize;

/// Result of one synthesis pass over the history buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesized {
    /// Trimmed trail, tail first, head last
    pub points: Vec<Point>,
    pub path: SmoothPath,
    pub head: Option<Point>,
}

impl Synthesized {
    /// Nothing to draw until the trail has at least two points
    pub fn is_drawable(&self) -> bool {
        !self.path.is_empty() && self.points.len() >= 2
    }

    pub fn arc_length(&self) -> f64 {
        arc_length(&self.points)
    }

    pub fn summary(&self) -> SynthesisSummary {
        SynthesisSummary {
            d: self.path.to_string(),
            head: self.head,
            arc_length: self.arc_length(),
            points: self.points.clone(),
        }
    }
}

/// Serializable view of a synthesis result
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisSummary {
    pub d: String,
    pub head: Option<Point>,
    pub arc_length: f64,
    pub points: Vec<Point>,
}

/// Cumulative straight-line distance along `points`
pub fn arc_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Walk the history from newest to oldest and keep exactly `target_length`
/// pixels of trail (or all of it, if shorter).
pub fn synthesize(history: &[Point], target_length: f64) -> Synthesized {
    if history.len() < 2 {
        return Synthesized {
            points: Vec::new(),
            path: SmoothPath::empty(),
            head: history.first().copied(),
        };
    }

    let points = trim_to_length(history, target_length);
    let path = SmoothPath::from_points(&points);
    let head = points.last().copied();

    Synthesized { points, path, head }
}

/// Tail-first list of the most recent samples spanning at most
/// `target_length`, with the cut point interpolated onto the crossing segment.
fn trim_to_length(history: &[Point], target_length: f64) -> Vec<Point> {
    let mut total = 0.0;
    let mut selected: Vec<Point> = Vec::new();

    for &candidate in history.iter().rev() {
        let Some(&prev) = selected.last() else {
            selected.push(candidate);
            continue;
        };

        let distance = prev.distance(candidate);
        if total + distance <= target_length {
            total += distance;
            selected.push(candidate);
        } else {
            let ratio = (target_length - total) / distance;
            selected.push(prev.lerp(candidate, ratio));
            break;
        }
    }

    selected.reverse();
    selected
}

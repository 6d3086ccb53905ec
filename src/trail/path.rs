//! Smooth curve description of a trail
//!
//! Interior samples become quadratic control points and the midpoints
//! between neighbours become on-curve points. Only the first segment
//! carries an explicit control point; the rest use smooth continuation
//! (`T`), whose control point is the previous one reflected through the
//! current point. The result is tangent-continuous everywhere.

use super::Point;
use std::fmt;

/// One drawing command, in SVG path semantics (absolute coordinates)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    SmoothQuadTo(Point),
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::QuadTo { ctrl, to } => {
                write!(f, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y)
            }
            PathCommand::SmoothQuadTo(p) => write!(f, "T {} {}", p.x, p.y),
        }
    }
}

/// Sequence of drawing commands; `Display` yields an SVG `d` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothPath {
    commands: Vec<PathCommand>,
}

impl SmoothPath {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the curve through an ordered (tail to head) list of points
    pub fn from_points(points: &[Point]) -> Self {
        let mut commands = Vec::with_capacity(points.len());

        match points {
            [] => {}
            [only] => commands.push(PathCommand::MoveTo(*only)),
            [a, b] => {
                commands.push(PathCommand::MoveTo(*a));
                commands.push(PathCommand::LineTo(*b));
            }
            _ => {
                commands.push(PathCommand::MoveTo(points[0]));
                let last = points.len() - 1;
                for i in 1..points.len() {
                    let ctrl = points[i];
                    let to = if i == last {
                        ctrl
                    } else {
                        ctrl.midpoint(points[i + 1])
                    };

                    if i == 1 {
                        commands.push(PathCommand::QuadTo { ctrl, to });
                    } else {
                        commands.push(PathCommand::SmoothQuadTo(to));
                    }
                }
            }
        }

        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Approximate the curve as a polyline.
    ///
    /// Each quadratic segment is sampled at `segments` evenly spaced
    /// parameter values; lines contribute their end point only.
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        let mut out = Vec::new();
        let mut current = Point::new(0.0, 0.0);
        let mut last_ctrl: Option<Point> = None;

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    out.push(p);
                    current = p;
                    last_ctrl = None;
                }
                PathCommand::LineTo(p) => {
                    out.push(p);
                    current = p;
                    last_ctrl = None;
                }
                PathCommand::QuadTo { ctrl, to } => {
                    sample_quad(&mut out, current, ctrl, to, segments);
                    current = to;
                    last_ctrl = Some(ctrl);
                }
                PathCommand::SmoothQuadTo(to) => {
                    let ctrl = match last_ctrl {
                        Some(prev) => Point::new(2.0 * current.x - prev.x, 2.0 * current.y - prev.y),
                        None => current,
                    };
                    sample_quad(&mut out, current, ctrl, to, segments);
                    current = to;
                    last_ctrl = Some(ctrl);
                }
            }
        }

        out
    }
}

fn sample_quad(out: &mut Vec<Point>, from: Point, ctrl: Point, to: Point, segments: usize) {
    for k in 1..=segments {
        let t = k as f64 / segments as f64;
        let mt = 1.0 - t;
        out.push(Point::new(
            mt * mt * from.x + 2.0 * mt * t * ctrl.x + t * t * to.x,
            mt * mt * from.y + 2.0 * mt * t * ctrl.y + t * t * to.y,
        ));
    }
}

impl fmt::Display for SmoothPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", command)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(SmoothPath::from_points(&[]).is_empty());
        assert_eq!(SmoothPath::from_points(&pts(&[(3.0, 4.0)])).to_string(), "M 3 4");
    }

    #[test]
    fn test_two_points_is_a_line() {
        let path = SmoothPath::from_points(&pts(&[(0.0, 0.0), (100.0, 0.0)]));
        assert_eq!(path.to_string(), "M 0 0 L 100 0");
    }

    #[test]
    fn test_three_points_single_quad_to_head() {
        let path = SmoothPath::from_points(&pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)]));
        assert_eq!(path.to_string(), "M 0 0 Q 10 10 15 5 T 20 0");
    }

    #[test]
    fn test_midpoints_between_interior_points() {
        let path = SmoothPath::from_points(&pts(&[
            (0.0, 0.0),
            (10.0, 0.0),
            (20.0, 10.0),
            (30.0, 10.0),
        ]));
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::QuadTo { ctrl: Point::new(10.0, 0.0), to: Point::new(15.0, 5.0) },
                PathCommand::SmoothQuadTo(Point::new(25.0, 10.0)),
                PathCommand::SmoothQuadTo(Point::new(30.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_fractional_coordinates_format() {
        let path = SmoothPath::from_points(&pts(&[(0.5, 1.25), (2.0, -3.5)]));
        assert_eq!(path.to_string(), "M 0.5 1.25 L 2 -3.5");
    }

    #[test]
    fn test_flatten_ends_on_last_point() {
        let points = pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0)]);
        let flat = SmoothPath::from_points(&points).flatten(8);
        assert_eq!(flat.first(), Some(&Point::new(0.0, 0.0)));
        assert_eq!(flat.last(), Some(&Point::new(30.0, 10.0)));
        assert_eq!(flat.len(), 1 + 3 * 8);
    }

    #[test]
    fn test_flatten_smooth_continuation_reflects_control() {
        // Q ctrl (10,10) ends at (15,5); T reflects to (20,0), so with end
        // (20,0) the second segment is a straight run along y = 5 - (x - 15)
        let flat = SmoothPath::from_points(&pts(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0)])).flatten(4);
        for p in &flat[5..] {
            assert!((p.y - (5.0 - (p.x - 15.0))).abs() < 1e-9, "{:?} off the tangent line", p);
        }
    }

    #[test]
    fn test_flatten_line() {
        let flat = SmoothPath::from_points(&pts(&[(0.0, 0.0), (5.0, 5.0)])).flatten(16);
        assert_eq!(flat, pts(&[(0.0, 0.0), (5.0, 5.0)]));
    }
}

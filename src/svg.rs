//! Standalone SVG export of a trail frame

use std::fmt::Write;

use crate::color::STOP_POSITIONS;
use crate::config::RenderConfig;
use crate::effect::Frame;

const GRADIENT_ID: &str = "snakeGradient";

/// Render one frame as an SVG document covering the viewport.
///
/// The gradient definition is always emitted; the path and head circle
/// only when the trail is drawable. SVG strokes have a single width, so
/// `render.tail_taper` does not apply here.
pub fn render_document(frame: &Frame, render: &RenderConfig) -> String {
    let mut out = String::new();
    let vp = frame.viewport;

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="none" style="pointer-events: none">"#,
        w = vp.width,
        h = vp.height,
    );

    out.push_str("  <defs>\n");
    let _ = writeln!(
        out,
        r#"    <linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="0%">"#,
        GRADIENT_ID
    );
    for (color, offset) in frame.palette.stops.iter().zip(STOP_POSITIONS) {
        let _ = writeln!(
            out,
            r#"      <stop offset="{}%" stop-color="{}" />"#,
            offset * 100.0,
            color.to_css()
        );
    }
    out.push_str("    </linearGradient>\n  </defs>\n");

    if frame.trail.is_drawable() {
        let _ = writeln!(
            out,
            r#"  <path d="{}" fill="none" stroke="url(#{})" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" />"#,
            frame.trail.path, GRADIENT_ID, render.stroke_width
        );
        if let Some(head) = frame.trail.head {
            let _ = writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}" />"#,
                head.x,
                head.y,
                render.head_radius,
                frame.palette.head().to_css()
            );
        }
    }

    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::effect::Viewport;
    use crate::trail::{synthesize, Point};

    fn frame(samples: &[Point]) -> Frame {
        Frame {
            trail: synthesize(samples, 1000.0),
            palette: Palette::from_hue(0.0),
            viewport: Viewport { width: 800.0, height: 600.0 },
        }
    }

    #[test]
    fn test_document_contains_path_and_head() {
        let svg = render_document(
            &frame(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]),
            &RenderConfig::default(),
        );
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
        assert!(svg.contains(r#"<path d="M 0 0 L 100 0""#));
        assert!(svg.contains(r#"stroke-width="12""#));
        assert!(svg.contains(r#"<circle cx="100" cy="0" r="14" fill="hsl(0, 100%, 50%)" />"#));
        assert!(svg.contains(r#"<stop offset="50%" stop-color="hsl(60, 100%, 50%)" />"#));
        assert!(svg.contains(r#"<stop offset="100%" stop-color="hsl(120, 100%, 50%)" />"#));
    }

    #[test]
    fn test_taper_does_not_change_stroke_width() {
        let render = RenderConfig { tail_taper: 0.25, ..RenderConfig::default() };
        let svg = render_document(&frame(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]), &render);
        assert!(svg.contains(r#"stroke-width="12""#));
    }

    #[test]
    fn test_empty_trail_draws_nothing() {
        let svg = render_document(&frame(&[Point::new(5.0, 5.0)]), &RenderConfig::default());
        assert!(!svg.contains("<path"));
        assert!(!svg.contains("<circle"));
        assert!(svg.contains("<linearGradient"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}

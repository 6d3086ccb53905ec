//! Trail effect state - owns the pointer history and the hue clock
//!
//! One `TrailEffect` exists per mounted overlay. Everything it drives
//! (sample buffer, hue timer, repaint requests) lives only as long as the
//! value does: dropping it is the unmount.

use std::time::Instant;

use crate::color::{HueClock, Palette};
use crate::config::Config;
use crate::trail::{synthesize, Point, Synthesized, TrailBuffer};

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1000.0, height: 1000.0 }
    }
}

/// Everything the renderer needs for one repaint
#[derive(Debug, Clone)]
pub struct Frame {
    pub trail: Synthesized,
    pub palette: Palette,
    pub viewport: Viewport,
}

pub struct TrailEffect {
    buffer: TrailBuffer,
    hue: HueClock,
    viewport: Viewport,
    target_length: f64,
    last_tick: Instant,
}

impl TrailEffect {
    pub fn mount(config: &Config, now: Instant) -> Self {
        tracing::debug!(
            "Mounting trail effect: target_length={} capacity={} retain={}",
            config.trail.target_length,
            config.trail.capacity,
            config.trail.retain
        );

        Self {
            buffer: TrailBuffer::from_config(&config.trail),
            hue: HueClock::new(
                config.render.start_hue,
                config.render.hue_step,
                config.render.hue_period(),
            ),
            viewport: Viewport::default(),
            target_length: config.trail.target_length,
            last_tick: now,
        }
    }

    /// Pointer-move handler
    pub fn pointer_moved(&mut self, position: Point) {
        self.buffer.record(position);
    }

    /// Resize handler; returns true if the size actually changed
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let viewport = Viewport { width, height };
        if viewport == self.viewport {
            return false;
        }
        tracing::debug!("Viewport resized to {}x{}", width, height);
        self.viewport = viewport;
        true
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Repaint tick: runs the hue timer up to `now` and synthesizes the trail
    pub fn tick(&mut self, now: Instant) -> Frame {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;
        let fired = self.hue.advance(elapsed);
        if fired > 0 {
            tracing::trace!("Hue timer fired {} times, hue={:.1}", fired, self.hue.hue());
        }

        Frame {
            trail: synthesize(self.buffer.samples(), self.target_length),
            palette: self.hue.palette(),
            viewport: self.viewport,
        }
    }

    pub fn hue(&self) -> f32 {
        self.hue.hue()
    }

    pub fn sample_count(&self) -> usize {
        self.buffer.len()
    }
}

/// Input gathered for one repaint of the overlay
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub viewport: Option<Viewport>,
    pub moves: Vec<Point>,
    pub clear: bool,
}

/// Mount the effect into an empty slot, or unmount the one in it.
///
/// Returns whether the effect is mounted afterwards.
pub fn toggle(slot: &mut Option<TrailEffect>, config: &Config, now: Instant) -> bool {
    if slot.take().is_some() {
        tracing::info!("Trail effect disabled");
        false
    } else {
        *slot = Some(TrailEffect::mount(config, now));
        tracing::info!("Trail effect enabled");
        true
    }
}

/// One repaint: feeds `input` to the mounted effect and ticks it.
///
/// `None` means nothing is mounted, so no frame is drawn and no further
/// repaint should be scheduled.
pub fn step(slot: &mut Option<TrailEffect>, input: &FrameInput, now: Instant) -> Option<Frame> {
    let effect = slot.as_mut()?;

    if let Some(vp) = input.viewport {
        effect.resize(vp.width, vp.height);
    }
    if input.clear {
        tracing::debug!("Clearing trail");
        effect.clear();
    }
    for &position in &input.moves {
        effect.pointer_moved(position);
    }

    Some(effect.tick(now))
}

impl Drop for TrailEffect {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            tracing::debug!("Trail effect unmounted");
        } else {
            tracing::debug!("Trail effect unmounted, dropping {} samples", self.buffer.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tick_synthesizes_latest_buffer() {
        let start = Instant::now();
        let mut effect = TrailEffect::mount(&Config::default(), start);

        let frame = effect.tick(start);
        assert!(!frame.trail.is_drawable());
        assert_eq!(frame.trail.head, None);

        effect.pointer_moved(Point::new(0.0, 0.0));
        effect.pointer_moved(Point::new(100.0, 0.0));
        let frame = effect.tick(start);
        assert_eq!(frame.trail.path.to_string(), "M 0 0 L 100 0");
        assert_eq!(frame.trail.head, Some(Point::new(100.0, 0.0)));
    }

    #[test]
    fn test_hue_advances_with_time() {
        let start = Instant::now();
        let mut effect = TrailEffect::mount(&Config::default(), start);

        effect.tick(start + Duration::from_millis(500));
        assert!((effect.hue() - 3.0).abs() < 1e-4);

        let frame = effect.tick(start + Duration::from_millis(520));
        assert!((frame.palette.head().h - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_hue_wraps_over_long_runs() {
        let start = Instant::now();
        let mut effect = TrailEffect::mount(&Config::default(), start);

        // 1250 periods * 0.3 = 375 degrees
        effect.tick(start + Duration::from_millis(50 * 1250));
        assert!((0.0..360.0).contains(&effect.hue()));
        assert!((effect.hue() - 15.0).abs() < 0.05);
    }

    #[test]
    fn test_resize_tracks_viewport() {
        let mut effect = TrailEffect::mount(&Config::default(), Instant::now());
        assert_eq!(effect.tick(Instant::now()).viewport, Viewport::default());
        assert!(effect.resize(1280.0, 720.0));
        assert!(!effect.resize(1280.0, 720.0));
        assert_eq!(effect.tick(Instant::now()).viewport, Viewport { width: 1280.0, height: 720.0 });
    }

    #[test]
    fn test_unmounted_slot_produces_no_frame() {
        let config = Config::default();
        let start = Instant::now();
        let mut slot = None;

        let input = FrameInput {
            moves: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            ..Default::default()
        };
        assert!(step(&mut slot, &input, start).is_none());

        assert!(toggle(&mut slot, &config, start));
        let frame = step(&mut slot, &input, start).unwrap();
        assert!(frame.trail.is_drawable());

        assert!(!toggle(&mut slot, &config, start));
        assert!(slot.is_none());
        assert!(step(&mut slot, &input, start + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_remount_starts_fresh() {
        let mut config = Config::default();
        config.render.start_hue = 90.0;
        let start = Instant::now();
        let mut slot = None;

        toggle(&mut slot, &config, start);
        let input = FrameInput {
            viewport: Some(Viewport { width: 640.0, height: 480.0 }),
            moves: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            clear: false,
        };
        step(&mut slot, &input, start + Duration::from_millis(500));
        let effect = slot.as_ref().unwrap();
        assert_eq!(effect.sample_count(), 2);
        assert!((effect.hue() - 93.0).abs() < 1e-3);

        toggle(&mut slot, &config, start);
        // Time passing while unmounted must not move the hue
        toggle(&mut slot, &config, start + Duration::from_secs(10));
        let effect = slot.as_mut().unwrap();
        assert_eq!(effect.sample_count(), 0);
        assert_eq!(effect.hue(), 90.0);
        let frame = effect.tick(start + Duration::from_secs(10));
        assert_eq!(frame.viewport, Viewport::default());
        assert!(!frame.trail.is_drawable());
    }

    #[test]
    fn test_step_clears_before_new_moves() {
        let start = Instant::now();
        let mut slot = Some(TrailEffect::mount(&Config::default(), start));
        step(&mut slot, &FrameInput { moves: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)], ..Default::default() }, start);

        let input = FrameInput { moves: vec![Point::new(300.0, 300.0)], clear: true, ..Default::default() };
        let frame = step(&mut slot, &input, start).unwrap();
        assert_eq!(slot.as_ref().unwrap().sample_count(), 1);
        assert_eq!(frame.trail.head, Some(Point::new(300.0, 300.0)));
    }

    #[test]
    fn test_jitter_is_denoised() {
        let mut effect = TrailEffect::mount(&Config::default(), Instant::now());
        effect.pointer_moved(Point::new(10.0, 10.0));
        effect.pointer_moved(Point::new(10.4, 10.3));
        assert_eq!(effect.sample_count(), 1);
        effect.clear();
        assert_eq!(effect.sample_count(), 0);
    }
}

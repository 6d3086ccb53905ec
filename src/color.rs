//! Hue rotation for the trail gradient

use std::time::Duration;

/// Angular offsets of the three gradient stops from the base hue
pub const STOP_OFFSETS: [f32; 3] = [0.0, 60.0, 120.0];

/// Gradient stop positions along the stroke (fraction of the bounding box width)
pub const STOP_POSITIONS: [f32; 3] = [0.0, 0.5, 1.0];

/// HSL color; saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    /// Fully saturated, mid-lightness color at hue `h`
    pub fn vivid(h: f32) -> Self {
        Self { h: wrap_hue(h), s: 100.0, l: 50.0 }
    }

    /// CSS `hsl()` notation
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// Linear RGB components in [0, 1]
    pub fn to_rgb(&self) -> [f32; 3] {
        hsl_to_rgb(self.h / 360.0, self.s / 100.0, self.l / 100.0)
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let [r, g, b] = self.to_rgb();
        [
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        ]
    }
}

/// The three gradient colors derived from one hue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub stops: [Hsl; 3],
}

impl Palette {
    pub fn from_hue(hue: f32) -> Self {
        Self {
            stops: STOP_OFFSETS.map(|offset| Hsl::vivid(hue + offset)),
        }
    }

    /// Head marker uses the first stop
    pub fn head(&self) -> Hsl {
        self.stops[0]
    }

    /// Color at `t` in [0, 1] along the gradient, interpolated in RGB
    pub fn sample(&self, t: f32) -> [f32; 3] {
        let t = t.clamp(0.0, 1.0);
        let (a, b, local) = if t <= STOP_POSITIONS[1] {
            (self.stops[0], self.stops[1], t / STOP_POSITIONS[1])
        } else {
            (
                self.stops[1],
                self.stops[2],
                (t - STOP_POSITIONS[1]) / (STOP_POSITIONS[2] - STOP_POSITIONS[1]),
            )
        };
        let (a, b) = (a.to_rgb(), b.to_rgb());
        [
            a[0] + (b[0] - a[0]) * local,
            a[1] + (b[1] - a[1]) * local,
            a[2] + (b[2] - a[2]) * local,
        ]
    }
}

/// Fixed-period hue timer.
///
/// Every elapsed `period` advances the hue by `step` degrees, wrapping
/// at 360. Time left over from a partial period carries into the next call.
#[derive(Debug, Clone)]
pub struct HueClock {
    hue: f32,
    step: f32,
    period: Duration,
    carry: Duration,
}

impl HueClock {
    pub fn new(start: f32, step: f32, period: Duration) -> Self {
        Self {
            hue: wrap_hue(start),
            step,
            period,
            carry: Duration::ZERO,
        }
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn palette(&self) -> Palette {
        Palette::from_hue(self.hue)
    }

    /// Feed wall-clock time; returns how many timer periods fired
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }

        self.carry += elapsed;
        let period = self.period.as_nanos();
        let periods = self.carry.as_nanos() / period;
        // Remainder is below one period, so it always fits back in a Duration
        self.carry = Duration::from_nanos((self.carry.as_nanos() % period) as u64);

        let fired = u32::try_from(periods).unwrap_or(u32::MAX);
        let turn = (self.step as f64 * periods as f64).rem_euclid(360.0);
        self.hue = wrap_hue(self.hue + turn as f32);
        fired
    }
}

/// Wrap a hue angle into [0, 360)
pub fn wrap_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// HSL (all components in [0, 1]) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

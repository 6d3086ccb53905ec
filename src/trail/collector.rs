//! Sample collector - bounded history of pointer positions

use super::Point;
use crate::config::TrailConfig;

/// Pointer history, oldest sample first.
///
/// Never holds more than `capacity` samples. Overflow trims the buffer in
/// one batch down to the `retain` most recent samples.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    samples: Vec<Point>,
    min_distance: f64,
    capacity: usize,
    retain: usize,
}

impl TrailBuffer {
    pub fn new(min_distance: f64, capacity: usize, retain: usize) -> Self {
        let retain = retain.min(capacity);
        Self {
            samples: Vec::with_capacity(capacity + 1),
            min_distance,
            capacity,
            retain,
        }
    }

    pub fn from_config(config: &TrailConfig) -> Self {
        Self::new(config.min_sample_distance, config.capacity, config.retain)
    }

    /// Record a pointer position.
    ///
    /// Returns `false` when the sample is within `min_distance` of the last
    /// recorded one and was dropped.
    pub fn record(&mut self, position: Point) -> bool {
        if let Some(&last) = self.samples.last() {
            if position.distance(last) <= self.min_distance {
                return false;
            }
        }

        self.samples.push(position);

        if self.samples.len() > self.capacity {
            let evicted = self.samples.len() - self.retain;
            self.samples.drain(..evicted);
            tracing::trace!("Trail buffer trimmed: evicted {} samples, {} retained", evicted, self.samples.len());
        }

        true
    }

    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

use std::collections::VecDeque;

/// A single 2D pointer position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another sample
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other`: `self * (1 - t) + other * t`.
    ///
    /// Written as `self + (other - self) * t` so equal endpoints give back
    /// `self` bit-for-bit.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Bounded FIFO of recent samples, oldest first
#[derive(Debug, Clone, Default)]
pub struct History {
    samples: VecDeque<Sample>,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, then evict from the front until `len <= capacity`.
    ///
    /// Capacity is passed per call so a lowered capacity only takes effect
    /// on the next push.
    pub fn push(&mut self, sample: Sample, capacity: usize) {
        self.samples.push_back(sample);
        while self.samples.len() > capacity {
            self.samples.pop_front();
        }
    }

    /// Most recently pushed sample
    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Arithmetic mean of all samples, `(0, 0)` when empty
    pub fn mean(&self) -> Sample {
        if self.samples.is_empty() {
            return Sample::default();
        }

        let n = self.samples.len() as f64;
        let (sum_x, sum_y) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));

        Sample::new(sum_x / n, sum_y / n)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

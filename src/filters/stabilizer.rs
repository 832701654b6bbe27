//! Tremor-aware pointer stabilizer.
//!
//! Every observation is pushed into a bounded history. The output is the
//! history mean when the move is classified as tremor, and a 70/30 blend of
//! mean and raw sample when it is classified as intentional movement.
//!
//! Classification uses the instantaneous speed between the incoming raw
//! sample and the previously pushed raw sample, not the previous stabilized
//! output. Timestamps that do not advance (`dt <= 0`) give a speed of zero,
//! so those moves are always intentional.
//!
//! Non-finite coordinates are not filtered: they propagate through the mean
//! until evicted or until [`Stabilizer::reset`].

use super::{
    history::{History, Sample},
    PointerFilter,
};
use crate::{constants::INTENTIONAL_RAW_WEIGHT, parameters::Parameters};
use log::{debug, trace};

/// A raw pointer report as received from the input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedSample {
    pub x: f64,
    pub y: f64,
    pub timestamp_ms: u64,
}

impl TimedSample {
    #[must_use]
    pub const fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    /// Position without the timestamp
    #[must_use]
    pub const fn position(&self) -> Sample {
        Sample::new(self.x, self.y)
    }
}

/// How a single observation was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Fast movement, fully averaged
    Tremor,
    /// Deliberate movement, tracked with light damping
    Intentional,
}

/// Stabilizer state for one pointer stream
#[derive(Debug, Clone)]
pub struct Stabilizer {
    params: Parameters,
    history: History,
    last_observed_timestamp: Option<u64>,
    stabilized_position: Sample,
    last_motion: Option<Motion>,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stabilizer {
    /// Create a stabilizer with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self::with_parameters(Parameters::default())
    }

    /// Create a stabilizer with the given parameters
    #[must_use]
    pub fn with_parameters(params: Parameters) -> Self {
        debug!(
            "Creating stabilizer: history_capacity={}, tremor_threshold={}",
            params.history_capacity, params.tremor_threshold
        );
        Self {
            params,
            history: History::with_capacity(params.history_capacity),
            last_observed_timestamp: None,
            stabilized_position: Sample::default(),
            last_motion: None,
        }
    }

    /// Replace both parameters. Values are stored as given; range checks
    /// belong to [`Parameters::new`].
    pub fn set_parameters(&mut self, history_capacity: usize, tremor_threshold: u32) {
        debug!("Stabilizer parameters set: history_capacity={history_capacity}, tremor_threshold={tremor_threshold}");
        self.params = Parameters {
            history_capacity,
            tremor_threshold,
        };
    }

    /// Restore default parameters, keeping history and position
    pub fn reset_parameters(&mut self) {
        let defaults = Parameters::default();
        self.set_parameters(defaults.history_capacity, defaults.tremor_threshold);
    }

    /// Current parameters
    pub const fn parameters(&self) -> Parameters {
        self.params
    }

    /// Feed one raw pointer position and return the new stabilized position
    pub fn observe(&mut self, x: f64, y: f64, timestamp_ms: u64) -> Sample {
        let raw = Sample::new(x, y);
        let motion = self.classify(&raw, timestamp_ms);

        self.history.push(raw, self.params.history_capacity);
        let average = self.history.mean();

        self.stabilized_position = match motion {
            Motion::Tremor => average,
            Motion::Intentional => average.lerp(&raw, INTENTIONAL_RAW_WEIGHT),
        };
        self.last_motion = Some(motion);

        trace!(
            "observe ({x:.2}, {y:.2}) @ {timestamp_ms}ms -> {motion:?} ({:.2}, {:.2})",
            self.stabilized_position.x,
            self.stabilized_position.y
        );

        self.stabilized_position
    }

    /// Last computed stabilized position, `(0, 0)` before any observation
    pub const fn current_stabilized_position(&self) -> Sample {
        self.stabilized_position
    }

    /// Classification of the most recent observation
    pub const fn last_motion(&self) -> Option<Motion> {
        self.last_motion
    }

    /// Number of samples currently held in history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clear history, zero the position and forget the last timestamp
    pub fn reset(&mut self) {
        debug!("Resetting stabilizer state");
        self.history.clear();
        self.stabilized_position = Sample::default();
        self.last_observed_timestamp = None;
        self.last_motion = None;
    }

    /// Classify against the last pushed raw sample. Always records the
    /// timestamp, even when there is nothing to compare against yet.
    fn classify(&mut self, raw: &Sample, timestamp_ms: u64) -> Motion {
        let previous_timestamp = self.last_observed_timestamp.replace(timestamp_ms);

        let (Some(last_timestamp), Some(last)) = (previous_timestamp, self.history.last()) else {
            return Motion::Intentional;
        };

        let speed = match timestamp_ms.checked_sub(last_timestamp) {
            Some(dt) if dt > 0 => raw.distance_to(last) / dt as f64,
            _ => 0.0,
        };

        if speed > self.params.speed_threshold() {
            Motion::Tremor
        } else {
            Motion::Intentional
        }
    }
}

impl PointerFilter for Stabilizer {
    fn apply(&mut self, x: f64, y: f64, timestamp_ms: u64) -> Sample {
        self.observe(x, y, timestamp_ms)
    }

    fn configure(&mut self, params: &Parameters) {
        self.set_parameters(params.history_capacity, params.tremor_threshold);
    }

    fn reset(&mut self) {
        Stabilizer::reset(self);
    }

    fn name(&self) -> &str {
        "Stabilizer"
    }
}

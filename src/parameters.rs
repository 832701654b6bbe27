//! Tunable stabilizer parameters.
//!
//! Both values live in `[1, 20]`. [`Parameters::new`] rejects anything
//! outside that range, and the step methods clamp so a UI can bind them
//! directly to sliders or keyboard shortcuts.

use crate::{
    constants::{
        DEFAULT_HISTORY_CAPACITY, DEFAULT_TREMOR_THRESHOLD, PARAMETER_MAX, PARAMETER_MIN,
        TREMOR_THRESHOLD_SCALE,
    },
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// History capacity and tremor threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// Number of recent samples averaged ("smoothing strength")
    pub history_capacity: usize,
    /// Speed cutoff in hundredths of a pixel per millisecond
    pub tremor_threshold: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            tremor_threshold: DEFAULT_TREMOR_THRESHOLD,
        }
    }
}

impl Parameters {
    /// Create validated parameters
    pub fn new(history_capacity: usize, tremor_threshold: u32) -> Result<Self> {
        let params = Self {
            history_capacity,
            tremor_threshold,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check both values are within `[1, 20]`
    pub fn validate(&self) -> Result<()> {
        let range = PARAMETER_MIN as usize..=PARAMETER_MAX as usize;
        if !range.contains(&self.history_capacity) {
            return Err(Error::InvalidInput(format!(
                "History capacity must be between {PARAMETER_MIN} and {PARAMETER_MAX}, got {}",
                self.history_capacity
            )));
        }
        if !(PARAMETER_MIN..=PARAMETER_MAX).contains(&self.tremor_threshold) {
            return Err(Error::InvalidInput(format!(
                "Tremor threshold must be between {PARAMETER_MIN} and {PARAMETER_MAX}, got {}",
                self.tremor_threshold
            )));
        }
        Ok(())
    }

    /// Tremor threshold as a speed in px/ms
    #[must_use]
    pub fn speed_threshold(&self) -> f64 {
        f64::from(self.tremor_threshold) / TREMOR_THRESHOLD_SCALE
    }

    /// Step smoothing strength up by one, saturating at the maximum
    pub fn increase_smoothing(&mut self) {
        self.history_capacity = (self.history_capacity + 1).min(PARAMETER_MAX as usize);
    }

    /// Step smoothing strength down by one, saturating at the minimum
    pub fn decrease_smoothing(&mut self) {
        self.history_capacity = self
            .history_capacity
            .saturating_sub(1)
            .max(PARAMETER_MIN as usize);
    }

    /// Step tremor threshold up by one, saturating at the maximum
    pub fn increase_threshold(&mut self) {
        self.tremor_threshold = (self.tremor_threshold + 1).min(PARAMETER_MAX);
    }

    /// Step tremor threshold down by one, saturating at the minimum
    pub fn decrease_threshold(&mut self) {
        self.tremor_threshold = self.tremor_threshold.saturating_sub(1).max(PARAMETER_MIN);
    }
}

//! Pointer filtering algorithms.
//!
//! This module provides the tremor-aware [`stabilizer::Stabilizer`] plus a
//! passthrough filter, behind a common [`PointerFilter`] trait so callers can
//! switch between them at runtime.

/// Bounded sample history and the `Sample` type
pub mod history;

/// Tremor-aware moving-average stabilizer
pub mod stabilizer;

use crate::{parameters::Parameters, Error, Result};
pub use history::Sample;

/// Trait for all pointer filters
pub trait PointerFilter: Send + Sync {
    /// Apply filter to a raw position observed at `timestamp_ms`
    fn apply(&mut self, x: f64, y: f64, timestamp_ms: u64) -> Sample;

    /// Push new tunable parameters; filters without parameters ignore this
    fn configure(&mut self, _params: &Parameters) {}

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl PointerFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64, _timestamp_ms: u64) -> Sample {
        Sample::new(x, y)
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a pointer filter from a spec string.
///
/// Accepted forms: `none`, `stabilizer`, `stabilizer:<capacity>:<threshold>`.
pub fn create_filter(filter_spec: &str) -> Result<Box<dyn PointerFilter>> {
    let spec = filter_spec.to_lowercase();
    let mut parts = spec.split(':');
    let kind = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (kind, args.as_slice()) {
        ("none" | "nofilter", []) => Ok(Box::new(NoFilter)),
        ("stabilizer" | "tremor", []) => Ok(Box::new(stabilizer::Stabilizer::new())),
        ("stabilizer" | "tremor", [capacity, threshold]) => {
            let capacity = capacity
                .parse::<usize>()
                .map_err(|e| Error::FilterError(format!("Invalid history capacity '{capacity}': {e}")))?;
            let threshold = threshold
                .parse::<u32>()
                .map_err(|e| Error::FilterError(format!("Invalid tremor threshold '{threshold}': {e}")))?;
            let params = Parameters::new(capacity, threshold)
                .map_err(|e| Error::FilterError(e.to_string()))?;
            Ok(Box::new(stabilizer::Stabilizer::with_parameters(params)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {filter_spec}"))),
    }
}

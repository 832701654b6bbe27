//! Constants used throughout the stabilizer

/// Default history capacity ("smoothing strength")
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Default tremor threshold, in hundredths of a pixel per millisecond
pub const DEFAULT_TREMOR_THRESHOLD: u32 = 5;

/// Inclusive bounds shared by both tunable parameters
pub const PARAMETER_MIN: u32 = 1;
pub const PARAMETER_MAX: u32 = 20;

/// Divisor turning the integer threshold into a speed in px/ms
pub const TREMOR_THRESHOLD_SCALE: f64 = 100.0;

/// Weight of the raw sample when blending intentional movement.
/// The running average keeps the remaining 0.7.
pub const INTENTIONAL_RAW_WEIGHT: f64 = 0.3;

/// Numeric precision epsilon used by tests and benchmarks
pub const EPSILON: f64 = 1e-9;

//! Real-time pointer jitter smoothing.
//!
//! This library stabilizes a stream of raw 2D pointer positions. High-speed
//! motion is treated as tremor and fully averaged over a short history;
//! slower motion is treated as deliberate and tracked with light damping.
//!
//! The pipeline consists of:
//! 1. An input adapter turning pointer and keyboard events into calls
//! 2. The [`filters::stabilizer::Stabilizer`] producing stabilized positions
//! 3. A session wrapper handling parameter steps and the on/off toggle
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use tremor_stabilizer::filters::stabilizer::Stabilizer;
//!
//! let mut stabilizer = Stabilizer::new();
//! stabilizer.set_parameters(3, 5);
//!
//! let first = stabilizer.observe(0.0, 0.0, 0);
//! assert_eq!((first.x, first.y), (0.0, 0.0));
//!
//! // 10px in 10ms is well above 0.05 px/ms, so this is averaged
//! let second = stabilizer.observe(10.0, 0.0, 10);
//! assert_eq!((second.x, second.y), (5.0, 0.0));
//! ```
//!
//! ## Using Filters
//!
//! ```
//! use tremor_stabilizer::filters::{create_filter, PointerFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut filter = create_filter("stabilizer:8:3")?;
//!
//! let pos = filter.apply(120.0, 80.0, 1000);
//! println!("Stabilized: ({:.1}, {:.1})", pos.x, pos.y);
//!
//! filter.reset();
//! # Ok(())
//! # }
//! ```
//!
//! ## Replaying an Event Stream
//!
//! ```
//! use tremor_stabilizer::app::{AppConfig, StabilizerApp};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = StabilizerApp::new(AppConfig::default())?;
//! let mut output = Vec::<u8>::new();
//! app.run("0 0 0\nsmoothing+\n4 2 16\n".as_bytes(), &mut output)?;
//! # Ok(())
//! # }
//! ```

/// Pointer filtering algorithms
pub mod filters;

/// Validated tunable parameters
pub mod parameters;

/// Event stream parsing
pub mod input;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};

//! DataPerf - Time and Memory Measurement Harness
//!
//! Measures how long an operation takes and how much resident memory the
//! process gains or releases while it runs, for comparing data processing
//! techniques side by side.
//!
//! # Architecture
//!
//! - [`harness`]: measure a closure and report the result
//! - [`monitoring`]: process memory query and measurement session log
//! - [`compare`]: speedup and reduction ratios between measurements
//! - [`demos`]: workloads illustrating common optimizations
//! - [`config`]: YAML run configuration
//! - [`units`]: byte-size formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use dataperf::measure;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let m = measure(|| vec![0u64; 1_000_000].iter().sum::<u64>())?;
//!
//!     println!(
//!         "{:.3}s, {:.2}MB -> {:.2}MB",
//!         m.duration_seconds(),
//!         m.memory_before_mb(),
//!         m.memory_after_mb()
//!     );
//!     Ok(())
//! }
//! ```

pub mod compare;
pub mod config;
pub mod demos;
pub mod error;
pub mod harness;
pub mod monitoring;
pub mod units;

// Re-export commonly used types
pub use config::{load_config, RunConfig};
pub use error::{ConfigError, HarnessError};
pub use harness::{
    measure, measure_reported, measure_with, try_measure, try_measure_reported,
    try_measure_with, Measurement, MeasurementSummary, Reporter,
};
pub use monitoring::{MemorySource, ProcessMemory, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "DataPerf";

//! Measurement Harness
//!
//! Wraps a unit of work, records wall-clock duration and process memory
//! before and after it, and hands back both the work's result and the
//! readings.
//!
//! # Components
//!
//! - [`measure`](mod@measure): core measurement functions
//! - [`measurement`]: the [`Measurement`] record and its [`MeasurementSummary`]
//! - [`report`]: one-line stdout reporting via [`Reporter`]

pub mod measure;
pub mod measurement;
pub mod report;

pub use measure::{measure, measure_with, try_measure, try_measure_with};
pub use measurement::{Measurement, MeasurementSummary};
pub use report::{
    format_metrics, format_report, measure_reported, print_report, try_measure_reported,
    write_report, Reporter, DEFAULT_PRECISION,
};

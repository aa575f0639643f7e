//! Error Types
//!
//! Measurement-source failures live in [`HarnessError`]. Errors of the
//! measured work are never wrapped: fallible operations hand their own
//! error type back to the caller unchanged.

use thiserror::Error;

/// Failure of a measurement source (process memory query).
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The current process id could not be determined.
    #[error("could not determine current process id: {0}")]
    ProcessId(String),

    /// The memory query did not return data for the process.
    #[error("process {pid} not found while reading resident memory")]
    ProcessNotFound { pid: u32 },

    /// The report line could not be written.
    #[error("could not write measurement report: {0}")]
    Report(#[from] std::io::Error),
}

/// Failure while loading a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid YAML for [`crate::config::RunConfig`].
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A value did not fit the narrower column type.
#[derive(Debug, Error, PartialEq)]
pub enum NarrowingError {
    /// An id is negative or too large for `u32`.
    #[error("id {0} does not fit in u32")]
    IdOutOfRange(i64),

    /// A category label has no code.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

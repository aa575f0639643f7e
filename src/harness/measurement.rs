//! Measurement Results
//!
//! The immutable record produced by one harness call.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Result of one measured operation: its return value plus the timing and
/// memory readings taken around it.
///
/// Values are fixed at construction; the caller owns the record and can
/// take the payload back with [`Measurement::into_payload`].
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement<T> {
    payload: T,
    duration: Duration,
    memory_before_mb: f64,
    memory_after_mb: f64,
}

impl<T> Measurement<T> {
    pub(crate) fn new(
        payload: T,
        duration: Duration,
        memory_before_mb: f64,
        memory_after_mb: f64,
    ) -> Self {
        Self {
            payload,
            duration,
            memory_before_mb,
            memory_after_mb,
        }
    }

    /// Returns the operation's return value.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Returns the elapsed wall-clock time.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the elapsed wall-clock time in seconds (never negative).
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Resident memory before the operation ran, in MB.
    pub fn memory_before_mb(&self) -> f64 {
        self.memory_before_mb
    }

    /// Resident memory after the operation returned, in MB.
    pub fn memory_after_mb(&self) -> f64 {
        self.memory_after_mb
    }

    /// `memory_after_mb - memory_before_mb`; negative when memory was released.
    pub fn memory_delta_mb(&self) -> f64 {
        self.memory_after_mb - self.memory_before_mb
    }

    /// Returns the payload-free view of the readings.
    pub fn summary(&self) -> MeasurementSummary {
        MeasurementSummary {
            duration_seconds: self.duration_seconds(),
            memory_before_mb: self.memory_before_mb,
            memory_after_mb: self.memory_after_mb,
            memory_delta_mb: self.memory_delta_mb(),
        }
    }

    /// Consumes the measurement, returning the payload.
    pub fn into_payload(self) -> T {
        self.payload
    }

    /// Consumes the measurement, returning the payload and its readings.
    pub fn into_parts(self) -> (T, MeasurementSummary) {
        let summary = self.summary();
        (self.payload, summary)
    }
}

/// The numeric readings of a [`Measurement`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSummary {
    /// Elapsed wall-clock time in seconds
    pub duration_seconds: f64,
    /// Resident memory at start, in MB
    pub memory_before_mb: f64,
    /// Resident memory at end, in MB
    pub memory_after_mb: f64,
    /// After minus before, in MB
    pub memory_delta_mb: f64,
}

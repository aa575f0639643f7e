//! Measurement Reporting
//!
//! Writes one human-readable line per successful measurement, to stdout
//! or any `io::Write`. Nothing is written when the operation or the
//! measurement fails.

use std::io::{self, Write};

use crate::error::HarnessError;
use crate::monitoring::{MemorySource, ProcessMemory};

use super::measure::{measure_with, try_measure_with};
use super::measurement::{Measurement, MeasurementSummary};

/// Decimal places used when none is configured.
pub const DEFAULT_PRECISION: usize = 2;

/// Formats the readings, e.g. `0.12s, memory 100.00MB -> 120.00MB (+20.00MB)`.
pub fn format_metrics(summary: &MeasurementSummary, precision: usize) -> String {
    format!(
        "{:.p$}s, memory {:.p$}MB -> {:.p$}MB ({:+.p$}MB)",
        summary.duration_seconds,
        summary.memory_before_mb,
        summary.memory_after_mb,
        summary.memory_delta_mb,
        p = precision
    )
}

/// Formats a full report line: `"{label}: {metrics}"`.
pub fn format_report(label: &str, summary: &MeasurementSummary, precision: usize) -> String {
    format!("{}: {}", label, format_metrics(summary, precision))
}

/// Writes one report line to `out`.
pub fn write_report<W>(
    out: &mut W,
    label: &str,
    summary: &MeasurementSummary,
    precision: usize,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(out, "{}", format_report(label, summary, precision))
}

/// Writes one report line to standard output.
pub fn print_report(
    label: &str,
    summary: &MeasurementSummary,
    precision: usize,
) -> io::Result<()> {
    write_report(&mut io::stdout(), label, summary, precision)
}

/// Measures operations and reports a line for each one that succeeds.
///
/// # Example
///
/// ```rust,no_run
/// use dataperf::harness::Reporter;
///
/// let reporter = Reporter::new(3);
/// let m = reporter.measure("sum", || (0..10_000u64).sum::<u64>())?;
/// assert_eq!(*m.payload(), 49_995_000);
/// # Ok::<(), dataperf::HarnessError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    precision: usize,
}

impl Reporter {
    /// Creates a reporter printing `precision` decimal places.
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Returns the configured precision.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Measures `op` against the current process and prints the result.
    pub fn measure<T, F>(&self, label: &str, op: F) -> Result<Measurement<T>, HarnessError>
    where
        F: FnOnce() -> T,
    {
        let mut source = ProcessMemory::new()?;
        self.measure_with(&mut source, label, op)
    }

    /// Measures `op` with `source` and prints the result.
    pub fn measure_with<P, T, F>(
        &self,
        source: &mut P,
        label: &str,
        op: F,
    ) -> Result<Measurement<T>, HarnessError>
    where
        P: MemorySource + ?Sized,
        F: FnOnce() -> T,
    {
        self.measure_to(&mut io::stdout(), source, label, op)
    }

    /// Measures `op` with `source` and writes the result to `out`.
    ///
    /// Exactly one line is written on success; nothing is written when
    /// sampling fails.
    pub fn measure_to<W, P, T, F>(
        &self,
        out: &mut W,
        source: &mut P,
        label: &str,
        op: F,
    ) -> Result<Measurement<T>, HarnessError>
    where
        W: Write + ?Sized,
        P: MemorySource + ?Sized,
        F: FnOnce() -> T,
    {
        let measurement = measure_with(source, op)?;
        write_report(out, label, &measurement.summary(), self.precision)?;
        Ok(measurement)
    }

    /// Measures a fallible `op` and prints the result if it succeeds.
    pub fn try_measure<T, E, F>(
        &self,
        label: &str,
        op: F,
    ) -> Result<Result<Measurement<T>, E>, HarnessError>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut source = ProcessMemory::new()?;
        self.try_measure_with(&mut source, label, op)
    }

    /// Measures a fallible `op` with `source` and prints the result if it succeeds.
    pub fn try_measure_with<P, T, E, F>(
        &self,
        source: &mut P,
        label: &str,
        op: F,
    ) -> Result<Result<Measurement<T>, E>, HarnessError>
    where
        P: MemorySource + ?Sized,
        F: FnOnce() -> Result<T, E>,
    {
        self.try_measure_to(&mut io::stdout(), source, label, op)
    }

    /// Measures a fallible `op` with `source` and writes the result to `out`.
    ///
    /// Nothing is written when `op` fails or sampling fails.
    pub fn try_measure_to<W, P, T, E, F>(
        &self,
        out: &mut W,
        source: &mut P,
        label: &str,
        op: F,
    ) -> Result<Result<Measurement<T>, E>, HarnessError>
    where
        W: Write + ?Sized,
        P: MemorySource + ?Sized,
        F: FnOnce() -> Result<T, E>,
    {
        let measurement = match try_measure_with(source, op)? {
            Ok(measurement) => measurement,
            Err(e) => return Ok(Err(e)),
        };
        write_report(out, label, &measurement.summary(), self.precision)?;
        Ok(Ok(measurement))
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

/// Measures `op` and prints a report line with default precision.
pub fn measure_reported<T, F>(label: &str, op: F) -> Result<Measurement<T>, HarnessError>
where
    F: FnOnce() -> T,
{
    Reporter::default().measure(label, op)
}

/// Measures a fallible `op` and prints a report line if it succeeds.
pub fn try_measure_reported<T, E, F>(
    label: &str,
    op: F,
) -> Result<Result<Measurement<T>, E>, HarnessError>
where
    F: FnOnce() -> Result<T, E>,
{
    Reporter::default().try_measure(label, op)
}

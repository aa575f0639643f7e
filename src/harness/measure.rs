//! Measuring Operations
//!
//! Runs a closure exactly once on the caller's thread and records the
//! wall-clock time and resident memory around it.
//!
//! Sampling order is fixed: memory before, clock start, operation, clock
//! end, memory after. A failure in either memory sample yields an error
//! and no [`Measurement`]. A panic inside the operation unwinds through
//! unchanged.

use std::time::Instant;

use log::{debug, warn};

use crate::error::HarnessError;
use crate::monitoring::{MemorySource, ProcessMemory};

use super::measurement::Measurement;

/// Measures `op` against the current process.
///
/// A fresh [`ProcessMemory`] is created for every call.
///
/// # Example
///
/// ```rust,no_run
/// use dataperf::harness::measure;
///
/// let m = measure(|| (0..1_000_000u64).collect::<Vec<_>>())?;
/// assert_eq!(m.payload().len(), 1_000_000);
/// println!("{:.3}s, {:+.2}MB", m.duration_seconds(), m.memory_delta_mb());
/// # Ok::<(), dataperf::HarnessError>(())
/// ```
pub fn measure<T, F>(op: F) -> Result<Measurement<T>, HarnessError>
where
    F: FnOnce() -> T,
{
    let mut source = ProcessMemory::new()?;
    measure_with(&mut source, op)
}

/// Measures `op`, reading memory from `source`.
///
/// If the first memory sample fails, `op` is never invoked.
pub fn measure_with<P, T, F>(source: &mut P, op: F) -> Result<Measurement<T>, HarnessError>
where
    P: MemorySource + ?Sized,
    F: FnOnce() -> T,
{
    let memory_before_mb = sample(source, "before")?;
    let start = Instant::now();

    let payload = op();

    let duration = start.elapsed();
    let memory_after_mb = sample(source, "after")?;

    let measurement = Measurement::new(payload, duration, memory_before_mb, memory_after_mb);

    debug!(
        "Measured operation: {:.6}s, {:.2}MB -> {:.2}MB",
        measurement.duration_seconds(),
        memory_before_mb,
        memory_after_mb
    );

    Ok(measurement)
}

/// Measures a fallible `op` against the current process.
///
/// The outer `Err` is a measurement failure; the inner `Err` is exactly
/// what `op` returned, so callers can forward it with `?`:
///
/// ```rust,no_run
/// use dataperf::harness::try_measure;
///
/// fn parse_port(raw: &str) -> Result<u16, std::num::ParseIntError> {
///     let m = try_measure(|| raw.parse::<u16>()).expect("memory query failed")?;
///     Ok(m.into_payload())
/// }
/// ```
pub fn try_measure<T, E, F>(op: F) -> Result<Result<Measurement<T>, E>, HarnessError>
where
    F: FnOnce() -> Result<T, E>,
{
    let mut source = ProcessMemory::new()?;
    try_measure_with(&mut source, op)
}

/// Measures a fallible `op`, reading memory from `source`.
///
/// When `op` fails, no second memory sample is taken.
pub fn try_measure_with<P, T, E, F>(
    source: &mut P,
    op: F,
) -> Result<Result<Measurement<T>, E>, HarnessError>
where
    P: MemorySource + ?Sized,
    F: FnOnce() -> Result<T, E>,
{
    let memory_before_mb = sample(source, "before")?;
    let start = Instant::now();

    let payload = match op() {
        Ok(payload) => payload,
        Err(e) => {
            debug!("Measured operation failed, no result recorded");
            return Ok(Err(e));
        }
    };

    let duration = start.elapsed();
    let memory_after_mb = sample(source, "after")?;

    debug!(
        "Measured fallible operation: {:.6}s, {:.2}MB -> {:.2}MB",
        duration.as_secs_f64(),
        memory_before_mb,
        memory_after_mb
    );

    Ok(Ok(Measurement::new(
        payload,
        duration,
        memory_before_mb,
        memory_after_mb,
    )))
}

/// Reads one memory sample, logging a failure.
fn sample<P>(source: &mut P, stage: &str) -> Result<f64, HarnessError>
where
    P: MemorySource + ?Sized,
{
    source.resident_mb().map_err(|e| {
        warn!("Memory sample {} operation failed, no measurement: {}", stage, e);
        e
    })
}

//! Before/After Comparisons
//!
//! Ratios used when putting two measurements side by side: how many times
//! faster a candidate ran, and how much smaller it became.

use crate::harness::MeasurementSummary;

/// Smallest duration used as a divisor, so near-instant runs do not divide by zero.
pub const MIN_DURATION_SECONDS: f64 = 1e-6;

/// How many times faster `candidate_seconds` is than `baseline_seconds`.
pub fn speedup(baseline_seconds: f64, candidate_seconds: f64) -> f64 {
    baseline_seconds / candidate_seconds.max(MIN_DURATION_SECONDS)
}

/// Percentage by which `after` is smaller than `before`.
///
/// Returns 0 when `before` is not positive.
pub fn reduction_percent(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    (before - after) / before * 100.0
}

/// How many times smaller `compressed` is than `original`.
///
/// Returns 0 when `compressed` is zero.
pub fn compression_ratio(original: u64, compressed: u64) -> f64 {
    if compressed == 0 {
        return 0.0;
    }
    original as f64 / compressed as f64
}

/// Side-by-side view of a baseline and a candidate measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub baseline: MeasurementSummary,
    pub candidate: MeasurementSummary,
}

impl Comparison {
    pub fn new(baseline: MeasurementSummary, candidate: MeasurementSummary) -> Self {
        Self {
            baseline,
            candidate,
        }
    }

    /// Candidate speedup over the baseline.
    pub fn speedup(&self) -> f64 {
        speedup(self.baseline.duration_seconds, self.candidate.duration_seconds)
    }

    /// Difference in memory growth, baseline minus candidate, in MB.
    pub fn memory_saved_mb(&self) -> f64 {
        self.baseline.memory_delta_mb - self.candidate.memory_delta_mb
    }

    /// One-line description, e.g. `polars vs pandas: 4.2x faster`.
    ///
    /// A candidate slower than the baseline is described as `Nx slower`.
    pub fn describe(&self, baseline_label: &str, candidate_label: &str) -> String {
        let ratio = self.speedup();
        let (factor, direction) = if ratio >= 1.0 {
            (ratio, "faster")
        } else {
            let slowdown = speedup(
                self.candidate.duration_seconds,
                self.baseline.duration_seconds,
            );
            (slowdown, "slower")
        };

        format!(
            "{} vs {}: {:.1}x {}, {:+.2}MB memory growth difference",
            candidate_label,
            baseline_label,
            factor,
            direction,
            -self.memory_saved_mb()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(duration_seconds: f64, delta: f64) -> MeasurementSummary {
        MeasurementSummary {
            duration_seconds,
            memory_before_mb: 100.0,
            memory_after_mb: 100.0 + delta,
            memory_delta_mb: delta,
        }
    }

    #[test]
    fn test_speedup() {
        assert_eq!(speedup(2.0, 0.5), 4.0);
        assert_eq!(speedup(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_speedup_zero_candidate_is_clamped() {
        assert_eq!(speedup(1.0, 0.0), 1.0 / MIN_DURATION_SECONDS);
    }

    #[test]
    fn test_reduction_percent() {
        assert_eq!(reduction_percent(200.0, 50.0), 75.0);
        assert_eq!(reduction_percent(100.0, 100.0), 0.0);
        assert_eq!(reduction_percent(100.0, 150.0), -50.0);
    }

    #[test]
    fn test_reduction_percent_zero_base() {
        assert_eq!(reduction_percent(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(compression_ratio(1000, 250), 4.0);
        assert_eq!(compression_ratio(1000, 0), 0.0);
    }

    #[test]
    fn test_comparison() {
        let cmp = Comparison::new(summary(3.0, 40.0), summary(1.5, 10.0));
        assert_eq!(cmp.speedup(), 2.0);
        assert_eq!(cmp.memory_saved_mb(), 30.0);
        assert_eq!(
            cmp.describe("vec", "set"),
            "set vs vec: 2.0x faster, -30.00MB memory growth difference"
        );
    }

    #[test]
    fn test_describe_slower_candidate() {
        let cmp = Comparison::new(summary(1.0, 5.0), summary(4.0, 7.5));
        assert_eq!(cmp.speedup(), 0.25);
        assert_eq!(
            cmp.describe("dict", "list"),
            "list vs dict: 4.0x slower, +2.50MB memory growth difference"
        );
    }

    #[test]
    fn test_describe_equal_durations_is_not_slower() {
        let cmp = Comparison::new(summary(2.0, 0.0), summary(2.0, 0.0));
        assert!(cmp.describe("a", "b").starts_with("b vs a: 1.0x faster"));
    }
}

//! Measurement Session
//!
//! Collects labelled measurements in the order they were taken, for a
//! closing summary table or a JSON report.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::harness::{format_metrics, Measurement, MeasurementSummary};

/// Width of the label column in the summary table.
const LABEL_WIDTH: usize = 24;

/// One labelled measurement in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Label given when the measurement was recorded
    pub label: String,
    /// Wall-clock time the record was added
    pub recorded_at: DateTime<Utc>,
    /// The readings
    #[serde(flatten)]
    pub summary: MeasurementSummary,
}

/// JSON shape written by [`Session::to_json`].
#[derive(Serialize)]
struct SessionReport<'a> {
    started_at: DateTime<Utc>,
    elapsed_seconds: f64,
    total_duration_seconds: f64,
    peak_memory_mb: f64,
    records: &'a [SessionRecord],
}

/// An ordered log of measurements taken during one run.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<SessionRecord>,
    started_at: DateTime<Utc>,
    start_time: Instant,
}

impl Session {
    /// Creates an empty session starting now.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }

    /// Records the readings of a measurement under `label`.
    pub fn record<T>(&mut self, label: &str, measurement: &Measurement<T>) {
        self.record_summary(label, measurement.summary());
    }

    /// Records already-extracted readings under `label`.
    pub fn record_summary(&mut self, label: &str, summary: MeasurementSummary) {
        self.records.push(SessionRecord {
            label: label.to_string(),
            recorded_at: Utc::now(),
            summary,
        });
    }

    /// Returns all records in insertion order.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Returns the first record with `label`.
    pub fn get(&self, label: &str) -> Option<&SessionRecord> {
        self.records.iter().find(|r| r.label == label)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the time since the session was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Sum of the measured durations, in seconds.
    pub fn total_duration_seconds(&self) -> f64 {
        self.records.iter().map(|r| r.summary.duration_seconds).sum()
    }

    /// Largest after-reading across records, or 0 when empty.
    pub fn peak_memory_mb(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.summary.memory_after_mb)
            .fold(0.0, f64::max)
    }

    /// Renders the records as an aligned text table.
    pub fn summary_table(&self, precision: usize) -> String {
        if self.records.is_empty() {
            return "No measurements recorded".to_string();
        }

        let mut output = String::from("\nMeasurements:\n\n");

        for record in &self.records {
            output.push_str(&format!(
                "{} | {}\n",
                truncate(&record.label, LABEL_WIDTH),
                format_metrics(&record.summary, precision)
            ));
        }

        output.push_str(&format!(
            "\nTotal: {:.p$}s measured, peak memory {:.p$}MB ({} measurements)\n",
            self.total_duration_seconds(),
            self.peak_memory_mb(),
            self.records.len(),
            p = precision
        ));
        output
    }

    /// Serializes the session as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let report = SessionReport {
            started_at: self.started_at,
            elapsed_seconds: self.elapsed().as_secs_f64(),
            total_duration_seconds: self.total_duration_seconds(),
            peak_memory_mb: self.peak_memory_mb(),
            records: &self.records,
        };
        serde_json::to_string_pretty(&report)
    }

    /// Writes the JSON report to `path`, creating parent directories.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_json()?)?;
        info!("Saved measurement report to {}", path.display());
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads or truncates a label to a fixed width.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

//! Demonstration Workloads
//!
//! Small, deterministic workloads that show the effect of common data
//! processing optimizations when run through the harness:
//!
//! - `noop`: baseline overhead of a measurement
//! - `allocate`: growth of resident memory for a large vector
//! - `lookup`: linear `Vec` search versus hashed `HashSet`/`HashMap` lookup
//! - `duplicates`: quadratic versus hashed duplicate detection
//! - `narrowing`: wide numeric/string columns versus narrowed types

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;
use std::hint::black_box;
use std::mem::size_of;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::compare::{reduction_percent, Comparison};
use crate::config::RunConfig;
use crate::error::NarrowingError;
use crate::harness::Reporter;
use crate::monitoring::Session;
use crate::units::format_size;

/// Category labels used by generated rows.
pub const CATEGORIES: [&str; 5] = ["A", "B", "C", "D", "E"];

/// A named demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demo {
    Noop,
    Allocate,
    Lookup,
    Duplicates,
    Narrowing,
}

impl Demo {
    /// Every demo, in default run order.
    pub const ALL: [Demo; 5] = [
        Demo::Noop,
        Demo::Allocate,
        Demo::Lookup,
        Demo::Duplicates,
        Demo::Narrowing,
    ];

    /// Returns the demo's command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Noop => "noop",
            Demo::Allocate => "allocate",
            Demo::Lookup => "lookup",
            Demo::Duplicates => "duplicates",
            Demo::Narrowing => "narrowing",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Demo::ALL
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Demo::ALL.iter().map(|d| d.name()).collect();
                format!("Unknown demo '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// Allocates `n` floating-point values.
pub fn allocate_numbers(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 * 0.5).collect()
}

/// The same integers held in three collection types.
pub struct LookupData {
    pub list: Vec<u64>,
    pub set: HashSet<u64>,
    pub map: HashMap<u64, String>,
}

impl LookupData {
    /// Builds collections holding `0..n`.
    pub fn build(n: usize) -> Self {
        let list: Vec<u64> = (0..n as u64).collect();
        let set = list.iter().copied().collect();
        let map = list.iter().map(|&i| (i, format!("value_{}", i))).collect();
        Self { list, set, map }
    }

    /// Linear search.
    pub fn contains_list(&self, target: u64) -> bool {
        self.list.contains(&target)
    }

    /// Hashed lookup in the set.
    pub fn contains_set(&self, target: u64) -> bool {
        self.set.contains(&target)
    }

    /// Hashed lookup in the map keys.
    pub fn contains_map(&self, target: u64) -> bool {
        self.map.contains_key(&target)
    }
}

/// A target near the end of `0..n`, so the linear search does real work.
pub fn lookup_target(n: usize) -> u64 {
    n.saturating_sub(10) as u64
}

/// `0..n` followed by `0..n/2`, so the first half appears twice.
pub fn data_with_duplicates(n: usize) -> Vec<u64> {
    (0..n as u64).chain(0..(n / 2) as u64).collect()
}

/// Counts distinct duplicated values by rescanning the slice for each item.
pub fn duplicates_quadratic(data: &[u64]) -> usize {
    let mut duplicates: Vec<u64> = Vec::new();
    for item in data {
        let count = data.iter().filter(|&x| x == item).count();
        if count > 1 && !duplicates.contains(item) {
            duplicates.push(*item);
        }
    }
    duplicates.len()
}

/// Counts distinct duplicated values with a single hashed pass.
pub fn duplicates_hashed(data: &[u64]) -> usize {
    let mut seen = HashSet::with_capacity(data.len());
    let mut duplicates = HashSet::new();
    for &item in data {
        if !seen.insert(item) {
            duplicates.insert(item);
        }
    }
    duplicates.len()
}

/// Columns stored with the widest natural types.
#[derive(Debug, Clone, PartialEq)]
pub struct WideColumns {
    pub id: Vec<i64>,
    pub value: Vec<f64>,
    pub category: Vec<String>,
}

/// Columns narrowed to the smallest types that hold the data.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrowColumns {
    pub id: Vec<u32>,
    pub value: Vec<f32>,
    pub category: Vec<u8>,
}

impl WideColumns {
    /// Generates `rows` deterministic rows.
    pub fn generate(rows: usize) -> Self {
        let id = (0..rows as i64).collect();
        let value = (0..rows)
            .map(|i| ((i * 7919) % 1000) as f64 * 0.37 - 100.0)
            .collect();
        let category = (0..rows)
            .map(|i| CATEGORIES[i % CATEGORIES.len()].to_string())
            .collect();
        Self {
            id,
            value,
            category,
        }
    }

    /// Approximate heap bytes held by the columns.
    pub fn heap_bytes(&self) -> u64 {
        let strings: usize = self.category.iter().map(|s| s.capacity()).sum();
        (self.id.capacity() * size_of::<i64>()
            + self.value.capacity() * size_of::<f64>()
            + self.category.capacity() * size_of::<String>()
            + strings) as u64
    }

    /// Converts to narrow column types, failing on values that do not fit.
    pub fn narrow(&self) -> Result<NarrowColumns, NarrowingError> {
        let id = self
            .id
            .iter()
            .map(|&v| u32::try_from(v).map_err(|_| NarrowingError::IdOutOfRange(v)))
            .collect::<Result<Vec<_>, _>>()?;

        let value = self.value.iter().map(|&v| v as f32).collect();

        let category = self
            .category
            .iter()
            .map(|c| {
                CATEGORIES
                    .iter()
                    .position(|&known| known == c.as_str())
                    .map(|p| p as u8)
                    .ok_or_else(|| NarrowingError::UnknownCategory(c.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NarrowColumns {
            id,
            value,
            category,
        })
    }
}

impl NarrowColumns {
    /// Approximate heap bytes held by the columns.
    pub fn heap_bytes(&self) -> u64 {
        (self.id.capacity() * size_of::<u32>()
            + self.value.capacity() * size_of::<f32>()
            + self.category.capacity() * size_of::<u8>()) as u64
    }

    /// Returns the category label for a row.
    pub fn category_label(&self, row: usize) -> Option<&'static str> {
        self.category
            .get(row)
            .and_then(|&code| CATEGORIES.get(code as usize).copied())
    }
}

/// Runs one demo, printing a line per measurement and recording it in `session`.
pub fn run_demo(
    demo: Demo,
    config: &RunConfig,
    reporter: &Reporter,
    session: &mut Session,
) -> Result<(), Box<dyn Error>> {
    info!("Running demo: {}", demo);
    println!();

    match demo {
        Demo::Noop => {
            let m = reporter.measure("noop", || ())?;
            session.record("noop", &m);
        }
        Demo::Allocate => {
            let label = format!("allocate {} f64", config.rows);
            let m = reporter.measure(&label, || allocate_numbers(config.rows))?;
            session.record(&label, &m);
            println!("  elements: {}", m.payload().len());
        }
        Demo::Lookup => {
            for &size in &config.lookup_sizes {
                run_lookup(size, reporter, session)?;
            }
        }
        Demo::Duplicates => run_duplicates(config.duplicate_items, reporter, session)?,
        Demo::Narrowing => run_narrowing(config.rows, reporter, session)?,
    }

    Ok(())
}

fn run_lookup(
    size: usize,
    reporter: &Reporter,
    session: &mut Session,
) -> Result<(), Box<dyn Error>> {
    let build_label = format!("lookup build n={}", size);
    let data = reporter.measure(&build_label, || LookupData::build(size))?;
    session.record(&build_label, &data);

    let data = data.into_payload();
    let target = lookup_target(size);

    let list = reporter.measure(&format!("vec contains n={}", size), || {
        data.contains_list(black_box(target))
    })?;
    let set = reporter.measure(&format!("set contains n={}", size), || {
        data.contains_set(black_box(target))
    })?;
    let map = reporter.measure(&format!("map contains n={}", size), || {
        data.contains_map(black_box(target))
    })?;

    session.record(&format!("vec contains n={}", size), &list);
    session.record(&format!("set contains n={}", size), &set);
    session.record(&format!("map contains n={}", size), &map);

    println!("  {}", Comparison::new(list.summary(), set.summary()).describe("vec", "set"));
    println!("  {}", Comparison::new(list.summary(), map.summary()).describe("vec", "map"));
    Ok(())
}

fn run_duplicates(
    items: usize,
    reporter: &Reporter,
    session: &mut Session,
) -> Result<(), Box<dyn Error>> {
    let data = data_with_duplicates(items);
    println!("  items: {}", data.len());

    let quadratic = reporter.measure("duplicates quadratic", || duplicates_quadratic(&data))?;
    let hashed = reporter.measure("duplicates hashed", || duplicates_hashed(&data))?;

    session.record("duplicates quadratic", &quadratic);
    session.record("duplicates hashed", &hashed);

    println!(
        "  duplicates found: {} / {}",
        quadratic.payload(),
        hashed.payload()
    );
    println!(
        "  {}",
        Comparison::new(quadratic.summary(), hashed.summary()).describe("quadratic", "hashed")
    );
    Ok(())
}

fn run_narrowing(
    rows: usize,
    reporter: &Reporter,
    session: &mut Session,
) -> Result<(), Box<dyn Error>> {
    let wide = reporter.measure("wide columns", || WideColumns::generate(rows))?;
    session.record("wide columns", &wide);

    let narrow = reporter.try_measure("narrow columns", || wide.payload().narrow())??;
    session.record("narrow columns", &narrow);

    let wide_bytes = wide.payload().heap_bytes();
    let narrow_bytes = narrow.payload().heap_bytes();

    println!("  wide:   {}", format_size(wide_bytes));
    println!("  narrow: {}", format_size(narrow_bytes));
    println!(
        "  reduction: {:.1}%",
        reduction_percent(wide_bytes as f64, narrow_bytes as f64)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_names_roundtrip() {
        for demo in Demo::ALL {
            assert_eq!(demo.name().parse::<Demo>().unwrap(), demo);
            assert_eq!(demo.to_string(), demo.name());
        }
    }

    #[test]
    fn test_unknown_demo() {
        let err = "teleport".parse::<Demo>().unwrap_err();
        assert!(err.contains("teleport"));
        assert!(err.contains("narrowing"));
    }

    #[test]
    fn test_allocate_numbers() {
        let v = allocate_numbers(1000);
        assert_eq!(v.len(), 1000);
        assert_eq!(v[10], 5.0);
    }

    #[test]
    fn test_lookup_all_agree() {
        let data = LookupData::build(1000);
        let target = lookup_target(1000);
        assert_eq!(target, 990);
        assert!(data.contains_list(target));
        assert!(data.contains_set(target));
        assert!(data.contains_map(target));
        assert!(!data.contains_list(5000));
        assert!(!data.contains_set(5000));
        assert!(!data.contains_map(5000));
    }

    #[test]
    fn test_lookup_target_small_sizes() {
        assert_eq!(lookup_target(5), 0);
    }

    #[test]
    fn test_duplicates_methods_agree() {
        let data = data_with_duplicates(200);
        assert_eq!(data.len(), 300);
        assert_eq!(duplicates_quadratic(&data), 100);
        assert_eq!(duplicates_hashed(&data), 100);
    }

    #[test]
    fn test_duplicates_none() {
        let data: Vec<u64> = (0..50).collect();
        assert_eq!(duplicates_quadratic(&data), 0);
        assert_eq!(duplicates_hashed(&data), 0);
    }

    #[test]
    fn test_narrowing_preserves_values() {
        let wide = WideColumns::generate(100);
        let narrow = wide.narrow().unwrap();

        assert_eq!(narrow.id.len(), 100);
        assert_eq!(narrow.id[42], 42);
        assert_eq!(narrow.category_label(7), Some("C"));
        assert!((narrow.value[3] as f64 - wide.value[3]).abs() < 1e-3);
    }

    #[test]
    fn test_narrowing_shrinks_memory() {
        let wide = WideColumns::generate(10_000);
        let narrow = wide.narrow().unwrap();
        assert!(narrow.heap_bytes() < wide.heap_bytes());
        assert!(reduction_percent(wide.heap_bytes() as f64, narrow.heap_bytes() as f64) > 50.0);
    }

    #[test]
    fn test_narrowing_rejects_negative_id() {
        let mut wide = WideColumns::generate(3);
        wide.id[1] = -5;
        assert_eq!(wide.narrow().unwrap_err(), NarrowingError::IdOutOfRange(-5));
    }

    #[test]
    fn test_narrowing_rejects_unknown_category() {
        let mut wide = WideColumns::generate(3);
        wide.category[2] = "Z".to_string();
        assert_eq!(
            wide.narrow().unwrap_err(),
            NarrowingError::UnknownCategory("Z".to_string())
        );
    }

    #[test]
    fn test_run_demo_records_measurements() {
        let config = RunConfig {
            rows: 1000,
            lookup_sizes: vec![100],
            duplicate_items: 50,
            ..RunConfig::default()
        };
        let reporter = Reporter::default();
        let mut session = Session::new();

        for demo in Demo::ALL {
            run_demo(demo, &config, &reporter, &mut session).unwrap();
        }

        assert!(session.get("noop").is_some());
        assert!(session.get("allocate 1000 f64").is_some());
        assert!(session.get("set contains n=100").is_some());
        assert!(session.get("duplicates hashed").is_some());
        assert!(session.get("narrow columns").is_some());
        // noop + allocate + 4 lookup + 2 duplicates + 2 narrowing
        assert_eq!(session.len(), 10);
    }
}

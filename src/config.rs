//! Run Configuration
//!
//! Loads demo run settings from YAML. Every field has a default, so an
//! empty document is a valid configuration.
//!
//! # Example
//!
//! ```yaml
//! rows: 500000
//! precision: 3
//! demos: [allocate, lookup]
//! lookup_sizes: [1000, 100000]
//! json_output: reports/run.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::demos::Demo;
use crate::error::ConfigError;
use crate::harness::DEFAULT_PRECISION;

/// Largest supported number of decimal places in reports.
pub const MAX_PRECISION: usize = 9;

/// Settings for a demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Elements allocated by the allocation and narrowing demos
    pub rows: usize,

    /// Collection sizes for the lookup demo
    pub lookup_sizes: Vec<usize>,

    /// Items (before duplication) for the duplicate-detection demo
    pub duplicate_items: usize,

    /// Decimal places in report lines
    pub precision: usize,

    /// Demos to run, in order
    pub demos: Vec<Demo>,

    /// Where to write the JSON session report, if anywhere
    pub json_output: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rows: 1_000_000,
            lookup_sizes: vec![10_000, 100_000, 1_000_000],
            duplicate_items: 10_000,
            precision: DEFAULT_PRECISION,
            demos: Demo::ALL.to_vec(),
            json_output: None,
        }
    }
}

impl RunConfig {
    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Invalid(
                "rows must be greater than zero".to_string(),
            ));
        }

        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }

        if let Some(size) = self.lookup_sizes.iter().find(|&&s| s == 0) {
            return Err(ConfigError::Invalid(format!(
                "lookup sizes must be greater than zero, got {}",
                size
            )));
        }

        if self.demos.is_empty() {
            return Err(ConfigError::Invalid("no demos selected".to_string()));
        }

        Ok(())
    }
}

/// Parses and validates a configuration from YAML text.
pub fn parse_config(yaml: &str) -> Result<RunConfig, ConfigError> {
    // serde_yaml rejects an empty document, which should mean "all defaults"
    let config: RunConfig = if yaml.trim().is_empty() {
        RunConfig::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    config.validate()?;
    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Loads and validates a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.rows, 1_000_000);
        assert_eq!(config.precision, 2);
        assert_eq!(config.lookup_sizes, vec![10_000, 100_000, 1_000_000]);
        assert_eq!(config.demos, Demo::ALL.to_vec());
        assert!(config.json_output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), RunConfig::default());
        assert_eq!(parse_config("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = parse_config("rows: 5000\ndemos: [noop, narrowing]\n").unwrap();
        assert_eq!(config.rows, 5000);
        assert_eq!(config.demos, vec![Demo::Noop, Demo::Narrowing]);
        assert_eq!(config.precision, 2);
    }

    #[test]
    fn test_json_output_path() {
        let config = parse_config("json_output: reports/run.json").unwrap();
        assert_eq!(config.json_output, Some(PathBuf::from("reports/run.json")));
    }

    #[test]
    fn test_unknown_demo_rejected() {
        let err = parse_config("demos: [teleport]").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_config("rowz: 10").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let err = parse_config("rows: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_precision_limit() {
        assert!(parse_config("precision: 9").is_ok());
        let err = parse_config("precision: 10").unwrap_err();
        assert!(err.to_string().contains("precision"));
    }

    #[test]
    fn test_zero_lookup_size_rejected() {
        let err = parse_config("lookup_sizes: [10, 0]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_demo_list_rejected() {
        let err = parse_config("demos: []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rows: 1234").unwrap();
        writeln!(file, "precision: 4").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.rows, 1234);
        assert_eq!(config.precision, 4);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/dataperf.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

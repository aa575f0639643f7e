//! DataPerf CLI Entry Point
//!
//! Runs the demonstration workloads through the measurement harness.
//!
//! # Usage
//!
//! ```bash
//! # Run every demo with defaults
//! dataperf
//!
//! # Run selected demos
//! dataperf lookup narrowing
//!
//! # Load settings from YAML, override the row count
//! dataperf --config run.yaml --rows 200000
//!
//! # Write a JSON report
//! dataperf --json reports/run.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use colored::Colorize;
use log::{error, info};

use dataperf::config::{load_config, RunConfig, MAX_PRECISION};
use dataperf::demos::{run_demo, Demo};
use dataperf::monitoring::current_memory_mb;
use dataperf::{Reporter, Session, APP_NAME, VERSION};

/// Command-line options parsed from arguments.
#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<PathBuf>,
    rows: Option<usize>,
    precision: Option<usize>,
    json_output: Option<PathBuf>,
    demos: Vec<Demo>,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    println!();
    println!("{} v{}", APP_NAME.bold(), VERSION);
    println!("Time and Memory Measurement Harness");
    println!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: dataperf [OPTIONS] [DEMO...]");
    println!();
    println!("Demos:");
    for demo in Demo::ALL {
        println!("  {}", demo);
    }
    println!();
    println!("Options:");
    println!("  --config PATH       Load settings from a YAML file");
    println!("  --rows N            Elements for allocate/narrowing demos");
    println!("  --precision N       Decimal places in reports (max {})", MAX_PRECISION);
    println!("  --json PATH         Write a JSON report of all measurements");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  dataperf");
    println!("  dataperf lookup duplicates");
    println!("  dataperf --config run.yaml --json reports/run.json");
}

/// Fetches the value following an option.
fn option_value<'a>(args: &'a [String], i: &mut usize, name: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} requires a value", name))
}

/// Parses command-line arguments into CliOptions.
fn parse_arguments(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--verbose" | "-v" => {
                options.verbose = true;
            }
            "--config" => {
                options.config_path = Some(PathBuf::from(option_value(args, &mut i, "--config")?));
            }
            "--json" => {
                options.json_output = Some(PathBuf::from(option_value(args, &mut i, "--json")?));
            }
            "--rows" => {
                let value = option_value(args, &mut i, "--rows")?;
                options.rows = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid rows value: {}", value))?,
                );
            }
            "--precision" => {
                let value = option_value(args, &mut i, "--precision")?;
                options.precision = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid precision value: {}", value))?,
                );
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            name => {
                options.demos.push(name.parse()?);
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Builds the run configuration: file (or defaults), then CLI overrides.
fn resolve_config(options: CliOptions) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };

    if let Some(rows) = options.rows {
        config.rows = rows;
    }
    if let Some(precision) = options.precision {
        config.precision = precision;
    }
    if options.json_output.is_some() {
        config.json_output = options.json_output;
    }
    if !options.demos.is_empty() {
        config.demos = options.demos;
    }

    config.validate()?;
    Ok(config)
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    let options = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    setup_logging(options.verbose);
    print_banner();

    let config = resolve_config(options).map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let demo_names: Vec<_> = config.demos.iter().map(|d| d.name()).collect();
    info!("Demos: {}", demo_names.join(", "));

    let initial_memory = current_memory_mb()?;
    info!("Initial memory: {:.2}MB", initial_memory);

    let reporter = Reporter::new(config.precision);
    let mut session = Session::new();

    for &demo in &config.demos {
        run_demo(demo, &config, &reporter, &mut session)?;
    }

    println!("{}", session.summary_table(config.precision));

    let final_memory = current_memory_mb()?;
    println!(
        "Memory: {:.2}MB -> {:.2}MB ({:+.2}MB)",
        initial_memory,
        final_memory,
        final_memory - initial_memory
    );

    if let Some(path) = &config.json_output {
        session.save_json(path)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("dataperf")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_no_arguments() {
        let options = parse_arguments(&args(&[])).unwrap();
        assert!(options.demos.is_empty());
        assert!(options.config_path.is_none());
        assert!(!options.verbose);
    }

    #[test]
    fn test_parse_demos_and_options() {
        let options = parse_arguments(&args(&[
            "lookup",
            "--rows",
            "500",
            "--precision",
            "4",
            "--json",
            "out.json",
            "-v",
            "noop",
        ]))
        .unwrap();

        assert_eq!(options.demos, vec![Demo::Lookup, Demo::Noop]);
        assert_eq!(options.rows, Some(500));
        assert_eq!(options.precision, Some(4));
        assert_eq!(options.json_output, Some(PathBuf::from("out.json")));
        assert!(options.verbose);
    }

    #[test]
    fn test_parse_missing_value() {
        let err = parse_arguments(&args(&["--rows"])).unwrap_err();
        assert_eq!(err, "--rows requires a value");
    }

    #[test]
    fn test_parse_invalid_number() {
        let err = parse_arguments(&args(&["--precision", "lots"])).unwrap_err();
        assert!(err.contains("Invalid precision value"));
    }

    #[test]
    fn test_parse_unknown_option_and_demo() {
        assert!(parse_arguments(&args(&["--fast"])).unwrap_err().contains("Unknown option"));
        assert!(parse_arguments(&args(&["teleport"])).unwrap_err().contains("Unknown demo"));
    }

    #[test]
    fn test_resolve_config_overrides() {
        let options = CliOptions {
            rows: Some(42),
            precision: Some(3),
            demos: vec![Demo::Allocate],
            ..CliOptions::default()
        };
        let config = resolve_config(options).unwrap();
        assert_eq!(config.rows, 42);
        assert_eq!(config.precision, 3);
        assert_eq!(config.demos, vec![Demo::Allocate]);
    }

    #[test]
    fn test_resolve_config_rejects_invalid_override() {
        let options = CliOptions {
            rows: Some(0),
            ..CliOptions::default()
        };
        assert!(resolve_config(options).is_err());
    }
}

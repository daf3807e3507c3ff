//! Attendance API Checker - contract verification for the attendance service
//!
//! Issues a fixed suite of requests against a running attendance API and
//! checks each response's status code and JSON envelope.
//!
//! ## Features
//!
//! - 9 checks covering connectivity, attendance, statistics, reports and routing
//! - Optional login check
//! - Multiple output formats (Table, JSON, one-line summary)
//! - Summary export to JSON or YAML
//!
//! ## Usage
//!
//! ```bash
//! # Run every check against the default API
//! attendance-check
//!
//! # Point at another deployment and include the login check
//! attendance-check --base-url http://10.0.0.5:3000/api --include-auth
//!
//! # List the checks
//! attendance-check --list
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};

mod cli;
mod config;
mod contract;
mod executor;
mod http;
mod models;
mod output;
mod tests;
mod utils;

use cli::Args;
use config::{AppConfig, EnvConfig};
use executor::{Registry, TestRunner};
use models::TestCase;
use output::{save_summary, OutputFormat, ResultFormatter};
use utils::logger::{init_logger, LogLevel};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let verbose = args.verbose || env.verbose.unwrap_or(false);
    init_logger(args.log_level.unwrap_or(LogLevel::from_verbose(verbose)));

    let config = match load_config(&args, &env) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e:#}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(path) = &args.write_config {
        config.save(path)?;
        info!("Configuration written to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    if args.list {
        list_tests(config.include_auth);
        return Ok(ExitCode::SUCCESS);
    }

    let registry = Registry::standard(&config);
    debug!("Registered checks: {:?}", registry.names().collect::<Vec<_>>());

    let runner = TestRunner::from_config(&config)?;
    let summary = runner.run_suite(&registry).await;

    let format = OutputFormat::from_str(&config.format).unwrap_or(OutputFormat::Table);
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }
    println!("{}", formatter.format_summary(&summary));

    if let Some(path) = &args.output {
        save_summary(&summary, path)?;
        info!("Summary saved to {}", path.display());
    }

    Ok(ExitCode::from(summary.exit_status()))
}

/// Defaults, then config file, then environment, then flags
fn load_config(args: &Args, env: &EnvConfig) -> Result<AppConfig> {
    let explicit = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(Into::into));

    let mut config = match explicit {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            AppConfig::load(path)?
        }
        None => AppConfig::load_default()?,
    };

    if env.has_any() {
        debug!("Applying environment overrides: {env:?}");
    }
    config.apply_env(env);
    args.apply(&mut config);
    config.validate()?;

    Ok(config)
}

fn list_tests(include_auth: bool) {
    let cases = TestCase::suite(include_auth);
    println!("\nAttendance API Checks ({} total)\n", cases.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for test_case in cases {
        println!(
            "  {:2}. {:24} [{}]",
            test_case.number(),
            test_case.name(),
            test_case.category()
        );
    }

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

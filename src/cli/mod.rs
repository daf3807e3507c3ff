//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::utils::logger::LogLevel;

/// Attendance API contract checker
#[derive(Parser, Debug)]
#[command(name = "attendance-check")]
#[command(version = "0.1.0")]
#[command(about = "Check a running attendance API against its response contracts")]
#[command(long_about = None)]
pub struct Args {
    /// API base URL, including the path prefix
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Config file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Export the summary to a file (JSON, or YAML for .yaml/.yml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also run the login check
    #[arg(long)]
    pub include_auth: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// List the registered checks and exit
    #[arg(long)]
    pub list: bool,

    /// Write the effective configuration to a file and exit
    #[arg(long, value_name = "FILE")]
    pub write_config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Overlay command-line values onto `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
        if self.include_auth {
            config.include_auth = true;
        }
    }
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_str(s).ok_or_else(|| format!("unknown log level: {s}"))
}

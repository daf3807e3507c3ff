//! Output formatters for suite results
//!
//! Provides table, JSON and one-line summary output formats.

use crate::models::{SuiteSummary, TestResult, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    fn format_result_table(&self, result: &TestResult) -> String {
        let status_str = if self.colorize {
            match result.status {
                TestStatus::Pass => "\x1b[32m✓ PASSED\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAILED\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match result.status {
                TestStatus::Pass => "✓ PASSED",
                TestStatus::Fail => "✗ FAILED",
                TestStatus::Error => "! ERROR",
            }
        };

        format!(
            "{:2}. {:24} {} [{:>6}ms]",
            result.number, result.name, status_str, result.duration_ms
        )
    }

    /// Format the run summary
    pub fn format_summary(&self, summary: &SuiteSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &SuiteSummary) -> String {
        let mut output = String::new();

        output.push_str("\n╔══════════════════════════════════════════════════════════════╗\n");
        output.push_str("║  TEST SUMMARY                                                ║\n");
        output.push_str(&format!("║  {:60}║\n", summary.base_url));
        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        for result in &summary.results {
            output.push_str(&format!("║  {}\n", self.format_result_table(result)));
            if let Some(message) = &result.message {
                output.push_str(&format!("║      {message}\n"));
            }
        }

        output.push_str("╠══════════════════════════════════════════════════════════════╣\n");

        if summary.total == 0 {
            output.push_str("║  No tests run                                                ║\n");
            output.push_str("╚══════════════════════════════════════════════════════════════╝\n");
            return output;
        }

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            "║  Total Tests: {:2} | Passed: {} | Failed: {} | Errors: {:2}\n",
            summary.total, pass_str, fail_str, summary.errors
        ));
        output.push_str(&format!(
            "║  Success Rate: {:5.1}% | Duration: {:6}ms\n",
            summary.success_rate, summary.total_duration_ms
        ));
        output.push_str("╚══════════════════════════════════════════════════════════════╝\n");

        if summary.is_all_passed() {
            output.push_str("\nAll attendance API checks PASSED\n");
        } else {
            output.push_str(&format!(
                "\n{} check(s) FAILED. Please check the logs above.\n",
                summary.failed
            ));
        }

        output
    }

    fn format_summary_brief(&self, summary: &SuiteSummary) -> String {
        if summary.total == 0 {
            return format!("{}: no tests run", summary.base_url);
        }
        format!(
            "{}: {}/{} passed ({:.1}%) in {}ms",
            summary.base_url,
            summary.passed,
            summary.total,
            summary.success_rate,
            summary.total_duration_ms
        )
    }
}

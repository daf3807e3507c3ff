//! Attendance API test implementations
//!
//! One test per API capability. Each test is a fixed script of requests plus
//! assertions and yields a single pass/fail [`CaseReport`].
//!
//! ## Test Categories
//!
//! ### Attendance Tests (1-4)
//! - Database Connection
//! - Today's Attendance
//! - Attendance Statistics
//! - Live Attendance Logs
//!
//! ### Directory Tests (5, 8)
//! - Employees List
//! - Categories
//!
//! ### Report Tests (6-7)
//! - Personal Report
//! - Unit Report
//!
//! ### Routing Tests (9)
//! - Invalid Endpoint
//!
//! ### Opt-in (10)
//! - Authentication



pub use attendance::{
    AttendanceStatisticsTest, DatabaseConnectionTest, LiveAttendanceTest, TodayAttendanceTest,
};
pub use auth::AuthenticationTest;
pub use directory::{CategoriesTest, EmployeesListTest};
pub use reports::{PersonalReportTest, UnitReportTest};
pub use routing::InvalidEndpointTest;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::contract::{error_contains, is_success, ContractCheck, Severity};
use crate::http::{truncate, EndpointRequest, HttpClient, Outcome};
use crate::models::{CaseReport, TestCase};

pub const PROBE_ROUTE: &str = "test";
pub const TODAY_ROUTE: &str = "attendance/today";
pub const STATS_ROUTE: &str = "attendance/stats";
pub const LIVE_ROUTE: &str = "attendance/live";
pub const EMPLOYEES_ROUTE: &str = "employees";
pub const PERSONAL_REPORT_ROUTE: &str = "reports/personal";
pub const UNIT_REPORT_ROUTE: &str = "reports/unit";
pub const CATEGORIES_ROUTE: &str = "categories";
pub const UNKNOWN_ROUTE: &str = "invalid/endpoint";
pub const LOGIN_ROUTE: &str = "auth/login";

/// Characters of pretty-printed JSON shown per response
const PAYLOAD_PREVIEW_CHARS: usize = 200;

/// Running record of one test's checks
///
/// Every line is logged as it is recorded and kept for the final report.
/// A single failing line fails the whole test.
#[derive(Debug)]
pub struct Transcript {
    lines: Vec<String>,
    passed: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            passed: true,
        }
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("✓ {message}");
        self.lines.push(format!("✓ {message}"));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("⚠ {message}");
        self.lines.push(format!("⚠ {message}"));
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("✗ {message}");
        self.lines.push(format!("✗ {message}"));
        self.passed = false;
    }

    /// Issue `request` and return its payload when the outcome is a success
    pub async fn call(&mut self, client: &HttpClient, request: &EndpointRequest) -> Option<Value> {
        let outcome = client.execute(request).await;
        self.accept(request, outcome)
    }

    /// Record an outcome, handing back the payload on success
    pub fn accept(&mut self, request: &EndpointRequest, outcome: Outcome) -> Option<Value> {
        match outcome {
            Outcome::Success { status, payload } => {
                info!("Testing {request}: status {status}");
                info!("Response: {}", preview(&payload));
                Some(payload)
            }
            other => {
                debug!("{request}: {}", other.kind());
                self.fail(format!("{request}: {other}"));
                None
            }
        }
    }

    /// Record a contract check; returns whether it passed
    pub fn contract(&mut self, label: &str, check: &ContractCheck) -> bool {
        if !check.success_flag {
            self.fail(format!("{label}: `success` is not true"));
        }
        if !check.missing_top_level.is_empty() {
            self.fail(format!(
                "{label}: missing envelope keys: {}",
                join(&check.missing_top_level)
            ));
        }
        if let Some(missing) = check.warnings() {
            self.warn(format!("{label}: missing fields in response: {}", join(missing)));
        }
        if check.severity == Severity::Hard && !check.missing_fields.is_empty() {
            self.fail(format!(
                "{label}: missing fields: {}",
                join(&check.missing_fields)
            ));
        }
        check.passed()
    }

    /// Record an expected error envelope: `success` false and an `error`
    /// message containing `needle`, compared case-insensitively
    pub fn expect_error(&mut self, label: &str, payload: &Value, needle: &str) -> bool {
        if is_success(payload) {
            self.fail(format!("{label}: `success` should be false"));
            return false;
        }
        if !error_contains(payload, needle) {
            self.fail(format!(
                "{label}: error message {:?} does not contain {needle:?}",
                payload.get("error").cloned().unwrap_or(Value::Null)
            ));
            return false;
        }
        self.pass(format!("{label}: rejected with {needle:?}"));
        true
    }

    pub fn finish(self) -> CaseReport {
        CaseReport::new(self.passed, self.lines)
    }
}

fn preview(payload: &Value) -> String {
    let pretty = serde_json::to_string_pretty(payload).unwrap_or_default();
    truncate(&pretty, PAYLOAD_PREVIEW_CHARS)
}

fn join<'a>(fields: impl IntoIterator<Item = &'a String>) -> String {
    fields
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run a specific test case
pub async fn run_test(
    test_case: TestCase,
    client: &HttpClient,
    config: &AppConfig,
) -> Result<CaseReport> {
    match test_case {
        TestCase::DatabaseConnection => {
            DatabaseConnectionTest::from_config(config)
                .run(client)
                .await
        }
        TestCase::TodayAttendance => TodayAttendanceTest::from_config(config).run(client).await,
        TestCase::AttendanceStatistics => {
            AttendanceStatisticsTest::from_config(config)
                .run(client)
                .await
        }
        TestCase::LiveAttendance => LiveAttendanceTest::from_config(config).run(client).await,
        TestCase::EmployeesList => EmployeesListTest::from_config(config).run(client).await,
        TestCase::PersonalReport => PersonalReportTest::from_config(config).run(client).await,
        TestCase::UnitReport => UnitReportTest::from_config(config).run(client).await,
        TestCase::Categories => CategoriesTest::from_config(config).run(client).await,
        TestCase::InvalidEndpoint => InvalidEndpointTest::from_config(config).run(client).await,
        TestCase::Authentication => AuthenticationTest::from_config(config).run(client).await,
    }
}

#[cfg(test)]
mod tests {
    use super::fake_api::{unreachable_base_url, FakeApi};
    use super::*;
    use crate::contract::Contract;
    use serde_json::json;

    #[test]
    fn test_transcript_failure_is_sticky() {
        let mut transcript = Transcript::new();
        transcript.pass("first");
        transcript.fail("second");
        transcript.pass("third");

        let report = transcript.finish();
        assert!(!report.passed);
        assert_eq!(report.details, vec!["✓ first", "✗ second", "✓ third"]);
    }

    #[test]
    fn test_transcript_soft_warning_keeps_pass() {
        let mut transcript = Transcript::new();
        let check = Contract::new()
            .records(&["pin"])
            .check(&json!({"success": true, "data": [{"name": "A"}]}));

        assert!(transcript.contract("records", &check));
        let report = transcript.finish();
        assert!(report.passed);
        assert_eq!(
            report.details,
            vec!["⚠ records: missing fields in response: pin"]
        );
    }

    #[test]
    fn test_transcript_accept_non_success_fails() {
        let mut transcript = Transcript::new();
        let request = EndpointRequest::get(STATS_ROUTE);
        let payload = transcript.accept(
            &request,
            Outcome::StatusMismatch {
                expected: 200,
                actual: 500,
                body: "{}".to_string(),
            },
        );

        assert!(payload.is_none());
        assert!(!transcript.finish().passed);
    }

    #[test]
    fn test_expect_error() {
        let mut transcript = Transcript::new();
        let payload = json!({"success": false, "error": "Endpoint not found"});
        assert!(transcript.expect_error("unknown route", &payload, "not found"));
        assert!(!transcript.expect_error("unknown route", &payload, "missing"));
        assert!(!transcript.expect_error("unknown route", &json!({"success": true}), "x"));
    }

    #[tokio::test]
    async fn test_every_case_passes_against_healthy_api() {
        let api = FakeApi::spawn().await;
        let client = HttpClient::new(&api.base_url).unwrap();
        let config = AppConfig::default();

        for test_case in TestCase::suite(true) {
            let report = run_test(test_case, &client, &config).await.unwrap();
            assert!(report.passed, "{test_case} failed: {:?}", report.details);
        }
    }

    #[tokio::test]
    async fn test_every_case_fails_when_unreachable() {
        let client = HttpClient::with_timeout(unreachable_base_url().await, 2).unwrap();
        let config = AppConfig::default();

        for test_case in TestCase::suite(true) {
            let report = run_test(test_case, &client, &config).await.unwrap();
            assert!(!report.passed, "{test_case} passed unexpectedly");
            assert!(report.details.iter().any(|line| line.contains("Request failed")));
        }
    }
}

//! Test result models for attendance API checks
//!
//! Defines the endpoint test cases, per-case results, and the run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Endpoint test cases, in registration order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    // Attendance (1-4)
    DatabaseConnection,
    TodayAttendance,
    AttendanceStatistics,
    LiveAttendance,

    // Directory (5)
    EmployeesList,

    // Reports (6-7)
    PersonalReport,
    UnitReport,

    // Directory (8)
    Categories,

    // Routing (9)
    InvalidEndpoint,

    // Opt-in (10)
    Authentication,
}

impl TestCase {
    /// Get test case number (1-10)
    pub fn number(&self) -> u8 {
        match self {
            TestCase::DatabaseConnection => 1,
            TestCase::TodayAttendance => 2,
            TestCase::AttendanceStatistics => 3,
            TestCase::LiveAttendance => 4,
            TestCase::EmployeesList => 5,
            TestCase::PersonalReport => 6,
            TestCase::UnitReport => 7,
            TestCase::Categories => 8,
            TestCase::InvalidEndpoint => 9,
            TestCase::Authentication => 10,
        }
    }

    /// Get test case name
    pub fn name(&self) -> &'static str {
        match self {
            TestCase::DatabaseConnection => "Database Connection",
            TestCase::TodayAttendance => "Today's Attendance",
            TestCase::AttendanceStatistics => "Attendance Statistics",
            TestCase::LiveAttendance => "Live Attendance Logs",
            TestCase::EmployeesList => "Employees List",
            TestCase::PersonalReport => "Personal Report",
            TestCase::UnitReport => "Unit Report",
            TestCase::Categories => "Categories",
            TestCase::InvalidEndpoint => "Invalid Endpoint",
            TestCase::Authentication => "Authentication",
        }
    }

    /// Get test category
    pub fn category(&self) -> &'static str {
        match self {
            TestCase::DatabaseConnection
            | TestCase::TodayAttendance
            | TestCase::AttendanceStatistics
            | TestCase::LiveAttendance => "Attendance",
            TestCase::EmployeesList | TestCase::Categories => "Directory",
            TestCase::PersonalReport | TestCase::UnitReport => "Reports",
            TestCase::InvalidEndpoint => "Routing",
            TestCase::Authentication => "Auth",
        }
    }

    /// The nine standard cases
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::DatabaseConnection,
            TestCase::TodayAttendance,
            TestCase::AttendanceStatistics,
            TestCase::LiveAttendance,
            TestCase::EmployeesList,
            TestCase::PersonalReport,
            TestCase::UnitReport,
            TestCase::Categories,
            TestCase::InvalidEndpoint,
        ]
    }

    /// Standard cases, plus the login check when requested
    pub fn suite(include_auth: bool) -> Vec<TestCase> {
        let mut cases = Self::all();
        if include_auth {
            cases.push(TestCase::Authentication);
        }
        cases
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test {}: {}", self.number(), self.name())
    }
}

/// Test execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    /// The case returned an error or panicked
    Error,
}

impl TestStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✓",
            TestStatus::Fail => "✗",
            TestStatus::Error => "!",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// What a case body hands back to the runner
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub passed: bool,
    pub details: Vec<String>,
}

impl CaseReport {
    pub fn new(passed: bool, details: Vec<String>) -> Self {
        Self { passed, details }
    }
}

/// Result of a single test case execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub number: usize,
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl TestResult {
    pub fn from_report(
        number: usize,
        name: impl Into<String>,
        report: CaseReport,
        duration_ms: u64,
    ) -> Self {
        let status = if report.passed {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        };

        Self {
            number,
            name: name.into(),
            status,
            duration_ms,
            message: None,
            details: report.details,
        }
    }

    pub fn error(
        number: usize,
        name: impl Into<String>,
        duration_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            status: TestStatus::Error,
            duration_ms,
            message: Some(error.into()),
            details: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.name,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Summary of one suite run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failures caused by a case erroring rather than asserting
    pub errors: usize,
    pub success_rate: f64,
    pub total_duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<TestResult>,
}

impl SuiteSummary {
    pub fn new(base_url: impl Into<String>, results: Vec<TestResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = total - passed;
        let errors = results
            .iter()
            .filter(|r| r.status == TestStatus::Error)
            .count();
        let success_rate = if total == 0 {
            0.0
        } else {
            (passed as f64 / total as f64) * 100.0
        };
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();
        let now = Utc::now();

        Self {
            base_url: base_url.into(),
            total,
            passed,
            failed,
            errors,
            success_rate,
            total_duration_ms,
            started_at: now,
            finished_at: now,
            results,
        }
    }

    pub fn with_window(mut self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self.finished_at = finished_at;
        self
    }

    pub fn is_all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status: 0 iff nothing failed
    pub fn exit_status(&self) -> u8 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }
}

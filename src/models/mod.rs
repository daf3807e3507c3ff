//! Data models for attendance API checks
//!
//! This module contains the case identifiers, results and summary types.

mod test_result;

pub use test_result::{CaseReport, SuiteSummary, TestCase, TestResult, TestStatus};

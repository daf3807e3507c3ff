//! Test execution runner
//!
//! Runs the registered attendance checks one after another and turns every
//! outcome, including errors and panics, into a [`TestResult`].

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::http::HttpClient;
use crate::models::{CaseReport, SuiteSummary, TestCase, TestResult};
use crate::tests;
use crate::utils::timer::Timer;

type CaseFn = Box<dyn Fn(HttpClient) -> BoxFuture<'static, Result<CaseReport>> + Send + Sync>;

/// Ordered list of named checks
#[derive(Default)]
pub struct Registry {
    cases: Vec<(String, CaseFn)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(&mut self, name: impl Into<String>, case: F)
    where
        F: Fn(HttpClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CaseReport>> + Send + 'static,
    {
        self.cases
            .push((name.into(), Box::new(move |client| case(client).boxed())));
    }

    pub fn with_case<F, Fut>(mut self, name: impl Into<String>, case: F) -> Self
    where
        F: Fn(HttpClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CaseReport>> + Send + 'static,
    {
        self.register(name, case);
        self
    }

    /// The nine standard checks, plus the login check when enabled
    pub fn standard(config: &AppConfig) -> Self {
        let config = Arc::new(config.clone());

        TestCase::suite(config.include_auth)
            .into_iter()
            .fold(Self::new(), |registry, test_case| {
                let config = Arc::clone(&config);
                registry.with_case(test_case.name(), move |client| {
                    let config = Arc::clone(&config);
                    async move { tests::run_test(test_case, &client, &config).await }
                })
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Test runner bound to one API base URL
pub struct TestRunner {
    client: HttpClient,
}

impl TestRunner {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = HttpClient::with_timeout(base_url, timeout_secs)?;
        Ok(Self { client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Run a single case; never fails
    async fn run_case(&self, number: usize, name: &str, case: &CaseFn) -> TestResult {
        info!("Running {number}. {name}");
        let timer = Timer::start(name);

        let client = self.client.clone();
        let outcome = AssertUnwindSafe(async move { case(client).await })
            .catch_unwind()
            .await;
        let duration_ms = timer.stop();

        match outcome {
            Ok(Ok(report)) => TestResult::from_report(number, name, report, duration_ms),
            Ok(Err(e)) => {
                error!("Test {name} failed with error: {e:#}");
                TestResult::error(number, name, duration_ms, format!("{e:#}"))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Test {name} panicked: {message}");
                TestResult::error(number, name, duration_ms, format!("panicked: {message}"))
            }
        }
    }

    /// Run every registered case in order
    pub async fn run(&self, registry: &Registry) -> Vec<TestResult> {
        let mut results = Vec::with_capacity(registry.len());

        for (idx, (name, case)) in registry.cases.iter().enumerate() {
            let result = self.run_case(idx + 1, name, case).await;
            info!("  {}", result);
            results.push(result);
        }

        results
    }

    /// Run every registered case and summarize
    pub async fn run_suite(&self, registry: &Registry) -> SuiteSummary {
        if registry.is_empty() {
            warn!("No checks registered");
        }
        info!(
            "Starting {} attendance API checks against {} (timeout {}s)",
            registry.len(),
            self.base_url(),
            self.client.timeout_secs()
        );

        let started_at = Utc::now();
        let results = self.run(registry).await;
        let summary =
            SuiteSummary::new(self.base_url(), results).with_window(started_at, Utc::now());

        info!(
            "Checks completed in {}ms - Pass: {}/{} ({:.1}%)",
            summary.total_duration_ms, summary.passed, summary.total, summary.success_rate
        );

        summary
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

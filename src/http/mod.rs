//! HTTP module for attendance API contract checks
//!
//! Provides the request executor and the outcome classification it produces.

mod client;

pub use client::{truncate, EndpointRequest, HttpClient, Outcome, DEFAULT_TIMEOUT_SECS};

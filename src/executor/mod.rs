//! Test execution engine
//!
//! Holds the ordered check registry and runs it sequentially.

mod runner;

pub use runner::{Registry, TestRunner};

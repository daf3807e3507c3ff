//! Response contracts for the attendance API
//!
//! Every response is wrapped in an envelope `{success, data|error}`. The
//! envelope is checked strictly; business fields inside `data` are checked
//! against a declared [`Contract`] whose severity decides whether a missing
//! field fails the case or only produces a warning.

mod envelope;
mod validator;

pub use envelope::{contains_key, error_contains, error_message, is_success, record_count};
pub use validator::{Contract, ContractCheck, DataPath, Severity};

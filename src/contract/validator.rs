//! Field-presence contracts
//!
//! A contract samples the first record of a result set rather than every
//! record: it asks whether one exemplar has the declared shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::envelope::is_success;

/// Where the records to inspect live inside the payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataPath {
    Direct,
    NestedUnderData,
}

/// How missing record fields affect the verdict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Missing fields are reported as a warning only
    Soft,
    /// Missing fields fail the check
    Hard,
}

/// Return the required fields absent from the inspected record.
///
/// With [`DataPath::NestedUnderData`] the payload's `data` key is inspected;
/// when that key is absent every required field is reported missing. A
/// sequence is sampled through its first record, and an empty sequence (or a
/// null `data`) satisfies any contract.
pub fn validate<S: AsRef<str>>(
    payload: &Value,
    required_fields: &[S],
    data_path: DataPath,
) -> BTreeSet<String> {
    let all_missing = || {
        required_fields
            .iter()
            .map(|f| f.as_ref().to_string())
            .collect::<BTreeSet<_>>()
    };

    let target = match data_path {
        DataPath::Direct => payload,
        DataPath::NestedUnderData => match payload.get("data") {
            Some(data) => data,
            None => return all_missing(),
        },
    };

    let exemplar = match target {
        Value::Null => return BTreeSet::new(),
        Value::Array(records) => match records.first() {
            Some(first) => first,
            None => return BTreeSet::new(),
        },
        other => other,
    };

    let Some(record) = exemplar.as_object() else {
        return all_missing();
    };

    required_fields
        .iter()
        .map(|f| f.as_ref())
        .filter(|field: &&str| !record.contains_key(*field))
        .map(str::to_string)
        .collect()
}

/// Declared shape of one endpoint's response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    pub required_top_level: Vec<String>,
    pub required_record: Vec<String>,
    pub data_path: DataPath,
    pub severity: Severity,
}

impl Default for Contract {
    fn default() -> Self {
        Self::new()
    }
}

impl Contract {
    /// `success: true` plus a `data` key, no record fields
    pub fn new() -> Self {
        Self {
            required_top_level: vec!["data".to_string()],
            required_record: Vec::new(),
            data_path: DataPath::NestedUnderData,
            severity: Severity::Soft,
        }
    }

    /// `success: true` and nothing else
    pub fn success_only() -> Self {
        Self {
            required_top_level: Vec::new(),
            ..Self::new()
        }
    }

    pub fn records<S: AsRef<str>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.required_record = fields
            .into_iter()
            .map(|f| f.as_ref().to_string())
            .collect();
        self
    }

    pub fn data_path(mut self, data_path: DataPath) -> Self {
        self.data_path = data_path;
        self
    }

    pub fn hard(mut self) -> Self {
        self.severity = Severity::Hard;
        self
    }

    /// Evaluate the envelope and record fields of `payload`
    pub fn check(&self, payload: &Value) -> ContractCheck {
        let missing_top_level = self
            .required_top_level
            .iter()
            .filter(|field| payload.get(field.as_str()).is_none())
            .cloned()
            .collect();

        let missing_fields = if self.required_record.is_empty() {
            BTreeSet::new()
        } else {
            validate(payload, self.required_record.as_slice(), self.data_path)
        };

        ContractCheck {
            success_flag: is_success(payload),
            missing_top_level,
            missing_fields,
            severity: self.severity,
        }
    }
}

/// Result of applying a [`Contract`] to one payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCheck {
    pub success_flag: bool,
    pub missing_top_level: BTreeSet<String>,
    pub missing_fields: BTreeSet<String>,
    pub severity: Severity,
}

impl ContractCheck {
    pub fn envelope_ok(&self) -> bool {
        self.success_flag && self.missing_top_level.is_empty()
    }

    pub fn passed(&self) -> bool {
        self.envelope_ok() && (self.severity == Severity::Soft || self.missing_fields.is_empty())
    }

    /// Missing record fields that only warrant a warning
    pub fn warnings(&self) -> Option<&BTreeSet<String>> {
        (self.severity == Severity::Soft && !self.missing_fields.is_empty())
            .then_some(&self.missing_fields)
    }
}

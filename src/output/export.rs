//! Result export

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::is_yaml_file;
use crate::models::SuiteSummary;

/// Write the summary as YAML or JSON, chosen by file extension
pub fn save_summary(summary: &SuiteSummary, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = if is_yaml_file(path) {
        serde_yaml::to_string(summary).context("Failed to serialize results")?
    } else {
        serde_json::to_string_pretty(summary).context("Failed to serialize results")?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write results: {}", path.display()))?;
    Ok(())
}

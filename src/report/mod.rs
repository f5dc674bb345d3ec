// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run reporting: terminal summary and exported report files

pub mod formatter;
pub mod output;

use crate::types::*;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use formatter::ReportFormatter;
pub use output::ReportOutputFormat;

/// Persistable record of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub created_at: String,
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn new(source_language: &str, target_languages: &[String], outcome: RunOutcome) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            source_language: source_language.to_string(),
            target_languages: target_languages.to_vec(),
            outcome,
        }
    }
}

/// Print the run outcome to the terminal
pub fn print_report(outcome: &RunOutcome) {
    let formatter = ReportFormatter::new();
    formatter.print(outcome);
}

/// Write the report to `path`, choosing JSON or YAML from its extension.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }
    let content = ReportOutputFormat::for_path(path).serialize(report)?;
    fs::write(path, content).with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}

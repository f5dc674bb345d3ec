// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for article-translate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One unit of translation work: a source article missing from one target tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationTask {
    pub target_lang: String,
    /// `/`-separated path relative to the language root, e.g. `notes/rust.md`.
    pub relative_path: String,
}

impl TranslationTask {
    pub fn new(target_lang: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            target_lang: target_lang.into(),
            relative_path: relative_path.into(),
        }
    }

    /// `<target_lang>/<relative_path>`, the form used in logs and reports.
    pub fn target_ref(&self) -> String {
        format!("{}/{}", self.target_lang, self.relative_path)
    }
}

impl fmt::Display for TranslationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.target_lang, self.relative_path)
    }
}

/// Result of running a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Translated { target_ref: String, path: PathBuf },
    Failed { target_ref: String, error: String },
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Translated { .. })
    }

    pub fn target_ref(&self) -> &str {
        match self {
            TaskOutcome::Translated { target_ref, .. } => target_ref,
            TaskOutcome::Failed { target_ref, .. } => target_ref,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedTranslation {
    pub target_ref: String,
    pub error: String,
}

/// Ordered results of a batch. Both lists are append-only during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedTranslation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    AllSucceeded,
    AllFailed,
    Mixed,
    Empty,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Translated { target_ref, .. } => self.succeeded.push(target_ref),
            TaskOutcome::Failed { target_ref, error } => {
                self.failed.push(FailedTranslation { target_ref, error })
            }
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn kind(&self) -> SummaryKind {
        match (self.succeeded.is_empty(), self.failed.is_empty()) {
            (true, true) => SummaryKind::Empty,
            (false, true) => SummaryKind::AllSucceeded,
            (true, false) => SummaryKind::AllFailed,
            (false, false) => SummaryKind::Mixed,
        }
    }

    pub fn failed_refs(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.target_ref.as_str()).collect()
    }
}

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The prompt template was absent; nothing was touched.
    TemplateMissing,
    /// The source language root holds no Markdown files.
    NoSourceArticles,
    /// Every target tree already has every source article.
    UpToDate,
    /// The translation client could not be built; no task ran.
    ClientUnavailable { reason: String },
    Completed { summary: BatchSummary },
}

impl RunOutcome {
    /// Whether a strict run should report this outcome as a failure.
    pub fn is_failure(&self) -> bool {
        match self {
            RunOutcome::TemplateMissing | RunOutcome::ClientUnavailable { .. } => true,
            RunOutcome::NoSourceArticles | RunOutcome::UpToDate => false,
            RunOutcome::Completed { summary } => !summary.failed.is_empty(),
        }
    }

    pub fn summary(&self) -> Option<&BatchSummary> {
        match self {
            RunOutcome::Completed { summary } => Some(summary),
            _ => None,
        }
    }
}

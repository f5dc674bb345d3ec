// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end translation run.
//!
//! template → scan source → detect gaps → build client → run tasks.
//! Every early exit is a [`RunOutcome`] variant rather than an error, so the
//! caller decides whether a skipped run counts as a failure.

use crate::client::{ChatCompletionClient, ClientConfig, ClientError, Translator};
use crate::config::TranslateConfig;
use crate::gap::gather_tasks;
use crate::prompt::PromptTemplate;
use crate::runner::TaskRunner;
use crate::scan::collect_markdown_files;
use crate::types::{RunOutcome, TranslationTask};
use crate::LOG_TAG;
use anyhow::Result;

/// Pending work computed without touching the translation API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub source_files: Vec<String>,
    pub tasks: Vec<TranslationTask>,
}

/// Scan the source tree and every target tree and list what is missing.
pub fn plan(config: &TranslateConfig) -> Result<Plan> {
    let source_files = collect_markdown_files(&config.source_root())?;
    let tasks = if source_files.is_empty() {
        Vec::new()
    } else {
        gather_tasks(
            &config.articles_root,
            &source_files,
            &config.target_languages,
        )?
    };
    Ok(Plan {
        source_files,
        tasks,
    })
}

/// Run with the HTTP client, taking the credential from the environment.
pub fn run_with_env_client(config: &TranslateConfig) -> Result<RunOutcome> {
    run(config, ChatCompletionClient::from_env)
}

/// Run the pipeline, building the translator with `build_client` only once
/// there is work to do.
pub fn run<T, F>(config: &TranslateConfig, build_client: F) -> Result<RunOutcome>
where
    T: Translator,
    F: FnOnce(&ClientConfig) -> Result<T, ClientError>,
{
    let template = match PromptTemplate::load(&config.prompt_template) {
        Ok(Some(template)) => template,
        Ok(None) => {
            tracing::warn!(
                "{} Missing prompt template {}; skipping translations.",
                LOG_TAG,
                config.prompt_template.display()
            );
            return Ok(RunOutcome::TemplateMissing);
        }
        Err(err) => {
            tracing::warn!("{} Failed to read prompt template: {:#}", LOG_TAG, err);
            return Ok(RunOutcome::TemplateMissing);
        }
    };

    let source = config.languages.resolve(&config.source_language)?;

    let Plan {
        source_files,
        tasks,
    } = plan(config)?;
    if source_files.is_empty() {
        tracing::info!(
            "{} No source articles found under {}; skipping translations.",
            LOG_TAG,
            source.id
        );
        return Ok(RunOutcome::NoSourceArticles);
    }
    if tasks.is_empty() {
        tracing::info!(
            "{} No pending translations; all target languages are up to date.",
            LOG_TAG
        );
        return Ok(RunOutcome::UpToDate);
    }
    tracing::info!(
        "{} {} source article(s), {} pending translation(s)",
        LOG_TAG,
        source_files.len(),
        tasks.len()
    );

    let translator = match build_client(&config.client) {
        Ok(translator) => translator,
        Err(err) => {
            tracing::warn!("{} {}", LOG_TAG, err);
            return Ok(RunOutcome::ClientUnavailable {
                reason: err.to_string(),
            });
        }
    };

    let runner = TaskRunner::new(
        &translator,
        &template,
        &config.articles_root,
        &source,
        &config.languages,
    );
    let summary = runner.run_batch(&tasks);

    if !summary.succeeded.is_empty() {
        tracing::info!(
            "{} Completed {} translation(s): {}",
            LOG_TAG,
            summary.succeeded.len(),
            summary.succeeded.join(", ")
        );
    }
    if !summary.failed.is_empty() {
        tracing::warn!(
            "{} Failed {} translation(s): {}",
            LOG_TAG,
            summary.failed.len(),
            summary.failed_refs().join(", ")
        );
    }
    if summary.total() == 0 {
        tracing::info!("{} No translations were executed.", LOG_TAG);
    }

    Ok(RunOutcome::Completed { summary })
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation task runner
//!
//! Runs tasks one at a time. A task either writes a validated translation or
//! records a failure; it never aborts the batch and never leaves a partial
//! file in the target tree.

use crate::client::Translator;
use crate::i18n::{Language, LanguageTable};
use crate::prompt::{PromptTemplate, PromptVariables};
use crate::types::{BatchSummary, TaskOutcome, TranslationTask};
use crate::LOG_TAG;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker every translated article must open with (YAML front matter).
pub const FRONT_MATTER_MARKER: &str = "---";

pub struct TaskRunner<'a, T: Translator + ?Sized> {
    translator: &'a T,
    template: &'a PromptTemplate,
    articles_root: &'a Path,
    source: &'a Language,
    languages: &'a LanguageTable,
}

impl<'a, T: Translator + ?Sized> TaskRunner<'a, T> {
    pub fn new(
        translator: &'a T,
        template: &'a PromptTemplate,
        articles_root: &'a Path,
        source: &'a Language,
        languages: &'a LanguageTable,
    ) -> Self {
        Self {
            translator,
            template,
            articles_root,
            source,
            languages,
        }
    }

    /// Run `tasks` in order, collecting successes and failures.
    pub fn run_batch(&self, tasks: &[TranslationTask]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for task in tasks {
            tracing::info!(
                "{} Translating {}/{} -> {}",
                LOG_TAG,
                self.source.id,
                task.relative_path,
                task.target_lang
            );
            summary.record(self.run_task(task));
        }
        summary
    }

    /// Run one task to completion. Every error becomes a `Failed` outcome.
    pub fn run_task(&self, task: &TranslationTask) -> TaskOutcome {
        let target_ref = task.target_ref();
        match self.translate(task) {
            Ok(path) => {
                tracing::info!(
                    "{} Created {} from {}/{}",
                    LOG_TAG,
                    target_ref,
                    self.source.id,
                    task.relative_path
                );
                TaskOutcome::Translated { target_ref, path }
            }
            Err(err) => {
                let error = format!("{:#}", err);
                tracing::warn!("{} Translation failed for {}: {}", LOG_TAG, target_ref, error);
                TaskOutcome::Failed { target_ref, error }
            }
        }
    }

    fn translate(&self, task: &TranslationTask) -> Result<PathBuf> {
        let target = self.languages.resolve(&task.target_lang)?;

        let source_path = article_path(self.articles_root, &self.source.id, &task.relative_path);
        let source_content = fs::read_to_string(&source_path).with_context(|| {
            format!(
                "reading source file {}/{}",
                self.source.id, task.relative_path
            )
        })?;

        let prompt = self.template.render(&PromptVariables {
            source: self.source,
            target: &target,
            article_filename: &task.relative_path,
            source_content: &source_content,
        });
        tracing::debug!(
            "{} prompt for {} is {} bytes",
            LOG_TAG,
            task.target_ref(),
            prompt.len()
        );

        let translated = self.translator.complete(&prompt)?;
        let translated = translated.trim();
        if !has_front_matter(translated) {
            return Err(anyhow!("translated output missing YAML front matter"));
        }

        let target_path = article_path(self.articles_root, &target.id, &task.relative_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        fs::write(&target_path, ensure_trailing_newline(translated))
            .with_context(|| format!("writing {}", target_path.display()))?;

        Ok(target_path)
    }
}

/// `<articles_root>/<lang>/<relative_path>` with `/` split into components.
pub fn article_path(articles_root: &Path, lang: &str, relative_path: &str) -> PathBuf {
    let mut path = articles_root.join(lang);
    for part in relative_path.split('/').filter(|part| !part.is_empty()) {
        path.push(part);
    }
    path
}

pub fn has_front_matter(text: &str) -> bool {
    text.trim_start().starts_with(FRONT_MATTER_MARKER)
}

pub fn ensure_trailing_newline(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

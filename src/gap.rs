// SPDX-License-Identifier: PMPL-1.0-or-later

//! Gap detection: which source articles are missing from which target trees.

use crate::scan::collect_markdown_files;
use crate::types::TranslationTask;
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

/// Source paths absent from `existing`, in source order.
pub fn missing_paths<'a>(source: &'a [String], existing: &[String]) -> Vec<&'a str> {
    let existing: HashSet<&str> = existing.iter().map(String::as_str).collect();
    source
        .iter()
        .map(String::as_str)
        .filter(|path| !existing.contains(path))
        .collect()
}

/// Build tasks from already-scanned trees.
///
/// `targets` pairs each target language with its existing files. Tasks come
/// out target-major in the order given, then in source order, so repeated
/// runs process the same work in the same order.
pub fn plan_tasks(source: &[String], targets: &[(String, Vec<String>)]) -> Vec<TranslationTask> {
    let mut tasks = Vec::new();
    for (lang, existing) in targets {
        for path in missing_paths(source, existing) {
            tasks.push(TranslationTask::new(lang.clone(), path));
        }
    }
    tasks
}

/// Scan `<articles_root>/<lang>` for each target and plan the missing work.
pub fn gather_tasks(
    articles_root: &Path,
    source: &[String],
    target_languages: &[String],
) -> Result<Vec<TranslationTask>> {
    let mut targets = Vec::with_capacity(target_languages.len());
    for lang in target_languages {
        let existing = collect_markdown_files(&articles_root.join(lang))?;
        tracing::debug!(
            "{} {} has {} existing article(s)",
            crate::LOG_TAG,
            lang,
            existing.len()
        );
        targets.push((lang.clone(), existing));
    }
    Ok(plan_tasks(source, &targets))
}

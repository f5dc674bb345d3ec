// SPDX-License-Identifier: PMPL-1.0-or-later

//! `doctor`: checks that a translation run has what it needs.

use crate::config::TranslateConfig;
use crate::scan::collect_markdown_files;
use anyhow::{anyhow, Result};
use colored::Colorize;
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ok,
    Warn,
    Error,
}

/// One labelled line of `doctor` output.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub label: &'static str,
    pub level: Level,
    pub detail: String,
}

/// What a single check found, before it is labelled.
type Finding = (Level, String);

pub fn run_self_diagnostics(config: &TranslateConfig) -> Result<()> {
    println!("article-translate self-diagnostics");
    println!();

    let checks = collect_diagnostics(config, |var| env::var(var).ok());
    for entry in &checks {
        let tag = match entry.level {
            Level::Ok => "OK".green(),
            Level::Warn => "WARN".yellow(),
            Level::Error => "ERR".red(),
        };
        println!("  [{:>4}] {:22} {}", tag, entry.label, entry.detail);
    }

    if checks.iter().any(|entry| entry.level == Level::Error) {
        Err(anyhow!("self-diagnostics reported issues"))
    } else {
        Ok(())
    }
}

/// Run every check. `lookup_env` stands in for the process environment.
pub fn collect_diagnostics<F>(config: &TranslateConfig, lookup_env: F) -> Vec<Diagnostic>
where
    F: Fn(&str) -> Option<String>,
{
    let mut findings: Vec<(&'static str, Finding)> = vec![(
        "version",
        (
            Level::Ok,
            format!("article-translate {}", env!("CARGO_PKG_VERSION")),
        ),
    )];

    findings.push(("prompt template", check_template(&config.prompt_template)));
    findings.push(("source articles", check_source_root(&config.source_root())));
    for lang in &config.target_languages {
        findings.push(("target articles", check_target_root(lang, &config.language_root(lang))));
    }

    let mut languages = vec![config.source_language.as_str()];
    languages.extend(config.target_languages.iter().map(String::as_str));
    for lang in languages {
        let finding = match config.languages.resolve(lang) {
            Ok(resolved) => (
                Level::Ok,
                format!("{} -> {} ({})", lang, resolved.label, resolved.code),
            ),
            Err(err) => (Level::Error, err.to_string()),
        };
        findings.push(("language metadata", finding));
    }

    findings.push(("API credential", check_credential(&config.client.api_key_env, &lookup_env)));
    findings.push((
        "endpoint",
        match config.client.endpoint() {
            Ok(url) => (Level::Ok, format!("{} (model {})", url, config.client.model)),
            Err(err) => (Level::Error, err.to_string()),
        },
    ));

    findings
        .into_iter()
        .map(|(label, (level, detail))| Diagnostic {
            label,
            level,
            detail,
        })
        .collect()
}

fn check_template(path: &Path) -> Finding {
    if path.is_file() {
        (Level::Ok, format!("{} exists", path.display()))
    } else if path.exists() {
        (
            Level::Error,
            format!("{} exists but is not a regular file", path.display()),
        )
    } else {
        (
            Level::Error,
            format!("{} missing (translations will be skipped)", path.display()),
        )
    }
}

fn check_source_root(root: &Path) -> Finding {
    match collect_markdown_files(root) {
        Ok(files) if !files.is_empty() => (
            Level::Ok,
            format!("{} article(s) under {}", files.len(), root.display()),
        ),
        Ok(_) => (
            Level::Warn,
            format!("no Markdown files under {}", root.display()),
        ),
        Err(err) => (Level::Error, format!("{:#}", err)),
    }
}

fn check_target_root(lang: &str, root: &Path) -> Finding {
    if !root.exists() {
        return (
            Level::Warn,
            format!("{} missing (created on first translation)", root.display()),
        );
    }
    match collect_markdown_files(root) {
        Ok(files) => (Level::Ok, format!("{}: {} article(s)", lang, files.len())),
        Err(err) => (Level::Error, format!("{:#}", err)),
    }
}

fn check_credential<F>(env_key: &str, lookup_env: &F) -> Finding
where
    F: Fn(&str) -> Option<String>,
{
    match lookup_env(env_key) {
        Some(value) if !value.trim().is_empty() => {
            (Level::Ok, format!("configured ({})", env_key))
        }
        _ => (
            Level::Error,
            format!("not configured (set {} to enable)", env_key),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> TranslateConfig {
        TranslateConfig {
            articles_root: dir.path().join("articles"),
            prompt_template: dir.path().join("prompt.txt"),
            ..TranslateConfig::default()
        }
    }

    #[test]
    fn missing_template_and_credential_are_errors() {
        let dir = TempDir::new().unwrap();
        let checks = collect_diagnostics(&config_in(&dir), |_| None);

        let errors: Vec<&str> = checks
            .iter()
            .filter(|c| c.level == Level::Error)
            .map(|c| c.label)
            .collect();
        assert!(errors.contains(&"prompt template"));
        assert!(errors.contains(&"API credential"));
        assert!(!errors.contains(&"target articles"));
    }

    #[test]
    fn healthy_setup_has_no_errors() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        fs::write(&config.prompt_template, "{{SOURCE_CONTENT}}").unwrap();
        fs::create_dir_all(config.source_root()).unwrap();
        fs::write(config.source_root().join("a.md"), "---\n---\n").unwrap();

        let checks = collect_diagnostics(&config, |_| Some("key".to_string()));
        assert!(checks.iter().all(|c| c.level != Level::Error), "{:?}", checks);
        // Absent target roots are only warnings.
        assert!(checks
            .iter()
            .any(|c| c.label == "target articles" && c.level == Level::Warn));
    }

    #[test]
    fn template_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.prompt_template = dir.path().to_path_buf();

        let checks = collect_diagnostics(&config, |_| Some("key".to_string()));
        let template = checks
            .iter()
            .find(|c| c.label == "prompt template")
            .expect("template check present");
        assert_eq!(template.level, Level::Error);
        assert!(template.detail.contains("not a regular file"));
    }

    #[test]
    fn unknown_target_language_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        config.target_languages.push("fr".to_string());

        let checks = collect_diagnostics(&config, |_| Some("key".to_string()));
        assert!(checks
            .iter()
            .any(|c| c.label == "language metadata" && c.level == Level::Error));
    }
}

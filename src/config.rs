// SPDX-License-Identifier: PMPL-1.0-or-later

//! Run configuration.
//!
//! Every field has a default matching the site layout, so a config file is
//! optional. When one is given, relative paths inside it are resolved against
//! the file's own directory rather than the working directory.

use crate::client::ClientConfig;
use crate::i18n::LanguageTable;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    /// Parent of the per-language roots (`<articles_root>/<lang>/**/*.md`).
    pub articles_root: PathBuf,
    pub prompt_template: PathBuf,
    pub source_language: String,
    /// Processed in this order.
    pub target_languages: Vec<String>,
    pub languages: LanguageTable,
    pub client: ClientConfig,
    /// Exit non-zero when the run is skipped or any task fails.
    pub strict: bool,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            articles_root: PathBuf::from("src/articles"),
            prompt_template: PathBuf::from("scripts/translation-prompt.txt"),
            source_language: "zh".to_string(),
            target_languages: vec!["en".to_string(), "jp".to_string()],
            languages: LanguageTable::default(),
            client: ClientConfig::default(),
            strict: false,
        }
    }
}

impl TranslateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: TranslateConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml config {}", path.display()))?,
            _ => {
                return Err(anyhow!(
                    "unsupported config extension for {} (expected .json, .yaml or .yml)",
                    path.display()
                ))
            }
        };

        if let Some(base) = path.parent() {
            config.articles_root = rebase(base, &config.articles_root);
            config.prompt_template = rebase(base, &config.prompt_template);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() {
            bail!("source_language must not be empty");
        }

        let mut seen = HashSet::new();
        for lang in &self.target_languages {
            if lang.trim().is_empty() {
                bail!("target_languages contains an empty entry");
            }
            if lang == &self.source_language {
                bail!("target language '{}' is also the source language", lang);
            }
            if !seen.insert(lang.as_str()) {
                bail!("target language '{}' is listed more than once", lang);
            }
        }

        if !(0.0..=2.0).contains(&self.client.temperature) {
            bail!(
                "client.temperature must be within 0.0..=2.0 (got {})",
                self.client.temperature
            );
        }
        if self.client.model.trim().is_empty() {
            bail!("client.model must not be empty");
        }
        if self.client.api_key_env.trim().is_empty() {
            bail!("client.api_key_env must not be empty");
        }
        Ok(())
    }

    pub fn language_root(&self, lang: &str) -> PathBuf {
        self.articles_root.join(lang)
    }

    pub fn source_root(&self) -> PathBuf {
        self.language_root(&self.source_language)
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

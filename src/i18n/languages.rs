// SPDX-License-Identifier: PMPL-1.0-or-later

//! Label and API-code tables keyed by language identifier.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A language identifier together with both of its display forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Directory name under the articles root.
    pub id: String,
    /// Human-readable name used inside prompts.
    pub label: String,
    /// Code handed to the external model.
    pub code: String,
}

/// Static label/code mappings.
///
/// Deserialises from a config block of the form:
///
/// ```yaml
/// labels: { zh: Simplified Chinese, en: English }
/// codes: { zh: zh, en: en }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTable {
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub codes: BTreeMap<String, String>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        let mut table = Self {
            labels: BTreeMap::new(),
            codes: BTreeMap::new(),
        };
        table.insert("zh", "Simplified Chinese", "zh");
        table.insert("en", "English", "en");
        table.insert("jp", "Japanese", "ja");
        table
    }
}

impl LanguageTable {
    /// Register (or replace) both display forms for `id`.
    pub fn insert(&mut self, id: &str, label: &str, code: &str) {
        self.labels.insert(id.to_string(), label.to_string());
        self.codes.insert(id.to_string(), code.to_string());
    }

    /// Look up both display forms for `id`.
    ///
    /// Fails when either mapping lacks the identifier or holds a blank value.
    pub fn resolve(&self, id: &str) -> Result<Language> {
        let label = self
            .labels
            .get(id)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("no display label configured for language '{}'", id))?;
        let code = self
            .codes
            .get(id)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("no API language code configured for language '{}'", id))?;

        Ok(Language {
            id: id.to_string(),
            label: label.to_string(),
            code: code.to_string(),
        })
    }
}

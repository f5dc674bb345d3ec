// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prompt template loading and rendering.
//!
//! Templates carry `{{NAME}}` placeholders. Rendering is a single left-to-right
//! pass over the template: substituted values are copied verbatim and never
//! scanned again, so article bodies containing `{{ARTICLE_FILENAME}}` or stray
//! `{{` survive untouched. Unknown placeholders are left in place.

use crate::i18n::Language;
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

pub const SOURCE_LANGUAGE_LABEL: &str = "SOURCE_LANGUAGE_LABEL";
pub const SOURCE_LANGUAGE_CODE: &str = "SOURCE_LANGUAGE_CODE";
pub const TARGET_LANGUAGE_LABEL: &str = "TARGET_LANGUAGE_LABEL";
pub const TARGET_LANGUAGE_CODE: &str = "TARGET_LANGUAGE_CODE";
pub const ARTICLE_FILENAME: &str = "ARTICLE_FILENAME";
pub const SOURCE_CONTENT: &str = "SOURCE_CONTENT";

/// Loaded once per run and shared read-only by every task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

/// Values substituted into the template for one task.
#[derive(Debug, Clone, Copy)]
pub struct PromptVariables<'a> {
    pub source: &'a Language,
    pub target: &'a Language,
    pub article_filename: &'a str,
    pub source_content: &'a str,
}

impl<'a> PromptVariables<'a> {
    pub fn pairs(&self) -> [(&'static str, &'a str); 6] {
        [
            (SOURCE_LANGUAGE_LABEL, self.source.label.as_str()),
            (SOURCE_LANGUAGE_CODE, self.source.code.as_str()),
            (TARGET_LANGUAGE_LABEL, self.target.label.as_str()),
            (TARGET_LANGUAGE_CODE, self.target.code.as_str()),
            (ARTICLE_FILENAME, self.article_filename),
            (SOURCE_CONTENT, self.source_content),
        ]
    }
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read the template at `path`.
    ///
    /// A missing file is `Ok(None)`; the caller decides whether that disables
    /// the run. Any other read failure is an error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(Self::new(text))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("reading prompt template {}", path.display()))
            }
        }
    }

    pub fn render(&self, vars: &PromptVariables<'_>) -> String {
        render_template(&self.text, &vars.pairs())
    }
}

/// Replace every `{{KEY}}` whose key appears in `vars`.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after_open[..end];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => {
                out.push_str(value);
                rest = &after_open[end + 2..];
            }
            None => {
                // Advance one brace so `{{{KEY}}}` still resolves its inner token.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_occurrence() {
        let out = render_template("{{A}}-{{B}}-{{A}}", &[("A", "1"), ("B", "2")]);
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn unknown_placeholders_pass_through() {
        let out = render_template("{{A}} {{UNKNOWN}}", &[("A", "x")]);
        assert_eq!(out, "x {{UNKNOWN}}");
    }

    #[test]
    fn unterminated_braces_are_kept() {
        let out = render_template("{{A}} then {{ never closed", &[("A", "x")]);
        assert_eq!(out, "x then {{ never closed");
    }

    #[test]
    fn triple_braces_resolve_inner_token() {
        let out = render_template("{{{A}}}", &[("A", "x")]);
        assert_eq!(out, "{x}");
    }

    #[test]
    fn values_are_not_rescanned() {
        let out = render_template("{{A}}|{{B}}", &[("A", "{{B}}"), ("B", "b")]);
        assert_eq!(out, "{{B}}|b");
    }
}

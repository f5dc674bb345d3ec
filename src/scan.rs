// SPDX-License-Identifier: PMPL-1.0-or-later

//! Markdown tree scanning
//!
//! Lists every `.md` file below a language root as a `/`-separated relative
//! path. These paths are the join key between the source tree and each target
//! tree, so they are normalised and sorted.

use anyhow::{Context, Result};
use std::io;
use std::path::{Component, Path};
use walkdir::WalkDir;

pub const MARKDOWN_EXTENSION: &str = ".md";

/// Collect the relative paths of all Markdown files under `root`.
///
/// A missing root yields an empty list: a target language that has no
/// translations yet is a normal state. Any other I/O error is returned.
pub fn collect_markdown_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 && is_not_found(&err) => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("scanning {}", root.display()));
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        let is_markdown = entry
            .file_name()
            .to_str()
            .map(|name| name.ends_with(MARKDOWN_EXTENSION))
            .unwrap_or(false);
        if !is_markdown {
            continue;
        }

        if let Some(relative) = relative_key(root, entry.path()) {
            files.push(relative);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_not_found(err: &walkdir::Error) -> bool {
    err.io_error()
        .map(|io_err| io_err.kind() == io::ErrorKind::NotFound)
        .unwrap_or(false)
}

/// `path` relative to `root`, joined with `/` regardless of platform.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

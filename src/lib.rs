// SPDX-License-Identifier: PMPL-1.0-or-later

//! article-translate — incremental translation of Markdown article trees.
//!
//! Articles are authored in one source language under
//! `<articles_root>/<source>/` and mirrored into each target language under
//! `<articles_root>/<target>/`. A run finds the source articles a target tree
//! is missing and fills each gap by sending a templated prompt to an
//! OpenAI-compatible chat-completion API. Existing translations are never
//! touched, so the job can run on every build.
//!
//! PIPELINE:
//! 1. **Scan**: list `.md` files per language root ([`scan`]).
//! 2. **Gap**: diff source against each target ([`gap`]).
//! 3. **Prompt**: render the template for one article ([`prompt`]).
//! 4. **Client**: send it to the model ([`client`]).
//! 5. **Run**: validate and write each result, one task at a time
//!    ([`runner`], [`pipeline`]).

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod gap;
pub mod i18n;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod scan;
pub mod types;

/// Prefix on every log line emitted by a run.
pub const LOG_TAG: &str = "[translate-articles]";

// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language metadata for the translation pipeline.
//!
//! Articles live under directories named by a short *language identifier*
//! (`zh`, `en`, `jp`). The identifier is a filesystem key only; prompts need a
//! human-readable label and the code the model understands, which may differ
//! from the directory name (`jp` is sent as `ja`).
//!
//! | Id | Label              | API code |
//! |----|--------------------|----------|
//! | zh | Simplified Chinese | zh       |
//! | en | English            | en       |
//! | jp | Japanese           | ja       |
//!
//! Labels and codes are two separate mappings. An identifier must appear in
//! both before any prompt is rendered for it; lookups never fall back to the
//! identifier itself.

mod languages;

pub use languages::{Language, LanguageTable};

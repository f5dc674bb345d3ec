// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal rendering of run outcomes

use crate::types::*;
use colored::*;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&self, outcome: &RunOutcome) {
        println!("\n{}", "=== ARTICLE TRANSLATION SUMMARY ===".bold().cyan());

        match outcome {
            RunOutcome::TemplateMissing => {
                println!("  {}", "Skipped: prompt template missing".yellow());
            }
            RunOutcome::NoSourceArticles => {
                println!("  {}", "Skipped: no source articles".yellow());
            }
            RunOutcome::UpToDate => {
                println!("  {}", "Nothing to do: all target languages are up to date".green());
            }
            RunOutcome::ClientUnavailable { reason } => {
                println!("  {} {}", "Skipped: translation client unavailable:".yellow(), reason);
            }
            RunOutcome::Completed { summary } => self.print_summary(summary),
        }
        println!();
    }

    fn print_summary(&self, summary: &BatchSummary) {
        let headline = match summary.kind() {
            SummaryKind::AllSucceeded => format!(
                "All {} translation(s) succeeded",
                summary.succeeded.len()
            )
            .green(),
            SummaryKind::AllFailed => {
                format!("All {} translation(s) failed", summary.failed.len()).red()
            }
            SummaryKind::Mixed => format!(
                "{} succeeded, {} failed",
                summary.succeeded.len(),
                summary.failed.len()
            )
            .yellow(),
            SummaryKind::Empty => "No translations were executed".normal(),
        };
        println!("  {}", headline.bold());

        if !summary.succeeded.is_empty() {
            println!();
            println!("  Translated:");
            for target_ref in &summary.succeeded {
                println!("    {} {}", "+".green(), target_ref);
            }
        }

        if !summary.failed.is_empty() {
            println!();
            println!("  Failed:");
            for failure in &summary.failed {
                println!("    {} {}", "x".red(), failure.target_ref);
                println!("      {}", failure.error.dimmed());
            }
        }
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

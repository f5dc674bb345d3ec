// SPDX-License-Identifier: PMPL-1.0-or-later

//! article-translate: fill translation gaps in language-coded Markdown trees
//!
//! Meant to run as a build step. By default a run never fails the build:
//! missing templates, missing credentials and failed articles are logged and
//! the process exits 0. `--strict` (or `strict: true` in the config) turns
//! those into a non-zero exit.

use anyhow::Result;
use article_translate::config::TranslateConfig;
use article_translate::report::{self, RunReport};
use article_translate::{diagnostics, pipeline, LOG_TAG};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "article-translate")]
#[command(version)]
#[command(about = "Translate missing Markdown articles with an OpenAI-compatible model")]
#[command(long_about = None)]
struct Cli {
    /// Config file (.json, .yaml or .yml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate every article missing from a target tree (default)
    Run(RunArgs),

    /// List pending translations without calling the API
    Plan {
        #[command(flatten)]
        tree: TreeArgs,

        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check template, article roots, language metadata and credentials
    Doctor {
        #[command(flatten)]
        tree: TreeArgs,
    },
}

#[derive(Args, Default)]
struct TreeArgs {
    /// Directory holding one subdirectory per language
    #[arg(short, long, value_name = "DIR")]
    articles: Option<PathBuf>,

    /// Prompt template file
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Target language (repeatable; replaces the configured list)
    #[arg(short, long = "target", value_name = "LANG")]
    targets: Vec<String>,
}

#[derive(Args, Default)]
struct RunArgs {
    #[command(flatten)]
    tree: TreeArgs,

    /// Write a run report (format from extension: .json, .yaml, .yml)
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Exit non-zero when translations are skipped or fail
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run(RunArgs::default()));
    match command {
        Commands::Run(args) => {
            let strict_flag = args.strict;
            match run(cli.config, args) {
                Ok(code) => code,
                Err(err) => {
                    tracing::warn!("{} Unexpected error: {:#}", LOG_TAG, err);
                    exit_code(strict_flag)
                }
            }
        }
        Commands::Plan { tree, json } => report_errors(plan(cli.config, tree, json)),
        Commands::Doctor { tree } => report_errors(
            load_config(cli.config, tree)
                .and_then(|config| diagnostics::run_self_diagnostics(&config)),
        ),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>, tree: TreeArgs) -> Result<TranslateConfig> {
    let mut config = match path {
        Some(path) => TranslateConfig::load(&path)?,
        None => TranslateConfig::default(),
    };

    if let Some(articles) = tree.articles {
        config.articles_root = articles;
    }
    if let Some(template) = tree.template {
        config.prompt_template = template;
    }
    if !tree.targets.is_empty() {
        config.target_languages = tree.targets;
    }

    config.validate()?;
    Ok(config)
}

fn run(config_path: Option<PathBuf>, args: RunArgs) -> Result<ExitCode> {
    let mut config = load_config(config_path, args.tree)?;
    config.strict |= args.strict;

    let outcome = match pipeline::run_with_env_client(&config) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!("{} Unexpected error: {:#}", LOG_TAG, err);
            return Ok(exit_code(config.strict));
        }
    };

    report::print_report(&outcome);

    if let Some(path) = args.report {
        let run_report = RunReport::new(
            &config.source_language,
            &config.target_languages,
            outcome.clone(),
        );
        match report::write_report(&run_report, &path) {
            Ok(()) => tracing::info!("{} Report saved to {}", LOG_TAG, path.display()),
            Err(err) => tracing::warn!("{} Failed to write report: {:#}", LOG_TAG, err),
        }
    }

    Ok(exit_code(config.strict && outcome.is_failure()))
}

fn plan(config_path: Option<PathBuf>, tree: TreeArgs, json: bool) -> Result<()> {
    let config = load_config(config_path, tree)?;
    let plan = pipeline::plan(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan.tasks)?);
        return Ok(());
    }

    println!(
        "Source: {} ({} article(s))",
        config.source_root().display(),
        plan.source_files.len()
    );
    if plan.source_files.is_empty() {
        println!("  {}", "No source articles found.".yellow());
        return Ok(());
    }
    if plan.tasks.is_empty() {
        println!("  {}", "All target languages are up to date.".green());
        return Ok(());
    }

    for lang in &config.target_languages {
        let pending: Vec<_> = plan
            .tasks
            .iter()
            .filter(|task| &task.target_lang == lang)
            .collect();
        println!("\n{} {} pending", lang.as_str().bold(), pending.len());
        for task in pending {
            println!("  {}", task.relative_path);
        }
    }
    println!("\nTotal pending: {}", plan.tasks.len());
    Ok(())
}

fn report_errors(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

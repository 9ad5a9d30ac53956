//! tslint-to-eslint-config CLI
//!
//! Converts a TSLint configuration, and optionally editor settings and
//! comment directives, to ESLint.

mod cli;
mod commands;
mod file_finder;
mod output;
mod packages;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;
use tslint_to_eslint_core::{ConversionSettings, builtin_converters};

use crate::cli::Cli;
use crate::commands::comments::run_comments;
use crate::commands::convert::run_convert;
use crate::commands::editor::run_editor;
use crate::output::{MigrationReport, output_report};
use crate::packages::{PackageManager, required_packages};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let settings = ConversionSettings {
        prettier: cli.prettier,
        type_checked: cli.type_checked,
    };
    let converters = builtin_converters();
    let base_dir = std::env::current_dir().into_diagnostic()?;

    let converted = run_convert(&cli, &converters, &settings)?;

    let editor = cli
        .editor
        .as_deref()
        .map(|path| run_editor(path, &settings, cli.dry_run))
        .transpose()?;

    let comments = cli
        .comments
        .as_deref()
        .map(|patterns| {
            run_comments(
                patterns,
                &converted.exclude,
                &base_dir,
                &converters,
                &settings,
                cli.dry_run,
            )
        })
        .transpose()?;

    let report = MigrationReport {
        output_path: cli.config.clone(),
        output: converted.output,
        dry_run: cli.dry_run,
        packages: required_packages(&converted.eslint_config),
        package_manager: PackageManager::detect(&base_dir),
        conversion: converted.conversion,
        editor,
        comments,
    };

    output_report(&report, cli.format)
}

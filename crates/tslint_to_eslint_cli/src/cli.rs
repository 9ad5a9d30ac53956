//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Converts a TSLint configuration to the closest possible ESLint equivalent
#[derive(Parser, Debug)]
#[command(name = "tslint-to-eslint-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TSLint configuration file to convert
    #[arg(long, value_name = "PATH", default_value = "tslint.json")]
    pub tslint: PathBuf,

    /// ESLint configuration file to write
    #[arg(short, long, value_name = "PATH", default_value = ".eslintrc.js")]
    pub config: PathBuf,

    /// Existing ESLint configuration to build on (defaults to the output file when it exists)
    #[arg(long, value_name = "PATH")]
    pub eslint: Option<PathBuf>,

    /// VS Code settings file to convert in place
    #[arg(long, value_name = "PATH")]
    pub editor: Option<PathBuf>,

    /// Rewrite tslint: comment directives in files matching these globs
    #[arg(long, value_name = "GLOB", num_args = 0..)]
    pub comments: Option<Vec<String>>,

    /// Leave formatting rules to Prettier
    #[arg(long)]
    pub prettier: bool,

    /// Generate a configuration that uses type information
    #[arg(long)]
    pub type_checked: bool,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// How the conversion report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Text,
    /// Machine-readable JSON
    Json,
}

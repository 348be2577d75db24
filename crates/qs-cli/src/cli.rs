//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// QueryShape - canonical SQL templates, parameters and table references
#[derive(Parser, Debug)]
#[command(name = "qs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a queryshape.yml config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override SQL dialect (mysql, postgres, generic)
    #[arg(short, long, global = true)]
    pub dialect: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract templates, params and tables from SQL text
    Extract(ExtractArgs),

    /// Print identifiers with their shard suffix generalized
    Normalize(NormalizeArgs),
}

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// SQL text (reads --file or stdin when omitted)
    pub sql: Option<String>,

    /// Read SQL from a file
    #[arg(short, long, conflicts_with = "sql")]
    pub file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: ExtractOutput,

    /// Include a SHA-256 fingerprint per template
    #[arg(long)]
    pub fingerprint: bool,
}

/// Extract output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutput {
    /// JSON document with every statement
    Json,
    /// Human-readable report
    Pretty,
    /// One template per line
    Template,
}

/// Arguments for the normalize command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Schema or table names to normalize
    #[arg(required = true)]
    pub names: Vec<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

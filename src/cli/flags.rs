use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::types::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "phish-sentry",
    version,
    about = "Passive phishing and brand-impersonation checks for URLs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to config file (TOML). Default: config/phish-sentry.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Increase verbosity (debug, trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "markdown", global = true)]
    pub format: OutputFormatArg,

    /// Output file (stdout when omitted)
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assess one or more URLs (domain checks, page fetch, content checks)
    Scan {
        #[arg(required = true)]
        urls: Vec<String>,
        /// Domain checks only; do not fetch pages
        #[arg(long)]
        no_fetch: bool,
    },
    /// Run the domain checks on a single URL
    Domain { url: String },
    /// Run the content checks on saved markup
    Html {
        /// File holding the page markup
        #[arg(long)]
        file: PathBuf,
        /// URL the markup was served from
        #[arg(long)]
        url: String,
    },
    /// List the effective brand registry, or a single brand by name
    Brands { name: Option<String> },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Jsonl,
    Markdown,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Jsonl => OutputFormat::Jsonl,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

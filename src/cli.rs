use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::io::OutputFormat;
use crate::service::ModelChoice;

pub mod commands;
pub mod setup;

#[derive(Parser, Debug)]
#[command(name = "code-assist")]
#[command(about = "Code snippet analysis and model-backed explanations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the nearest .code-assist.toml)
    #[arg(short, long, global = true, env = "CODE_ASSIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format, lint and look for duplicate functions locally
    Analyze {
        /// Source file (reads stdin when omitted)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Ask a model to review and annotate a snippet
    Explain {
        /// Source file (reads stdin when omitted)
        path: Option<PathBuf>,

        /// Model selector: qwen3 or deepseek-3.1
        #[arg(short, long, default_value = "qwen3")]
        model: ModelChoice,
    },

    /// Send a free-form prompt to a model
    Infer {
        /// Prompt text
        #[arg(short, long)]
        prompt: String,

        /// Model selector: qwen3 or deepseek-3.1
        #[arg(short, long, default_value = "qwen3")]
        model: ModelChoice,
    },

    /// Answer JSON-lines requests from stdin with one shared response cache
    Serve,

    /// Report that the tool is operational
    Health,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

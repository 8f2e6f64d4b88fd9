use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "refscope")]
#[command(author, version, about = "Cross-commit symbol reference resolution for git mirrors")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every call-site of a symbol at a commit
    Resolve {
        /// Symbol name (literal identifier, whole-word matched)
        symbol: String,

        /// Path to an already-cloned mirror
        #[arg(short, long)]
        mirror: PathBuf,

        /// Commit-ish to resolve against
        #[arg(short, long, default_value = "HEAD")]
        commit: String,

        /// Source language of the symbol
        #[arg(short, long)]
        lang: String,

        /// Emit results as JSON instead of plain lines
        #[arg(long)]
        json: bool,
    },

    /// List supported languages
    Languages,

    /// Show this process's engine metrics in Prometheus format
    Stats,
}

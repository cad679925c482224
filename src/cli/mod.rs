//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "patseek",
    version,
    about = "Semantic search over a patents corpus with offline accuracy evaluation",
    long_about = "Patseek loads a patent corpus (title + abstract + date), embeds it locally, \
                  and answers free-text queries with the most semantically similar records. \
                  Retrieval quality can be scored offline against a labeled ground truth \
                  (Top-N accuracy)."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/patseek/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the patent corpus with a free-text query
    Search {
        /// Search query text
        query: String,

        /// Maximum number of results to return
        #[arg(short = 'k', long)]
        limit: Option<usize>,

        /// Keep only records whose title contains this substring
        /// (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        /// Corpus CSV path (overrides corpus.csv_file)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Evaluate Top-N retrieval accuracy against a ground truth
    Evaluate {
        /// Ground truth JSON path (overrides evaluation.ground_truth_file)
        #[arg(short, long)]
        ground_truth: Option<PathBuf>,

        /// Leading ground-truth entries treated as relevant per query
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Results retrieved per query
        #[arg(short = 'k', long)]
        limit: Option<usize>,

        /// Keep only records whose title contains this substring
        /// (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,

        /// Corpus CSV path (overrides corpus.csv_file)
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Show the report in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

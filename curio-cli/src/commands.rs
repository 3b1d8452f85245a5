//! Command enum definitions
//!
//! This module contains the top-level parser and the command enums.

use crate::args::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "curio")]
#[command(about = "Multi-strategy retrieval of curriculum standards and resources", long_about = None)]
#[command(version = curio::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    pub output: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Retrieve standards and resources for a lesson-plan request
    #[command(
        alias = "search",
        long_about = r#"
Retrieve curriculum standards and cached resources for a query with one of
the retrieval strategies. When the strategy fails, baseline similarity search
and the external resources are used instead; pass --direct to see the ranked
results of the strategy itself.

EXAMPLES:
  # Hybrid search (default)
  curio retrieve "adding fractions" --subject Mathematics --grade 5 --corpus standards.json

  # Student-group-aware search
  curio retrieve "adding fractions" -s Mathematics -g 5 -c standards.json \
      --strategy student_group_aware --group "ESL students"

  # Include cached external resources
  curio retrieve "photosynthesis" -s Science -g 7 -c standards.json -r resources.json

RELATED COMMANDS:
  • curio strategies - List the available strategies
  • curio compare - Run every strategy on one request
"#
    )]
    Retrieve(RetrieveArgs),

    /// Run every strategy on one request and compare the results
    Compare(CompareArgs),

    /// List the available retrieval strategies
    Strategies,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Check a configuration file
    Validate(ValidateConfigArgs),
}

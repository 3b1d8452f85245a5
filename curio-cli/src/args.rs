//! Command argument structures
//!
//! This module contains the CLI argument structs for each command.

use clap::Args;
use std::path::PathBuf;

/// Where the documents to search come from.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// JSON file with an array of documents ({"id", "text", "fields"})
    #[arg(long, short = 'c')]
    pub corpus: PathBuf,

    /// JSON file with an array of cached external resources
    #[arg(long, short = 'r')]
    pub resources: Option<PathBuf>,
}

/// The request shared by `retrieve` and `compare`.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// The teacher's query
    pub query: String,

    /// Subject, e.g. "Mathematics"
    #[arg(long, short)]
    pub subject: String,

    /// Grade level, e.g. "5"
    #[arg(long, short)]
    pub grade: String,

    /// Free-text description of the student group
    #[arg(long = "group", default_value = "")]
    pub group_context: String,
}

#[derive(Args, Debug)]
pub struct RetrieveArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Strategy tag (see `curio strategies`); defaults to hybrid_search
    #[arg(long)]
    pub strategy: Option<String>,

    /// Print the ranked results without falling back to baseline retrieval
    #[arg(long)]
    pub direct: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    #[command(flatten)]
    pub corpus: CorpusArgs,
}

#[derive(Args, Debug)]
pub struct ValidateConfigArgs {
    /// Configuration file to check; defaults to the global --config
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

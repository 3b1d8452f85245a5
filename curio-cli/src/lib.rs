pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use commands::{Cli, Commands, ConfigCommands};
pub use context::CurioCliContext;
pub use output::{
    CliColors, format_error, format_info, format_success, format_warning, output_error,
    print_comparison, print_outcome, print_standards, print_strategies,
};
pub use utils::{load_config, load_corpus, load_resources};

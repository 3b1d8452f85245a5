use clap::{CommandFactory, Parser};
use curio_cli::handlers::{handle_compare_command, handle_config_command, handle_retrieve_command};
use curio_cli::output::{output_error, print_json};
use curio_cli::{Cli, Commands, load_config, print_strategies};
use curio::models::RetrievalStrategy;
use serde_json::json;
use tracing::Level;

#[tokio::main]
async fn main() {
    let cli_args = Cli::parse();

    // Determine output format - priority: env var > cli arg > default
    let output_format = std::env::var("CURIO_OUTPUT").unwrap_or_else(|_| cli_args.output.clone());

    let is_quiet = cli_args.quiet
        || std::env::var("CURIO_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // JSON output keeps stdout clean; logs always go to stderr
    let log_level = if is_quiet || output_format == "json" {
        Level::ERROR
    } else if cli_args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli_args, &output_format).await {
        output_error(&e.to_string(), &output_format);
        std::process::exit(1);
    }
}

async fn run(cli_args: Cli, output_format: &str) -> curio::Result<()> {
    match cli_args.command {
        Commands::Version => {
            println!("Curio CLI v{}", curio::VERSION);
        }

        Commands::Strategies => {
            if output_format == "json" {
                let strategies: Vec<_> = RetrievalStrategy::ALL
                    .iter()
                    .map(|s| json!({ "tag": s.as_str(), "description": s.description() }))
                    .collect();
                print_json(&strategies);
            } else {
                print_strategies();
            }
        }

        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut command,
                "curio",
                &mut std::io::stdout(),
            );
        }

        Commands::Retrieve(args) => {
            let config = load_config(cli_args.config.as_deref())?;
            handle_retrieve_command(args, config, output_format).await?;
        }

        Commands::Compare(args) => {
            let config = load_config(cli_args.config.as_deref())?;
            handle_compare_command(args, config, output_format).await?;
        }

        Commands::Config(cmd) => {
            let config = load_config(cli_args.config.as_deref())?;
            handle_config_command(cmd, config, cli_args.config.as_deref(), output_format)?;
        }
    }

    Ok(())
}

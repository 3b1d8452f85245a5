//! Configuration command handlers

use curio::config::CurioConfig;
use std::path::Path;

use crate::commands::ConfigCommands;
use crate::output::*;
use crate::utils::load_config;

pub fn handle_config_command(
    cmd: ConfigCommands,
    config: CurioConfig,
    config_path: Option<&Path>,
    output_format: &str,
) -> curio::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            if output_format != "json" {
                match config_path {
                    Some(path) => println!("{}", format_info(&format!("Loaded from {}", path.display()))),
                    None => println!("{}", format_info("Loaded from default locations and environment")),
                }
            }
            print_json(&config);
        }
        ConfigCommands::Validate(args) => {
            let path = args.path.as_deref().or(config_path);
            let validated = load_config(path)?;
            let source = path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "default configuration".to_string());

            if output_format == "json" {
                print_json(&serde_json::json!({
                    "valid": true,
                    "source": source,
                    "final_top_k": validated.retrieval.final_top_k,
                    "group_profiles": validated.retrieval.group_profiles.len(),
                }));
            } else {
                println!("{}", format_success(&format!("{} is valid", source)));
                println!(
                    "  final_top_k: {}, group profiles: {}, domain rules: {}",
                    validated.retrieval.final_top_k,
                    validated.retrieval.group_profiles.len(),
                    validated.retrieval.domain_rules.len()
                );
            }
        }
    }
    Ok(())
}

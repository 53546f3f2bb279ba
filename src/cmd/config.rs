//! Configuration view and validation commands: `llm-sim config`.

use anyhow::Result;
use std::path::Path;

use llm_sim::config::{CONFIG_FILE, ENV_API_KEY, ENV_API_KEY_FALLBACK, SimConfig, SimToml};

use super::super::{Cli, ConfigCommands};

pub fn cmd_config(cli: &Cli, project_dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    let config = SimConfig::with_cli_args(
        project_dir.to_path_buf(),
        cli.verbose,
        cli.model.clone(),
        cli.endpoint.clone(),
    )?;
    let config_path = config.config_file();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("llm-sim Configuration");
            println!("=====================");
            println!();

            println!("Project directory: {}", config.project_dir.display());
            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No {} found at {}", CONFIG_FILE, config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = &config.toml;
            println!("[model]");
            println!("  name = \"{}\"", toml.model.name);
            println!("  endpoint = \"{}\"", toml.model.endpoint);
            if let Some(secs) = toml.model.request_timeout_secs {
                println!("  request_timeout_secs = {}", secs);
            }
            println!();
            println!("[progress]");
            println!(
                "  building_context_after_ms = {}",
                toml.progress.building_context_after_ms
            );
            println!("  reasoning_after_ms = {}", toml.progress.reasoning_after_ms);
            println!();

            println!("Effective values (with env/CLI overrides):");
            println!("  model = \"{}\"", config.model());
            println!("  endpoint = \"{}\"", config.endpoint());
            let key_state = if config.api_key().is_empty() {
                "not set"
            } else {
                "set"
            };
            println!(
                "  api key = {} ({} or {})",
                key_state, ENV_API_KEY, ENV_API_KEY_FALLBACK
            );
            println!();

            if !config_path.exists() {
                println!("Run 'llm-sim config init' to create a {} file.", CONFIG_FILE);
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let warnings = config.validate();
            if warnings.is_empty() {
                if config_path.exists() {
                    println!("Configuration is valid.");
                } else {
                    println!("No {} found. Using defaults (valid).", CONFIG_FILE);
                }
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("{} already exists at {}", CONFIG_FILE, config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !config.config_dir.exists() {
                std::fs::create_dir_all(&config.config_dir)?;
            }

            SimToml::default().save(&config_path)?;

            println!("Created {} at {}", CONFIG_FILE, config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [model] name, endpoint, request_timeout_secs");
            println!("  - [progress] building_context_after_ms, reasoning_after_ms");
            println!();
            println!("Set {} in the environment or a .env file.", ENV_API_KEY);
            println!();
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use llm_sim::ui::OutputMode;
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "llm-sim")]
#[command(version, about = "Walk through how a language model processes a query")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Model identifier. Overrides LLM_SIM_MODEL and config.toml.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base URL of the generation API. Overrides LLM_SIM_ENDPOINT and config.toml.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Output mode: cards, json, raw
    #[arg(short, long, default_value = "cards", global = true)]
    pub output: OutputMode,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a query to the model and show the simulated processing steps
    Simulate {
        /// The query. Read from stdin when omitted or "-".
        query: Option<String>,
    },
    /// Split a saved model reply into steps without calling the model
    Parse {
        /// File holding the reply. Read from stdin when omitted or "-".
        file: Option<PathBuf>,
    },
    /// Print the system instruction sent with every query
    Prompt,
    /// View, validate or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default config.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    llm_sim::logging::init(cli.verbose, cli.log_json);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Simulate { query } => {
            cmd::cmd_simulate(&cli, &project_dir, query.as_deref()).await?;
        }
        Commands::Parse { file } => {
            cmd::cmd_parse(file.as_deref(), cli.output, cli.verbose)?;
        }
        Commands::Prompt => {
            cmd::cmd_prompt();
        }
        Commands::Config { command } => {
            cmd::cmd_config(&cli, &project_dir, command.clone())?;
        }
    }

    Ok(())
}

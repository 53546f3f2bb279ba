//! `llm-sim simulate`: one query through the hosted model.

use anyhow::{Context, Result, bail};
use console::style;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use llm_sim::config::{ENV_API_KEY, SimConfig};
use llm_sim::inference::{GeminiClient, InferenceClient};
use llm_sim::orchestrator::{Orchestrator, SimulationStatus, StatusObserver};
use llm_sim::report::SimulationReport;
use llm_sim::ui::icons::WARN;
use llm_sim::ui::{OutputMode, SimulationUI, StepRenderer};

use super::super::Cli;

pub async fn cmd_simulate(cli: &Cli, project_dir: &Path, query: Option<&str>) -> Result<()> {
    let query = match query {
        Some(q) if q != "-" => q.to_string(),
        _ => {
            if std::io::stdin().is_terminal() {
                bail!("No query given. Pass it as an argument or pipe it on stdin.");
            }
            super::read_input(None)?
        }
    };

    let config = SimConfig::with_cli_args(
        project_dir.to_path_buf(),
        cli.verbose,
        cli.model.clone(),
        cli.endpoint.clone(),
    )?;

    let api_key = config.api_key();
    if api_key.is_empty() && !query.trim().is_empty() {
        tracing::warn!("no API key configured");
        eprintln!(
            "{}{}",
            WARN,
            style(format!("{} is not set; the request will likely be rejected", ENV_API_KEY))
                .yellow()
        );
    }

    let client = GeminiClient::new(
        config.endpoint(),
        api_key,
        config.model(),
        config.request_timeout(),
    )
    .context("Failed to create inference client")?;

    let ui: Arc<dyn StatusObserver> =
        if cli.output == OutputMode::Cards && std::io::stderr().is_terminal() {
            Arc::new(SimulationUI::new())
        } else {
            Arc::new(SimulationUI::hidden())
        };

    let mut orchestrator = Orchestrator::new(client)
        .with_schedule(config.progress_schedule())
        .with_verbose(config.verbose)
        .with_observer(ui);

    let state = orchestrator.simulate_input(query).await.clone();

    match state.status {
        SimulationStatus::Completed => {
            let raw = state.result.unwrap_or_default();
            match cli.output {
                OutputMode::Cards => {
                    print!("{}", StepRenderer::default().render(&orchestrator.steps()));
                }
                OutputMode::Json => {
                    let run_id = orchestrator.last_run_id().unwrap_or_else(uuid::Uuid::new_v4);
                    let report = SimulationReport::from_raw(run_id, raw)
                        .with_model(orchestrator.client().model())
                        .with_input(state.input);
                    println!("{}", report.to_json()?);
                }
                OutputMode::Raw => println!("{}", raw),
            }
            Ok(())
        }
        SimulationStatus::Error => {
            let message = state.error.unwrap_or_default();
            bail!("Simulation failed: {}", message)
        }
        _ => {
            eprintln!("Nothing to simulate: the query is empty.");
            Ok(())
        }
    }
}

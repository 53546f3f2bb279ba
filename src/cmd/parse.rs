//! `llm-sim parse`: split a saved reply into steps offline.

use anyhow::Result;
use std::path::Path;
use uuid::Uuid;

use llm_sim::report::SimulationReport;
use llm_sim::steps::StepParser;
use llm_sim::ui::{OutputMode, StepRenderer};

pub fn cmd_parse(file: Option<&Path>, output: OutputMode, verbose: bool) -> Result<()> {
    let raw = super::read_input(file)?;

    match output {
        OutputMode::Cards => {
            let steps = StepParser::new(verbose).parse(&raw);
            print!("{}", StepRenderer::default().render(&steps));
        }
        OutputMode::Json => {
            let report = SimulationReport::from_raw(Uuid::new_v4(), raw);
            println!("{}", report.to_json()?);
        }
        OutputMode::Raw => print!("{}", raw),
    }

    Ok(())
}

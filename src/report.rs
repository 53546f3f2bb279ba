//! Machine-readable simulation output.

use crate::steps::{ParsedStep, parse_steps};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one simulation, as printed by `--output json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    /// Model that produced the reply; `None` for offline parses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub generated_at: DateTime<Utc>,
    /// The query, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub steps: Vec<ParsedStep>,
    pub raw: String,
}

impl SimulationReport {
    /// Build a report by parsing `raw`.
    pub fn from_raw(run_id: Uuid, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self {
            run_id,
            model: None,
            generated_at: Utc::now(),
            input: None,
            steps: parse_steps(&raw),
            raw,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

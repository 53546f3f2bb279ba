use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prompt::FALLBACK_ERROR;

/// Lifecycle of a simulation as shown to the user.
///
/// `Tokenizing`, `BuildingContext` and `Reasoning` are narrative stages: only
/// the move into `Tokenizing` and out to `Completed`/`Error` track the real
/// request. The two middle stages are driven by
/// [`FakeProgress`](super::progress::FakeProgress) timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationStatus {
    #[default]
    Idle,
    Tokenizing,
    BuildingContext,
    Reasoning,
    Completed,
    Error,
}

impl SimulationStatus {
    /// Whether a request is (nominally) outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SimulationStatus::Tokenizing
                | SimulationStatus::BuildingContext
                | SimulationStatus::Reasoning
        )
    }

    /// Whether a new simulation may be started from this status.
    pub fn accepts_submit(&self) -> bool {
        !self.is_in_flight()
    }

    /// Loading-line text for the in-flight stages.
    pub fn progress_message(&self) -> Option<&'static str> {
        match self {
            SimulationStatus::Tokenizing => Some("Mapping lexical vectors..."),
            SimulationStatus::BuildingContext => Some("Activating transformer layers..."),
            SimulationStatus::Reasoning => Some("Performing cross-attention analysis..."),
            _ => None,
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationStatus::Idle => write!(f, "idle"),
            SimulationStatus::Tokenizing => write!(f, "tokenizing"),
            SimulationStatus::BuildingContext => write!(f, "building-context"),
            SimulationStatus::Reasoning => write!(f, "reasoning"),
            SimulationStatus::Completed => write!(f, "completed"),
            SimulationStatus::Error => write!(f, "error"),
        }
    }
}

/// Everything that can change the simulation state.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// The query text was edited.
    InputChanged(String),
    /// The user asked to run the current input.
    Submitted,
    /// A cosmetic progress timer fired.
    ProgressAdvanced(SimulationStatus),
    /// The model replied with this raw text.
    Succeeded(String),
    /// The call failed with this message.
    Failed(String),
}

/// Immutable snapshot of the one simulation the front end tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub status: SimulationStatus,
    pub input: String,
    pub result: Option<String>,
    pub error: Option<String>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idle state holding `input`.
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Whether `Submitted` would start a run: status allows it and the
    /// input is non-empty after trimming.
    pub fn can_submit(&self) -> bool {
        self.status.accepts_submit() && !self.input.trim().is_empty()
    }

    /// Produce the state that follows `event`. This is the only place the
    /// state changes.
    pub fn apply(self, event: SimulationEvent) -> Self {
        match event {
            SimulationEvent::InputChanged(input) => Self { input, ..self },
            SimulationEvent::Submitted => {
                if !self.can_submit() {
                    return self;
                }
                Self {
                    status: SimulationStatus::Tokenizing,
                    result: None,
                    error: None,
                    ..self
                }
            }
            SimulationEvent::ProgressAdvanced(status) => {
                // Late timers from a finished run never overwrite its outcome.
                if !self.status.is_in_flight() || !status.is_in_flight() {
                    return self;
                }
                Self { status, ..self }
            }
            SimulationEvent::Succeeded(raw) => Self {
                status: SimulationStatus::Completed,
                result: Some(raw),
                error: None,
                ..self
            },
            SimulationEvent::Failed(message) => {
                let message = if message.is_empty() {
                    FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                Self {
                    status: SimulationStatus::Error,
                    result: None,
                    error: Some(message),
                    ..self
                }
            }
        }
    }
}

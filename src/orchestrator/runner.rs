use super::progress::{FakeProgress, ProgressSchedule};
use super::state::{SimulationEvent, SimulationState};
use crate::inference::{GenerationRequest, InferenceClient};
use crate::steps::{ParsedStep, StepParser};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

/// Receives every state the orchestrator moves through.
pub trait StatusObserver: Send + Sync {
    fn on_transition(&self, state: &SimulationState);
}

/// Drives one simulation at a time: the remote call, the cosmetic progress
/// stages, and the resulting state.
pub struct Orchestrator<C> {
    client: C,
    schedule: ProgressSchedule,
    parser: StepParser,
    state: SimulationState,
    observer: Option<Arc<dyn StatusObserver>>,
    last_run_id: Option<Uuid>,
}

impl<C: InferenceClient> Orchestrator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            schedule: ProgressSchedule::default(),
            parser: StepParser::new(false),
            state: SimulationState::new(),
            observer: None,
            last_run_id: None,
        }
    }

    pub fn with_schedule(mut self, schedule: ProgressSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Log every parsed step at debug level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.parser = StepParser::new(verbose);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn StatusObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Id of the most recent run that actually called the model.
    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run_id
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Replace the query text.
    pub fn set_input(&mut self, input: impl Into<String>) {
        Self::advance(
            &mut self.state,
            self.observer.as_deref(),
            SimulationEvent::InputChanged(input.into()),
        );
    }

    /// Steps parsed from the last successful reply.
    pub fn steps(&self) -> Vec<ParsedStep> {
        self.state
            .result
            .as_deref()
            .map(|raw| self.parser.parse(raw))
            .unwrap_or_default()
    }

    /// Set the input and run it.
    pub async fn simulate_input(&mut self, input: impl Into<String>) -> &SimulationState {
        self.set_input(input);
        self.simulate().await
    }

    /// Run the current input.
    ///
    /// Does nothing when the input is blank or a run is already in flight.
    /// Otherwise the state ends in `Completed` with the raw reply or in
    /// `Error` with the failure message.
    pub async fn simulate(&mut self) -> &SimulationState {
        if !self.state.can_submit() {
            tracing::debug!(status = %self.state.status, "simulate ignored: nothing to submit");
            return &self.state;
        }

        let run_id = Uuid::new_v4();
        self.last_run_id = Some(run_id);
        let span = tracing::info_span!("simulation", %run_id, model = self.client.model());
        self.run().instrument(span).await;
        &self.state
    }

    async fn run(&mut self) {
        let observer = self.observer.as_deref();
        Self::advance(&mut self.state, observer, SimulationEvent::Submitted);

        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        FakeProgress::start(self.schedule, events_tx);

        let request = GenerationRequest::simulation(self.state.input.clone());
        let call = self.client.generate(&request);
        tokio::pin!(call);

        let outcome = loop {
            tokio::select! {
                result = &mut call => break result,
                Some(event) = events_rx.recv() => {
                    Self::advance(&mut self.state, observer, event);
                }
            }
        };

        let event = match outcome {
            Ok(raw) => {
                tracing::info!(reply_len = raw.len(), "simulation completed");
                SimulationEvent::Succeeded(raw)
            }
            Err(e) => {
                if e.is_auth() {
                    tracing::warn!("model service rejected the API key");
                }
                tracing::warn!(error = %e, "simulation failed");
                SimulationEvent::Failed(e.to_string())
            }
        };
        Self::advance(&mut self.state, observer, event);
    }

    fn advance(
        state: &mut SimulationState,
        observer: Option<&dyn StatusObserver>,
        event: SimulationEvent,
    ) {
        let previous = state.status;
        *state = std::mem::take(state).apply(event);
        if state.status != previous {
            tracing::debug!(from = %previous, to = %state.status, "status changed");
        }
        if let Some(observer) = observer {
            observer.on_transition(state);
        }
    }
}

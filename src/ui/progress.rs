use crate::orchestrator::{SimulationState, SimulationStatus, StatusObserver};
use crate::ui::icons::{ATTENTION, CHECK, CROSS, LAYERS, LEXICAL};
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Terminal spinner that follows the simulation status.
///
/// The in-flight messages mirror the cosmetic stages, so the spinner tells a
/// story about tokenizing and attention while the request is simply waiting
/// on the network.
pub struct SimulationUI {
    bar: ProgressBar,
}

impl SimulationUI {
    /// Spinner drawn to stderr.
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Spinner that draws nothing (JSON/raw output, tests).
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:.bold.dim} {spinner:.blue} {msg}")
                .expect("progress bar template is a valid static string"),
        );
        bar.set_prefix("Synthesizing");
        Self { bar }
    }

    /// Current spinner message, for inspection.
    pub fn message(&self) -> String {
        self.bar.message()
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    fn show_stage(&self, status: SimulationStatus) {
        let Some(text) = status.progress_message() else {
            return;
        };
        let emoji = match status {
            SimulationStatus::Tokenizing => LEXICAL,
            SimulationStatus::BuildingContext => LAYERS,
            _ => ATTENTION,
        };
        self.bar
            .set_message(format!("{}{}", emoji, style(text.to_uppercase()).blue()));
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }
}

impl Default for SimulationUI {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusObserver for SimulationUI {
    fn on_transition(&self, state: &SimulationState) {
        match state.status {
            SimulationStatus::Idle => {}
            SimulationStatus::Completed => {
                self.bar
                    .finish_with_message(format!("{}{}", CHECK, style("Simulation trace ready").green()));
            }
            SimulationStatus::Error => {
                let message = state.error.as_deref().unwrap_or_default();
                self.bar
                    .finish_with_message(format!("{}{}", CROSS, style(message).red()));
            }
            status => self.show_stage(status),
        }
    }
}

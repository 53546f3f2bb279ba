//! Cosmetic staged progress.
//!
//! This is a display illusion, not a pipeline tracker. The hosted model does
//! not report stages; the timers here fire on a fixed schedule regardless of
//! what the request is doing. The orchestrator feeds the resulting events
//! through [`SimulationState::apply`](super::SimulationState::apply), which
//! ignores any that arrive after the run has finished.

use super::state::{SimulationEvent, SimulationStatus};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// When the fake stages appear, measured from submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSchedule {
    /// Delay before showing "building context"
    pub building_context_after: Duration,
    /// Delay before showing "reasoning"
    pub reasoning_after: Duration,
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        Self {
            building_context_after: Duration::from_millis(1500),
            reasoning_after: Duration::from_millis(3000),
        }
    }
}

impl ProgressSchedule {
    /// The stages in firing order with their offsets.
    pub fn stages(&self) -> [(Duration, SimulationStatus); 2] {
        [
            (self.building_context_after, SimulationStatus::BuildingContext),
            (self.reasoning_after, SimulationStatus::Reasoning),
        ]
    }
}

/// Fire-and-forget timers for the fake stages.
pub struct FakeProgress;

impl FakeProgress {
    /// Spawn the timers. Each stage is sent on `events` at its offset from
    /// now. The task is detached; if the receiver is gone, sends are dropped.
    pub fn start(schedule: ProgressSchedule, events: UnboundedSender<SimulationEvent>) {
        for (delay, status) in schedule.stages() {
            let events = events.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = events.send(SimulationEvent::ProgressAdvanced(status));
            });
        }
    }
}

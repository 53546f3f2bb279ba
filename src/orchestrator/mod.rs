pub mod progress;
pub mod runner;
pub mod state;

pub use progress::{FakeProgress, ProgressSchedule};
pub use runner::{Orchestrator, StatusObserver};
pub use state::{SimulationEvent, SimulationState, SimulationStatus};

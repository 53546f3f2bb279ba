pub mod icons;
pub mod progress;
pub mod render;

pub use progress::SimulationUI;
pub use render::{OutputMode, StepRenderer, terminal_width};

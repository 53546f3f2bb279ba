pub mod config;
pub mod errors;
pub mod inference;
pub mod logging;
pub mod orchestrator;
pub mod prompt;
pub mod report;
pub mod steps;
pub mod ui;

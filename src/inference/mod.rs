//! Remote inference client.
//!
//! One call per simulation: the user's text as the prompt, the fixed system
//! instruction, and a fixed temperature. The reply text comes back as-is.
//! Failures propagate unchanged; nothing here retries.

mod gemini;

pub use gemini::GeminiClient;

use crate::errors::InferenceError;
use crate::prompt::{DEFAULT_TEMPERATURE, SYSTEM_INSTRUCTION};
use async_trait::async_trait;
use serde::Serialize;

/// A single text-generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    /// System instruction
    pub system: String,
    /// User prompt, sent verbatim
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature,
        }
    }

    /// Request carrying the simulator's system instruction and temperature.
    pub fn simulation(prompt: impl Into<String>) -> Self {
        Self::new(SYSTEM_INSTRUCTION, prompt, DEFAULT_TEMPERATURE)
    }
}

/// Seam between the orchestrator and the hosted model.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Model identifier, for logging and reports.
    fn model(&self) -> &str;

    /// Send the request and return the reply text.
    ///
    /// An empty reply is replaced by [`crate::prompt::FALLBACK_RESPONSE`].
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_request_uses_fixed_prompt_material() {
        let request = GenerationRequest::simulation("Why is the sky blue?");
        assert_eq!(request.system, SYSTEM_INSTRUCTION);
        assert_eq!(request.prompt, "Why is the sky blue?");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_prompt_is_not_trimmed() {
        let request = GenerationRequest::simulation("  padded\n");
        assert_eq!(request.prompt, "  padded\n");
    }
}

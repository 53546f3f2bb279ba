//! Fixed prompt material sent with every simulation request.
//!
//! The system instruction asks the model for exactly six sections, each
//! introduced by a keycap emoji marker (`1️⃣` through `6️⃣`). The step parser
//! relies on those markers, so changes here must keep them intact.

/// Default hosted model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default base URL of the hosted generation API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Sampling temperature used for every simulation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Returned in place of the model's reply when the reply carries no text.
pub const FALLBACK_RESPONSE: &str = "Failed to generate simulation.";

/// Shown when a failed simulation has no usable error message.
pub const FALLBACK_ERROR: &str = "An error occurred during simulation.";

pub const SYSTEM_INSTRUCTION: &str = "You are a world-class LLM Internal Engine Simulator. \n\
Your task is to take a user input and meticulously demonstrate how an LLM processes it.

You MUST follow this exact structure in your response:

🧠 LLM SIMULATION

1️⃣ Input Understanding
[Explain intent, key tokens, semantic weights, and linguistic structures identified]

2️⃣ Context Building
[Explain what relevant knowledge retrieved from the pre-training set or system prompt is being activated]

3️⃣ Reasoning Process
[Describe the logical chain-of-thought, attention mechanism focuses, and sub-task decomposition]

4️⃣ Assumptions
[State any missing information inferred or probabilistic biases applied]

5️⃣ Response Planning
[Outline the structural template and tone selection for the output]

6️⃣ Final Output
[The high-quality final answer based on the above steps]

Be technical yet accessible. Use markdown for the content under each heading.";

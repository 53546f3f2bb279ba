//! Step parsing for simulation replies.
//!
//! The model is asked to answer in six sections, each opened by a keycap
//! marker:
//!
//! - `1️⃣ Input Understanding`
//! - `2️⃣ Context Building`
//! - `3️⃣ Reasoning Process`
//! - `4️⃣ Assumptions`
//! - `5️⃣ Response Planning`
//! - `6️⃣ Final Output`
//!
//! The parser does not enforce that shape. It follows whatever markers the
//! reply actually contains, in the order they appear.

mod parser;
mod types;

pub use parser::{StepParser, parse_steps};
pub use types::{ParsedStep, StepOrdinal, UNKNOWN_STEP_TITLE};

//! Step parsing from the model's reply.
//!
//! The reply is cut immediately before every keycap marker (`1️⃣`..`6️⃣`).
//! Each piece becomes one [`ParsedStep`]:
//! - ordinal from the marker digit, `"0"` when the piece has no marker
//! - title from the rest of the marker line
//! - body from everything after the marker line
//!
//! Parsing is total: any string yields a (possibly empty) list of steps.

use super::types::{ParsedStep, StepOrdinal, UNKNOWN_STEP_TITLE};
use regex::Regex;
use std::sync::LazyLock;

// A marker is the digit, VARIATION SELECTOR-16 and COMBINING ENCLOSING KEYCAP.
static MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[1-6]\x{FE0F}\x{20E3}").unwrap());

// Marker, optional whitespace (may cross line breaks), then the rest of that line.
// A line ends at LF, CR, U+2028 or U+2029.
static MARKER_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([1-6])\x{FE0F}\x{20E3}\s*([^\n\r\x{2028}\x{2029}]*)\n?").unwrap()
});

/// Parser turning a raw reply into display-ready steps.
pub struct StepParser {
    /// Whether to log each parsed step
    verbose: bool,
}

impl StepParser {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Parse `text` into steps, in the order their markers appear.
    pub fn parse(&self, text: &str) -> Vec<ParsedStep> {
        let steps: Vec<ParsedStep> = split_segments(text)
            .into_iter()
            .filter(|segment| !segment.trim().is_empty())
            .map(parse_segment)
            .collect();

        if self.verbose {
            for step in &steps {
                tracing::debug!(
                    ordinal = step.ordinal.label(),
                    title = %step.title,
                    body_len = step.body.len(),
                    "parsed step"
                );
            }
            tracing::debug!(count = steps.len(), "parsed reply");
        }

        steps
    }
}

/// Convenience function to parse without creating a parser.
pub fn parse_steps(text: &str) -> Vec<ParsedStep> {
    StepParser::new(false).parse(text)
}

/// Cut `text` right before every marker. The first piece holds any text
/// preceding the first marker and may be empty.
fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for m in MARKER_REGEX.find_iter(text) {
        if m.start() > start {
            segments.push(&text[start..m.start()]);
        }
        start = m.start();
    }
    segments.push(&text[start..]);

    segments
}

fn parse_segment(segment: &str) -> ParsedStep {
    let Some(caps) = MARKER_LINE_REGEX.captures(segment) else {
        return ParsedStep::new(StepOrdinal::Unknown, UNKNOWN_STEP_TITLE, segment.trim());
    };

    // Both groups always participate in a match.
    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let ordinal = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .map_or(StepOrdinal::Unknown, StepOrdinal::from_digit);
    let title = caps.get(2).map_or("", |m| m.as_str()).trim();

    let mut body = String::with_capacity(segment.len());
    body.push_str(&segment[..whole.start]);
    body.push_str(&segment[whole.end..]);

    ParsedStep::new(ordinal, title, body.trim())
}

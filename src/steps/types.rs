//! Step types produced by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title given to a segment that carries no marker.
pub const UNKNOWN_STEP_TITLE: &str = "Unknown Step";

/// Which of the six numbered sections a step came from.
///
/// `Unknown` is the sentinel for text that appeared before the first marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StepOrdinal {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Unknown,
}

impl StepOrdinal {
    /// The six ordinals that have a marker, in canonical order.
    pub const MARKED: [StepOrdinal; 6] = [
        StepOrdinal::One,
        StepOrdinal::Two,
        StepOrdinal::Three,
        StepOrdinal::Four,
        StepOrdinal::Five,
        StepOrdinal::Six,
    ];

    /// Map a marker digit to its ordinal. Anything outside `1..=6` is `Unknown`.
    pub fn from_digit(digit: char) -> Self {
        match digit {
            '1' => StepOrdinal::One,
            '2' => StepOrdinal::Two,
            '3' => StepOrdinal::Three,
            '4' => StepOrdinal::Four,
            '5' => StepOrdinal::Five,
            '6' => StepOrdinal::Six,
            _ => StepOrdinal::Unknown,
        }
    }

    /// Display label: `"1"`..`"6"`, or `"0"` for unknown.
    pub fn label(&self) -> &'static str {
        match self {
            StepOrdinal::One => "1",
            StepOrdinal::Two => "2",
            StepOrdinal::Three => "3",
            StepOrdinal::Four => "4",
            StepOrdinal::Five => "5",
            StepOrdinal::Six => "6",
            StepOrdinal::Unknown => "0",
        }
    }

    /// The keycap glyph that introduces this section, empty for `Unknown`.
    pub fn marker(&self) -> &'static str {
        match self {
            StepOrdinal::One => "1\u{FE0F}\u{20E3}",
            StepOrdinal::Two => "2\u{FE0F}\u{20E3}",
            StepOrdinal::Three => "3\u{FE0F}\u{20E3}",
            StepOrdinal::Four => "4\u{FE0F}\u{20E3}",
            StepOrdinal::Five => "5\u{FE0F}\u{20E3}",
            StepOrdinal::Six => "6\u{FE0F}\u{20E3}",
            StepOrdinal::Unknown => "",
        }
    }

    /// Heading the system instruction asks the model to use for this section.
    pub fn section_name(&self) -> &'static str {
        match self {
            StepOrdinal::One => "Input Understanding",
            StepOrdinal::Two => "Context Building",
            StepOrdinal::Three => "Reasoning Process",
            StepOrdinal::Four => "Assumptions",
            StepOrdinal::Five => "Response Planning",
            StepOrdinal::Six => "Final Output",
            StepOrdinal::Unknown => UNKNOWN_STEP_TITLE,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, StepOrdinal::Unknown)
    }
}

impl fmt::Display for StepOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<StepOrdinal> for String {
    fn from(ordinal: StepOrdinal) -> Self {
        ordinal.label().to_string()
    }
}

impl TryFrom<String> for StepOrdinal {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "0" => Ok(StepOrdinal::Unknown),
            s if s.len() == 1 => {
                let ordinal = s.chars().next().map(StepOrdinal::from_digit);
                match ordinal {
                    Some(o) if !o.is_unknown() => Ok(o),
                    _ => Err(format!("invalid step ordinal '{}'", value)),
                }
            }
            _ => Err(format!("invalid step ordinal '{}'", value)),
        }
    }
}

/// One titled section of a model reply, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedStep {
    pub ordinal: StepOrdinal,
    pub title: String,
    pub body: String,
}

impl ParsedStep {
    pub fn new(ordinal: StepOrdinal, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            ordinal,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Rebuild the step as the marker line followed by the body.
    ///
    /// Unknown steps have no marker line, so only the body is returned.
    pub fn to_markdown(&self) -> String {
        if self.ordinal.is_unknown() {
            return self.body.clone();
        }
        if self.body.is_empty() {
            format!("{} {}", self.ordinal.marker(), self.title)
        } else {
            format!("{} {}\n{}", self.ordinal.marker(), self.title, self.body)
        }
    }
}

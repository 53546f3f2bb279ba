//! Step-card rendering for the terminal.

use crate::steps::ParsedStep;
use crate::ui::icons::BRAIN;
use console::style;

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;
const MAX_WIDTH: usize = 100;

/// How `simulate` and `parse` print their result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Step cards
    #[default]
    Cards,
    /// JSON report
    Json,
    /// The model's reply, unparsed
    Raw,
}

impl std::str::FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cards" => Ok(Self::Cards),
            "json" => Ok(Self::Json),
            "raw" => Ok(Self::Raw),
            _ => anyhow::bail!("Invalid output mode '{}'. Valid values: cards, json, raw", s),
        }
    }
}

/// Width to wrap step bodies at, clamped to a readable range.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
        .clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Renders parsed steps as a vertical trace of numbered cards.
pub struct StepRenderer {
    width: usize,
}

impl StepRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
        }
    }

    /// Full trace: header followed by one card per step.
    pub fn render(&self, steps: &[ParsedStep]) -> String {
        let mut out = String::new();
        out.push_str(&self.header());
        out.push('\n');

        if steps.is_empty() {
            out.push_str(&format!("  {}\n", style("(no steps in reply)").dim()));
            return out;
        }

        for (idx, step) in steps.iter().enumerate() {
            out.push_str(&self.card(step, idx + 1 == steps.len()));
        }
        out
    }

    fn header(&self) -> String {
        let title = " SIMULATION TRACE ";
        let side = self.width.saturating_sub(title.len()) / 2;
        format!(
            "\n{}{}{}{}\n",
            BRAIN,
            style("─".repeat(side)).dim(),
            style(title).dim().bold(),
            style("─".repeat(side)).dim()
        )
    }

    fn card(&self, step: &ParsedStep, is_last: bool) -> String {
        let mut out = format!(
            "{} {}\n",
            style(format!("({})", step.ordinal.label())).white().on_blue().bold(),
            style(&step.title).blue().bold()
        );

        let rail = if is_last { "   " } else { " │ " };
        let body_width = self.width.saturating_sub(rail.len() + 1).max(MIN_WIDTH / 2);
        for line in step.body.lines() {
            if line.trim().is_empty() {
                out.push_str(&format!("{}\n", style(rail).dim()));
                continue;
            }
            for wrapped in textwrap::wrap(line, body_width) {
                out.push_str(&format!("{} {}\n", style(rail).dim(), wrapped));
            }
        }
        if !is_last {
            out.push_str(&format!("{}\n", style(rail).dim()));
        }
        out
    }
}

impl Default for StepRenderer {
    fn default() -> Self {
        Self::new(terminal_width())
    }
}

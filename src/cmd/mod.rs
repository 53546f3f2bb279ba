//! CLI command implementations.
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `simulate` | `Simulate`       |
//! | `parse`    | `Parse`          |
//! | `prompt`   | `Prompt`         |
//! | `config`   | `Config`         |

pub mod config;
pub mod parse;
pub mod prompt;
pub mod simulate;

pub use config::cmd_config;
pub use parse::cmd_parse;
pub use prompt::cmd_prompt;
pub use simulate::cmd_simulate;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read `path`, or stdin when it is `None` or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read file: {}", p.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

//! Rendering of a compacted inbox.
//!
//! # Supported Formats
//!
//! - **Markdown**: grouped-by-file report for humans
//! - **JSON**: pull request metadata plus the item list
//!
//! Either output can be fed through a prompt template whose `{{NAME}}`
//! placeholders are filled from [`PromptVariables`].

mod json;
mod prompt;
mod report;
mod template;
#[doc(hidden)]
pub mod test_helpers;

use std::fmt;
use std::str::FromStr;

pub use json::{InboxDocument, items_to_json, write_json};
pub use prompt::{PromptVariables, select_prompt_template};
pub use report::{render_report, write_report};
pub use template::apply;

use crate::github::error::InboxError;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable Markdown report.
    #[default]
    Markdown,
    /// Pretty-printed JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = InboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(InboxError::Configuration {
                message: format!("unsupported output format '{s}': valid options are 'md' or 'json'"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "md"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Converts an I/O error to an [`InboxError::Io`].
fn io_error(error: &std::io::Error) -> InboxError {
    InboxError::io(error)
}

//! Command-line arguments and their configuration layer.

use clap::Parser;
use serde_json::{Map, Value};

use crate::github::error::InboxError;
use crate::github::locator::PullRequestNumber;

/// Command-line arguments for `pr-inbox`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "pr-inbox",
    version,
    about = "Summarise unresolved pull request review threads"
)]
pub struct CliArgs {
    /// Pull request number; takes precedence over `--pr`.
    #[arg(value_name = "PR_NUMBER")]
    pub pull_request: Option<String>,

    /// Repository in `OWNER/REPO` form.
    #[arg(short = 'R', long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Pull request number.
    #[arg(short = 'p', long)]
    pub pr: Option<u64>,

    /// Output format: `md` or `json`.
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Include resolved threads.
    #[arg(long)]
    pub all: bool,

    /// Only show P0 items.
    #[arg(long)]
    pub p0: bool,

    /// Priority filter: `all`, `p0`, `p1`, or `p2`.
    #[arg(long)]
    pub priority: Option<String>,

    /// Maximum number of items; 0 means unlimited.
    #[arg(long)]
    pub budget: Option<usize>,

    /// Attach diff context to items.
    #[arg(long)]
    pub include_diff: bool,

    /// Attach comment timestamps to items.
    #[arg(long)]
    pub include_times: bool,

    /// Attach every comment of a thread to its item.
    #[arg(long)]
    pub all_comments: bool,

    /// Also collect pull request conversation comments.
    #[arg(long)]
    pub include_issue_comments: bool,

    /// Skip the background update check.
    #[arg(long)]
    pub no_update_check: bool,

    /// Prompt template file.
    #[arg(long, value_name = "PATH")]
    pub prompt_file: Option<String>,

    /// Inline prompt template; wins over `--prompt-file` and configured
    /// prompts.
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Personal access token.
    #[arg(long)]
    pub token: Option<String>,

    /// GitHub API base URL.
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,
}

impl CliArgs {
    /// Converts the arguments that were actually given into a
    /// configuration layer.
    ///
    /// Unset options and `false` switches are left out so lower layers keep
    /// their values. The inline prompt is not part of the layer; it is
    /// resolved separately.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::InvalidPullRequestNumber`] when the positional
    /// argument is not a positive integer.
    pub fn to_layer(&self) -> Result<Value, InboxError> {
        let mut layer = Map::new();

        let positional = self
            .pull_request
            .as_deref()
            .map(PullRequestNumber::parse)
            .transpose()?
            .map(PullRequestNumber::get);
        if let Some(number) = positional.or(self.pr) {
            layer.insert("pr".to_owned(), Value::from(number));
        }

        let strings = [
            ("repo", &self.repo),
            ("format", &self.format),
            ("priority", &self.priority),
            ("prompt_file", &self.prompt_file),
            ("token", &self.token),
            ("api_base", &self.api_base),
        ];
        for (key, value) in strings {
            if let Some(text) = value {
                layer.insert(key.to_owned(), Value::from(text.as_str()));
            }
        }

        if let Some(budget) = self.budget {
            layer.insert("budget".to_owned(), Value::from(budget));
        }

        let switches = [
            ("all", self.all),
            ("p0", self.p0),
            ("include_diff", self.include_diff),
            ("include_times", self.include_times),
            ("all_comments", self.all_comments),
            ("include_issue_comments", self.include_issue_comments),
            ("no_update_check", self.no_update_check),
        ];
        for (key, enabled) in switches {
            if enabled {
                layer.insert(key.to_owned(), Value::Bool(true));
            }
        }

        Ok(Value::Object(layer))
    }
}

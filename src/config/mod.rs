//! Application configuration merged from files and the command line.
//!
//! # Precedence
//!
//! Configuration values are merged with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Global file** – `$XDG_CONFIG_HOME/gh/pr-inbox.toml`, falling back
//!    to `$HOME/.config/gh/pr-inbox.toml`
//! 3. **Repository file** – `.github/pr-inbox.toml` in the repository root
//! 4. **Command-line arguments**
//!
//! Repository and pull request values detected from the local Git checkout
//! are only used when every layer leaves them unset.
//!
//! # Configuration File
//!
//! ```toml
//! repo = "octo/widgets"
//! format = "md"
//! budget = 20
//! include_diff = true
//! prompt_file = "prompts/review.md"
//! prompt = """
//! Address these threads:
//! {{THREADS_MD}}
//! """
//! ```

mod cli;
mod sources;

pub use cli::CliArgs;
pub use sources::{
    ConfigSources, GLOBAL_CONFIG_RELATIVE, REPO_CONFIG_RELATIVE, global_config_path,
    read_config_file, repo_config_path,
};

use std::env;

use ortho_config::{MergeComposer, OrthoConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::github::error::InboxError;
use crate::github::locator::PersonalAccessToken;
use crate::inbox::{CompactOptions, Priority, PriorityFilter};
use crate::render::OutputFormat;

/// Environment variables consulted for a token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Settings for one inbox run.
///
/// Every field can be set in either configuration file or on the command
/// line. Booleans can only be switched on by a higher layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "PR_INBOX")]
pub struct InboxConfig {
    /// Repository in `OWNER/REPO` form.
    #[ortho_config(cli_short = 'R')]
    pub repo: Option<String>,

    /// Pull request number.
    #[ortho_config(cli_short = 'p')]
    pub pr: Option<u64>,

    /// Personal access token.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise or testing.
    #[ortho_config(cli_short = 'a')]
    pub api_base: Option<String>,

    /// Output format: `md` or `json`.
    #[ortho_config(cli_short = 'f')]
    pub format: Option<String>,

    /// Include resolved threads.
    #[ortho_config(cli_short = 'A')]
    pub all: bool,

    /// Only show P0 items; overrides `priority` set in the same or a lower
    /// layer.
    #[ortho_config(cli_short = '0')]
    pub p0: bool,

    /// Priority filter: `all`, `p0`, `p1`, or `p2`.
    #[ortho_config(cli_short = 'P')]
    pub priority: Option<String>,

    /// Maximum number of items; 0 means unlimited.
    #[ortho_config(cli_short = 'b')]
    pub budget: usize,

    /// Attach diff context to items.
    #[ortho_config(cli_short = 'd')]
    pub include_diff: bool,

    /// Attach comment timestamps to items.
    #[ortho_config(cli_short = 'T')]
    pub include_times: bool,

    /// Attach every comment of a thread to its item.
    #[ortho_config(cli_short = 'c')]
    pub all_comments: bool,

    /// Also collect pull request conversation comments.
    #[ortho_config(cli_short = 'i')]
    pub include_issue_comments: bool,

    /// Skip the background update check.
    #[ortho_config(cli_short = 'n')]
    pub no_update_check: bool,

    /// Prompt template file.
    #[ortho_config(cli_short = 'F')]
    pub prompt_file: Option<String>,

    /// Prompt template text.
    #[ortho_config(cli_short = 'm')]
    pub prompt: Option<String>,
}

impl InboxConfig {
    /// Merges the configuration layers in precedence order.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Configuration`] if a configuration file cannot
    /// be read or parsed, or the merged layers do not form a valid
    /// configuration.
    pub fn load(sources: &ConfigSources) -> Result<Self, InboxError> {
        let mut composer = MergeComposer::new();
        composer.push_defaults(serde_json::to_value(Self::default()).map_err(|error| {
            InboxError::Configuration {
                message: format!("failed to serialise defaults: {error}"),
            }
        })?);

        let mut layers = Vec::new();
        for path in [&sources.global_file, &sources.repo_file]
            .into_iter()
            .flatten()
        {
            if let Some(layer) = read_config_file(path)? {
                tracing::debug!("loaded configuration from {path}");
                layers.push(layer.clone());
                composer.push_file(layer, None);
            }
        }

        let cli_layer = sources.cli.to_layer()?;
        layers.push(cli_layer.clone());
        composer.push_cli(cli_layer);

        let mut config = Self::merge_from_layers(composer.layers()).map_err(|error| {
            InboxError::Configuration {
                message: format!("failed to merge configuration: {error}"),
            }
        })?;
        config.reconcile_priority(&layers);
        Ok(config)
    }

    /// Lets the highest layer that selects a priority decide between `p0`
    /// and `priority`.
    ///
    /// `layers` are the file and command-line layers, lowest precedence
    /// first. Within one layer `p0` wins.
    fn reconcile_priority(&mut self, layers: &[Value]) {
        let priority_wins = layers
            .iter()
            .rev()
            .find_map(|layer| {
                let p0 = layer.get("p0").and_then(Value::as_bool) == Some(true);
                let priority = layer.get("priority").is_some_and(|value| !value.is_null());
                (p0 || priority).then_some(!p0)
            })
            .unwrap_or(false);
        if priority_wins {
            self.p0 = false;
        }
    }

    /// Resolves the authentication token from configuration or environment.
    ///
    /// Checks the configured token first, then `GITHUB_TOKEN`, then
    /// `GH_TOKEN`. Blank values are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::MissingToken`] if no source provides a token.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, InboxError> {
        let configured = self.token.clone();
        let from_env = TOKEN_ENV_VARS.iter().map(|name| env::var(name).ok());

        std::iter::once(configured)
            .chain(from_env)
            .flatten()
            .find_map(|candidate| PersonalAccessToken::new(candidate).ok())
            .ok_or(InboxError::MissingToken)
    }

    /// Returns the selected output format.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Configuration`] for an unknown format.
    pub fn output_format(&self) -> Result<OutputFormat, InboxError> {
        self.format
            .as_deref()
            .map_or(Ok(OutputFormat::default()), str::parse)
    }

    /// Returns the effective priority filter.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Configuration`] for an unknown priority.
    pub fn priority_filter(&self) -> Result<PriorityFilter, InboxError> {
        if self.p0 {
            return Ok(PriorityFilter::Only(Priority::P0));
        }
        self.priority
            .as_deref()
            .map_or(Ok(PriorityFilter::All), str::parse)
    }

    /// Builds compaction options from the configured switches.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Configuration`] for an unknown priority.
    pub fn compact_options(&self) -> Result<CompactOptions, InboxError> {
        Ok(CompactOptions {
            include_resolved: self.all,
            priority: self.priority_filter()?,
            include_diff: self.include_diff,
            include_times: self.include_times,
            all_comments: self.all_comments,
            budget: self.budget,
        })
    }
}

#[cfg(test)]
mod tests;

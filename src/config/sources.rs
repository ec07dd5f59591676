//! Configuration file locations and loading.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;

use super::cli::CliArgs;
use crate::github::error::InboxError;

/// Global configuration file, relative to the user configuration directory.
pub const GLOBAL_CONFIG_RELATIVE: &str = "gh/pr-inbox.toml";

/// Repository configuration file, relative to the repository root.
pub const REPO_CONFIG_RELATIVE: &str = ".github/pr-inbox.toml";

/// The inputs configuration is merged from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSources {
    /// Global configuration file, if a location could be determined.
    pub global_file: Option<Utf8PathBuf>,
    /// Repository configuration file, if running inside a repository.
    pub repo_file: Option<Utf8PathBuf>,
    /// Parsed command-line arguments.
    pub cli: CliArgs,
}

impl ConfigSources {
    /// Locates configuration files from the process environment and the
    /// discovered repository root.
    #[must_use]
    pub fn discover(repo_root: Option<&Utf8Path>, cli: CliArgs) -> Self {
        let xdg = std::env::var("XDG_CONFIG_HOME").ok();
        let home = std::env::var("HOME").ok();
        Self {
            global_file: global_config_path(xdg.as_deref(), home.as_deref()),
            repo_file: repo_root.map(repo_config_path),
            cli,
        }
    }
}

/// Returns the global configuration path.
///
/// Prefers `$XDG_CONFIG_HOME/gh/pr-inbox.toml` and falls back to
/// `$HOME/.config/gh/pr-inbox.toml`. Blank variables count as unset.
#[must_use]
pub fn global_config_path(
    xdg_config_home: Option<&str>,
    home: Option<&str>,
) -> Option<Utf8PathBuf> {
    let non_blank = |value: &&str| !value.trim().is_empty();

    xdg_config_home
        .filter(non_blank)
        .map(Utf8PathBuf::from)
        .or_else(|| {
            home.filter(non_blank)
                .map(|dir| Utf8Path::new(dir).join(".config"))
        })
        .map(|config_dir| config_dir.join(GLOBAL_CONFIG_RELATIVE))
}

/// Returns the repository configuration path under `repo_root`.
#[must_use]
pub fn repo_config_path(repo_root: &Utf8Path) -> Utf8PathBuf {
    repo_root.join(REPO_CONFIG_RELATIVE)
}

/// Reads a TOML configuration file into a configuration layer.
///
/// A missing file, or one that cannot be read, yields `None`; unreadable
/// files are logged and skipped.
///
/// # Errors
///
/// Returns [`InboxError::Configuration`] when the file exists but is not
/// valid TOML.
pub fn read_config_file(path: &Utf8Path) -> Result<Option<Value>, InboxError> {
    let Some(contents) = read_optional(path) else {
        return Ok(None);
    };

    toml::from_str::<Value>(&contents)
        .map(Some)
        .map_err(|error| InboxError::Configuration {
            message: format!("failed to parse '{path}': {error}"),
        })
}

fn read_optional(path: &Utf8Path) -> Option<String> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name()?;

    let result = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name));

    match result {
        Ok(contents) => Some(contents),
        Err(error) if error.kind() == io::ErrorKind::NotFound => None,
        Err(error) => {
            tracing::warn!("skipping unreadable configuration file '{path}': {error}");
            None
        }
    }
}

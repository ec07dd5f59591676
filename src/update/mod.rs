//! Background check for a newer release.
//!
//! The check runs as a detached Tokio task so it never delays the inbox. The
//! caller polls it once, after the main work is done, and prints whatever
//! notice is ready by then.
//!
//! ```no_run
//! # async fn example(client: octocrab::Octocrab) {
//! use pr_inbox::update::UpdateCheck;
//!
//! let mut check = UpdateCheck::spawn(client, "v0.1.0");
//! // ... build and print the inbox ...
//! if let Some(notice) = check.try_take() {
//!     tracing::info!("{notice}");
//! }
//! # }
//! ```

mod version;

pub use version::{ReleaseVersion, is_newer};

use std::time::Duration;

use octocrab::Octocrab;
use serde::Deserialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::github::error::InboxError;
use crate::github::gateway::map_octocrab_error;

/// Owner of the repository whose releases are checked.
pub const RELEASE_OWNER: &str = "leynos";

/// Repository whose releases are checked.
pub const RELEASE_REPOSITORY: &str = "pr-inbox";

/// Upper bound for the whole check.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// Versions that never trigger a check.
const UNRELEASED_VERSIONS: [&str; 2] = ["", "dev"];

#[derive(Debug, Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Handle to a running update check.
///
/// Dropping the handle aborts the check if it is still running.
#[derive(Debug)]
pub struct UpdateCheck {
    receiver: oneshot::Receiver<String>,
    task: JoinHandle<()>,
}

impl UpdateCheck {
    /// Starts the check on the current Tokio runtime.
    ///
    /// Failures and timeouts are logged at debug level and otherwise ignored.
    #[must_use]
    pub fn spawn(client: Octocrab, current_version: &str) -> Self {
        let (sender, receiver) = oneshot::channel();
        let current = current_version.trim().to_owned();

        let task = tokio::spawn(async move {
            if let Some(notice) = bounded_check(&client, &current).await
                && sender.send(notice).is_err()
            {
                tracing::debug!("update notice dropped; receiver closed");
            }
        });

        Self { receiver, task }
    }

    /// Returns the update notice if the check has already produced one.
    ///
    /// Never blocks. Returns `None` while the check is still running, when
    /// no newer release exists, or when the check failed.
    pub fn try_take(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for UpdateCheck {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Runs [`check_for_update`] within [`CHECK_TIMEOUT`], logging any failure
/// at debug level.
async fn bounded_check(client: &Octocrab, current: &str) -> Option<String> {
    match tokio::time::timeout(CHECK_TIMEOUT, check_for_update(client, current)).await {
        Ok(Ok(notice)) => {
            if notice.is_none() {
                tracing::debug!("no newer release than {current}");
            }
            notice
        }
        Ok(Err(error)) => {
            tracing::debug!("update check failed: {error}");
            None
        }
        Err(_) => {
            tracing::debug!("update check timed out after {CHECK_TIMEOUT:?}");
            None
        }
    }
}

/// Looks up the latest release and builds a notice when it is newer than
/// `current_version`.
///
/// Returns `Ok(None)` without a request for unreleased builds.
///
/// # Errors
///
/// Returns the mapped [`InboxError`] when the release lookup fails.
pub async fn check_for_update(
    client: &Octocrab,
    current_version: &str,
) -> Result<Option<String>, InboxError> {
    let current = current_version.trim();
    if UNRELEASED_VERSIONS.contains(&current) {
        return Ok(None);
    }

    let route = format!("/repos/{RELEASE_OWNER}/{RELEASE_REPOSITORY}/releases/latest");
    let release = client
        .get::<LatestRelease, _, _>(route, None::<&()>)
        .await
        .map_err(|error| map_octocrab_error("latest release", &error))?;

    let latest = release.tag_name.trim();
    Ok(is_newer(latest, current).then(|| update_notice(latest, current)))
}

/// Formats the notice shown when `latest` supersedes `current`.
#[must_use]
pub fn update_notice(latest: &str, current: &str) -> String {
    format!(
        "Update available: {latest} (current {current}). \
         Run: cargo install --locked {RELEASE_REPOSITORY}"
    )
}

//! Local Git repository discovery.
//!
//! Finds the repository containing a directory, its checked-out branch, and
//! the GitHub origin its `origin` remote points at.

use camino::{Utf8Path, Utf8PathBuf};
use git2::Repository;

use super::error::LocalDiscoveryError;
use super::remote::{GitHubOrigin, parse_github_remote};

/// Remote consulted for the GitHub origin.
const DEFAULT_REMOTE_NAME: &str = "origin";

/// A discovered local Git repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    workdir: Utf8PathBuf,
    branch: Option<String>,
}

impl LocalRepository {
    /// Returns the repository working directory.
    #[must_use]
    pub fn workdir(&self) -> &Utf8Path {
        &self.workdir
    }

    /// Returns the checked-out branch, or `None` for a detached or unborn
    /// HEAD.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    /// Resolves the GitHub origin from the `origin` remote.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::NoRemotes`],
    /// [`LocalDiscoveryError::RemoteNotFound`], or
    /// [`LocalDiscoveryError::InvalidRemoteUrl`] when no usable GitHub remote
    /// is configured.
    pub fn github_origin(&self) -> Result<GitHubOrigin, LocalDiscoveryError> {
        self.github_origin_for(DEFAULT_REMOTE_NAME)
    }

    /// Resolves the GitHub origin from a named remote.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`LocalRepository::github_origin`].
    pub fn github_origin_for(
        &self,
        remote_name: &str,
    ) -> Result<GitHubOrigin, LocalDiscoveryError> {
        let repo = Repository::open(self.workdir.as_std_path())?;

        if repo.remotes()?.is_empty() {
            return Err(LocalDiscoveryError::NoRemotes);
        }

        let remote = repo.find_remote(remote_name).map_err(|error| {
            if error.code() == git2::ErrorCode::NotFound {
                LocalDiscoveryError::RemoteNotFound {
                    name: remote_name.to_owned(),
                }
            } else {
                LocalDiscoveryError::from(error)
            }
        })?;

        let url = remote
            .url()
            .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
                url: "(no URL)".to_owned(),
            })?;
        parse_github_remote(url)
    }
}

/// Discovers the Git repository containing `start_path`.
///
/// Searches `start_path` and its ancestors.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::NotARepository`] outside a repository or
/// for a bare repository, [`LocalDiscoveryError::NonUtf8Path`] when the
/// working directory is not valid UTF-8, and [`LocalDiscoveryError::Git`]
/// for other Git failures.
pub fn discover_repository(start_path: &Utf8Path) -> Result<LocalRepository, LocalDiscoveryError> {
    let repo = Repository::discover(start_path.as_std_path()).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let raw_workdir = repo
        .workdir()
        .ok_or(LocalDiscoveryError::NotARepository)?
        .to_path_buf();
    let workdir = Utf8PathBuf::from_path_buf(raw_workdir).map_err(|path| {
        LocalDiscoveryError::NonUtf8Path {
            path: path.display().to_string(),
        }
    })?;

    let branch = current_branch(&repo);
    tracing::debug!(
        "discovered repository at {workdir} on branch {}",
        branch.as_deref().unwrap_or("(detached)")
    );

    Ok(LocalRepository { workdir, branch })
}

fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.head().ok()?;
    if !head.is_branch() {
        return None;
    }
    head.shorthand().map(ToOwned::to_owned)
}

//! Git remote URL parsing with GitHub origin detection.

use url::Url;

use super::error::LocalDiscoveryError;

/// A GitHub repository identified from a Git remote.
///
/// Distinguishes `github.com` from GitHub Enterprise installations, whose
/// API lives on the same host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubOrigin {
    /// Standard `github.com` repository.
    GitHubCom {
        /// Repository owner (user or organisation).
        owner: String,
        /// Repository name.
        repository: String,
    },
    /// GitHub Enterprise repository on a custom host.
    Enterprise {
        /// The GitHub Enterprise host (e.g., `ghe.example.com`).
        host: String,
        /// Optional port number for non-default HTTPS ports.
        port: Option<u16>,
        /// Repository owner (user or organisation).
        owner: String,
        /// Repository name.
        repository: String,
    },
}

impl GitHubOrigin {
    fn new(host: &str, port: Option<u16>, owner_name: &str, repository_name: &str) -> Self {
        let owner = owner_name.to_owned();
        let repository = repository_name.to_owned();
        if host.eq_ignore_ascii_case("github.com") {
            Self::GitHubCom { owner, repository }
        } else {
            Self::Enterprise {
                host: host.to_owned(),
                port,
                owner,
                repository,
            }
        }
    }

    /// Returns the repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::GitHubCom { owner, .. } | Self::Enterprise { owner, .. } => owner,
        }
    }

    /// Returns the repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::GitHubCom { repository, .. } | Self::Enterprise { repository, .. } => repository,
        }
    }

    /// Returns the host for this origin.
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::GitHubCom { .. } => "github.com",
            Self::Enterprise { host, .. } => host,
        }
    }

    /// Returns the port for Enterprise origins on a non-default port.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        match self {
            Self::GitHubCom { .. } => None,
            Self::Enterprise { port, .. } => *port,
        }
    }
}

/// Parses a Git remote URL into a GitHub origin.
///
/// Accepts SCP-style SSH remotes (`git@github.com:owner/repo.git`) and
/// URL-style remotes (`ssh://`, `https://`, `git://`). A trailing `.git`
/// and trailing slashes are ignored.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] if the URL has no host
/// or its path is not exactly `owner/repo`.
pub fn parse_github_remote(url: &str) -> Result<GitHubOrigin, LocalDiscoveryError> {
    let invalid = || LocalDiscoveryError::InvalidRemoteUrl {
        url: url.to_owned(),
    };

    let parsed = Url::parse(&scp_to_ssh_url(url.trim())).map_err(|_| invalid())?;
    let host = parsed
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(invalid)?;
    let (owner, repository) = owner_and_repository(parsed.path()).ok_or_else(invalid)?;
    // Only web remotes carry a port the API is also served on.
    let port = parsed
        .port()
        .filter(|_| matches!(parsed.scheme(), "http" | "https"));

    Ok(GitHubOrigin::new(host, port, owner, repository))
}

/// Rewrites `user@host:path` into `ssh://user@host/path`.
///
/// Anything that already carries a scheme, or has no `@` before the first
/// colon, is returned unchanged.
fn scp_to_ssh_url(remote: &str) -> String {
    if remote.contains("://") {
        return remote.to_owned();
    }
    match remote.split_once(':') {
        Some((user_host, path)) if user_host.contains('@') => {
            format!("ssh://{user_host}/{}", path.trim_start_matches('/'))
        }
        _ => remote.to_owned(),
    }
}

fn owner_and_repository(path: &str) -> Option<(&str, &str)> {
    let mut segments = path.trim_matches('/').split('/');
    let owner = segments.next().filter(|owner| !owner.is_empty())?;
    let segment = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    let repository = segment.strip_suffix(".git").unwrap_or(segment);
    (!repository.is_empty()).then_some((owner, repository))
}

//! Error types for local repository discovery.

use thiserror::Error;

/// Errors that may occur during local repository discovery.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalDiscoveryError {
    /// The directory is not within a Git working tree.
    #[error("not inside a Git repository")]
    NotARepository,

    /// The working tree path is not valid UTF-8.
    #[error("repository path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },

    /// The repository has no remotes configured.
    #[error("repository has no remotes configured")]
    NoRemotes,

    /// The requested remote does not exist.
    #[error("remote '{name}' not found")]
    RemoteNotFound {
        /// Name of the missing remote.
        name: String,
    },

    /// The remote URL does not name a GitHub repository.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The rejected URL.
        url: String,
    },

    /// Git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for LocalDiscoveryError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}

//! Error types surfaced while assembling a pull request inbox.

use thiserror::Error;

/// Errors surfaced while resolving configuration, talking to GitHub, or
/// writing rendered output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InboxError {
    /// No repository was configured and none could be detected.
    #[error(
        "repository required: specify with --repo or run from a git repository with a GitHub origin"
    )]
    MissingRepository,

    /// The repository slug was not in `OWNER/REPO` form.
    #[error("invalid repository format: {value}")]
    InvalidRepository {
        /// The rejected repository value.
        value: String,
    },

    /// No pull request number was configured and none could be detected.
    #[error(
        "PR number required: specify with argument, --pr flag, or run from a PR branch"
    )]
    MissingPullRequestNumber,

    /// The pull request number is not a positive integer.
    #[error("invalid PR number '{value}': must be a positive integer")]
    InvalidPullRequestNumber {
        /// The rejected value.
        value: String,
    },

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// The authentication token was missing.
    #[error("GitHub token is required (use --token, GITHUB_TOKEN, or GH_TOKEN)")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The API rate limit was exhausted.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Error message from GitHub.
        message: String,
    },

    /// A paginated response could not be continued.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the pagination fault.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local repository discovery failed.
    #[error("local discovery: {message}")]
    LocalDiscovery {
        /// Details about the discovery failure.
        message: String,
    },
}

impl InboxError {
    /// Converts an I/O error into [`InboxError::Io`].
    #[must_use]
    pub fn io(error: &std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<crate::local::LocalDiscoveryError> for InboxError {
    fn from(error: crate::local::LocalDiscoveryError) -> Self {
        Self::LocalDiscovery {
            message: error.to_string(),
        }
    }
}

//! Repository and pull request identity wrappers.

use std::fmt;

use url::Url;

use super::error::InboxError;
use crate::local::GitHubOrigin;

/// Public GitHub API endpoint.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str, slug: &str) -> Result<Self, InboxError> {
        if value.is_empty() {
            return Err(InboxError::InvalidRepository {
                value: slug.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str, slug: &str) -> Result<Self, InboxError> {
        if value.is_empty() {
            return Err(InboxError::InvalidRepository {
                value: slug.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::InvalidPullRequestNumber`] for zero.
    pub fn new(value: u64) -> Result<Self, InboxError> {
        if value == 0 {
            return Err(InboxError::InvalidPullRequestNumber {
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Parses a pull request number from a command-line argument.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::InvalidPullRequestNumber`] when the input is not
    /// a positive integer.
    pub fn parse(input: &str) -> Result<Self, InboxError> {
        let invalid = || InboxError::InvalidPullRequestNumber {
            value: input.to_owned(),
        };
        let value = input.trim().parse::<u64>().map_err(|_| invalid())?;
        Self::new(value).map_err(|_| invalid())
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, InboxError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InboxError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

/// Derives the API base URL for a GitHub host.
///
/// `github.com` maps to the public API; any other host is treated as a
/// GitHub Enterprise installation serving its API under `/api`.
fn derive_api_base(host: &str, port: Option<u16>) -> Result<Url, InboxError> {
    if host.eq_ignore_ascii_case("github.com") {
        return Url::parse(GITHUB_API_BASE)
            .map_err(|error| InboxError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("https://{authority}"))
        .map_err(|error| InboxError::InvalidUrl(error.to_string()))?;
    api_url
        .set_port(port)
        .map_err(|()| InboxError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api");
    Ok(api_url)
}

/// A GitHub repository and the API endpoint that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses an `OWNER/REPO` slug against the given API base.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::InvalidRepository`] when the slug does not have
    /// exactly two non-empty segments, or [`InboxError::InvalidUrl`] when the
    /// API base cannot be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// use pr_inbox::github::RepositoryLocator;
    ///
    /// let locator = RepositoryLocator::from_slug("octo/widgets", "https://api.github.com")
    ///     .expect("slug should parse");
    /// assert_eq!(locator.slug(), "octo/widgets");
    /// ```
    pub fn from_slug(slug: &str, api_base: &str) -> Result<Self, InboxError> {
        let trimmed = slug.trim();
        let mut segments = trimmed.split('/');
        let (Some(owner), Some(repository), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(InboxError::InvalidRepository {
                value: slug.to_owned(),
            });
        };

        let base_url =
            Url::parse(api_base).map_err(|error| InboxError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base: base_url,
            owner: RepositoryOwner::new(owner, slug)?,
            repository: RepositoryName::new(repository, slug)?,
        })
    }

    /// Builds a locator from a remote discovered in the local repository.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::InvalidRepository`] if owner or repository is
    /// empty, or [`InboxError::InvalidUrl`] if the enterprise host is invalid.
    pub fn from_github_origin(origin: &GitHubOrigin) -> Result<Self, InboxError> {
        let slug = format!("{}/{}", origin.owner(), origin.repository());
        Ok(Self {
            api_base: derive_api_base(origin.host(), origin.port())?,
            owner: RepositoryOwner::new(origin.owner(), &slug)?,
            repository: RepositoryName::new(origin.repository(), &slug)?,
        })
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Returns the `OWNER/REPO` slug.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}

/// A single pull request within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    repository: RepositoryLocator,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Combines a repository and a pull request number.
    #[must_use]
    pub const fn new(repository: RepositoryLocator, number: PullRequestNumber) -> Self {
        Self { repository, number }
    }

    /// The repository hosting the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }
}

//! Resolution of the repository and pull request to summarise.

use pr_inbox::config::InboxConfig;
use pr_inbox::github::{
    GITHUB_API_BASE, InboxError, PullRequestNumber, RepositoryLocator, ThreadSource,
};
use pr_inbox::local::LocalRepository;

/// Determines the repository from configuration, falling back to the local
/// checkout's `origin` remote.
///
/// A configured `api_base` overrides the endpoint derived from the remote.
///
/// # Errors
///
/// Returns [`InboxError::MissingRepository`] when neither source names a
/// repository, or the slug and URL validation errors of
/// [`RepositoryLocator`].
pub fn resolve_repository(
    config: &InboxConfig,
    local: Option<&LocalRepository>,
) -> Result<RepositoryLocator, InboxError> {
    let api_base = config.api_base.as_deref().filter(|base| !base.trim().is_empty());

    if let Some(slug) = config.repo.as_deref().filter(|slug| !slug.trim().is_empty()) {
        return RepositoryLocator::from_slug(slug, api_base.unwrap_or(GITHUB_API_BASE));
    }

    let origin = local
        .ok_or(InboxError::MissingRepository)?
        .github_origin()
        .map_err(|error| {
            tracing::debug!("no repository from local checkout: {error}");
            InboxError::MissingRepository
        })?;

    match api_base {
        Some(base) => RepositoryLocator::from_slug(
            &format!("{}/{}", origin.owner(), origin.repository()),
            base,
        ),
        None => RepositoryLocator::from_github_origin(&origin),
    }
}

/// Determines the pull request number from configuration, falling back to
/// the open pull request for the checked-out branch.
///
/// # Errors
///
/// Returns [`InboxError::MissingPullRequestNumber`] when no number is
/// configured and the branch has no open pull request, or any error the
/// source reports during the lookup.
pub async fn resolve_pull_request<S: ThreadSource + ?Sized>(
    config: &InboxConfig,
    source: &S,
    repository: &RepositoryLocator,
    local: Option<&LocalRepository>,
) -> Result<PullRequestNumber, InboxError> {
    if let Some(number) = config.pr {
        return PullRequestNumber::new(number);
    }

    let branch = local
        .and_then(LocalRepository::branch)
        .ok_or(InboxError::MissingPullRequestNumber)?;
    tracing::debug!("looking up open pull request for branch {branch}");

    source
        .pull_request_for_branch(repository, branch)
        .await?
        .ok_or(InboxError::MissingPullRequestNumber)
        .and_then(PullRequestNumber::new)
}

#[cfg(test)]
mod tests {
    use pr_inbox::config::InboxConfig;
    use pr_inbox::github::{GITHUB_API_BASE, InboxError, RepositoryLocator};
    use rstest::rstest;

    use super::{resolve_pull_request, resolve_repository};
    use crate::cli::test_utils::{StubSource, block_on, local_checkout};

    #[rstest]
    fn configured_slug_wins_over_checkout() {
        let checkout = local_checkout("git@github.com:local/checkout.git", None);
        let config = InboxConfig {
            repo: Some("octo/widgets".to_owned()),
            ..Default::default()
        };

        let locator =
            resolve_repository(&config, Some(checkout.repository())).expect("should resolve");

        assert_eq!(locator.slug(), "octo/widgets");
        assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
    }

    #[rstest]
    fn configured_api_base_is_used_for_slug() {
        let config = InboxConfig {
            repo: Some("octo/widgets".to_owned()),
            api_base: Some("https://ghe.example.com/api".to_owned()),
            ..Default::default()
        };

        let locator = resolve_repository(&config, None).expect("should resolve");

        assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api");
    }

    #[rstest]
    fn checkout_origin_is_the_fallback() {
        let checkout = local_checkout("git@ghe.example.com:team/service.git", None);

        let locator = resolve_repository(&InboxConfig::default(), Some(checkout.repository()))
            .expect("should resolve");

        assert_eq!(locator.slug(), "team/service");
        assert_eq!(locator.api_base().as_str(), "https://ghe.example.com/api");
    }

    #[rstest]
    fn missing_repository_is_reported() {
        assert_eq!(
            resolve_repository(&InboxConfig::default(), None),
            Err(InboxError::MissingRepository)
        );
    }

    #[rstest]
    fn configured_number_skips_branch_lookup() {
        let source = StubSource::with_branch_pull_request(Some(99));
        let repository =
            RepositoryLocator::from_slug("octo/widgets", GITHUB_API_BASE).expect("slug");
        let config = InboxConfig {
            pr: Some(7),
            ..Default::default()
        };

        let number = block_on(resolve_pull_request(&config, &source, &repository, None))
            .expect("should resolve");

        assert_eq!(number.get(), 7);
        assert!(source.branch_lookups().is_empty());
    }

    #[rstest]
    fn zero_is_rejected() {
        let source = StubSource::with_branch_pull_request(None);
        let repository =
            RepositoryLocator::from_slug("octo/widgets", GITHUB_API_BASE).expect("slug");
        let config = InboxConfig {
            pr: Some(0),
            ..Default::default()
        };

        let result = block_on(resolve_pull_request(&config, &source, &repository, None));

        assert!(matches!(
            result,
            Err(InboxError::InvalidPullRequestNumber { .. })
        ));
    }

    #[rstest]
    #[case::found(Some(31), Ok(31))]
    #[case::not_found(None, Err(InboxError::MissingPullRequestNumber))]
    fn branch_lookup_resolves_number(
        #[case] open_pull_request: Option<u64>,
        #[case] expected: Result<u64, InboxError>,
    ) {
        let checkout = local_checkout("git@github.com:octo/widgets.git", Some("feature/cache"));
        let source = StubSource::with_branch_pull_request(open_pull_request);
        let repository =
            RepositoryLocator::from_slug("octo/widgets", GITHUB_API_BASE).expect("slug");

        let result = block_on(resolve_pull_request(
            &InboxConfig::default(),
            &source,
            &repository,
            Some(checkout.repository()),
        ));

        assert_eq!(result.map(|number| number.get()), expected);
        assert_eq!(source.branch_lookups(), vec!["feature/cache".to_owned()]);
    }

    #[rstest]
    fn checkout_without_branch_needs_a_number() {
        let checkout = local_checkout("git@github.com:octo/widgets.git", None);
        let source = StubSource::with_branch_pull_request(Some(5));
        let repository =
            RepositoryLocator::from_slug("octo/widgets", GITHUB_API_BASE).expect("slug");

        let result = block_on(resolve_pull_request(
            &InboxConfig::default(),
            &source,
            &repository,
            Some(checkout.repository()),
        ));

        assert_eq!(result, Err(InboxError::MissingPullRequestNumber));
        assert!(source.branch_lookups().is_empty());
    }
}

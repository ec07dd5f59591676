//! Gateways for loading review discussions through Octocrab.
//!
//! The [`ThreadSource`] trait is the seam between the inbox pipeline and
//! GitHub. Each paged method returns one page and leaves cursor handling to
//! [`collect_pages`](crate::github::collect_pages), which keeps the trait
//! easy to mock. [`OctocrabThreadSource`] is the GraphQL-backed
//! implementation.

mod client;
mod error_mapping;
mod thread_source;

pub use client::build_octocrab_client;
pub(crate) use error_mapping::map_octocrab_error;
pub use thread_source::OctocrabThreadSource;

use async_trait::async_trait;

use crate::github::error::InboxError;
use crate::github::locator::{PullRequestLocator, RepositoryLocator};
use crate::github::models::{ApiConversationComment, ApiReviewThread, ApiThreadComment};
use crate::github::pagination::Page;
use crate::inbox::PrMeta;

/// Source of pull request metadata and discussion records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadSource: Send + Sync {
    /// Fetch the pull request title, URL, and goal.
    async fn pull_request_meta(&self, locator: &PullRequestLocator)
    -> Result<PrMeta, InboxError>;

    /// Fetch one page of review threads starting after `cursor`.
    async fn review_threads_page(
        &self,
        locator: &PullRequestLocator,
        cursor: Option<String>,
    ) -> Result<Page<ApiReviewThread>, InboxError>;

    /// Fetch one page of the comments of review thread `thread_id`,
    /// starting after `cursor`.
    ///
    /// Used when a thread has more comments than fit in its first page.
    async fn thread_comments_page(
        &self,
        thread_id: &str,
        cursor: Option<String>,
    ) -> Result<Page<ApiThreadComment>, InboxError>;

    /// Fetch one page of conversation comments starting after `cursor`.
    async fn conversation_comments_page(
        &self,
        locator: &PullRequestLocator,
        cursor: Option<String>,
    ) -> Result<Page<ApiConversationComment>, InboxError>;

    /// Find the open pull request whose head is `branch`, if any.
    async fn pull_request_for_branch(
        &self,
        repository: &RepositoryLocator,
        branch: &str,
    ) -> Result<Option<u64>, InboxError>;
}

//! GitHub access: identities, raw API models, pagination, and the thread
//! source gateway.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;

pub use error::InboxError;
pub use gateway::{OctocrabThreadSource, ThreadSource, build_octocrab_client};
pub use locator::{
    GITHUB_API_BASE, PersonalAccessToken, PullRequestLocator, PullRequestNumber,
    RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{
    ApiActor, ApiConversationComment, ApiPullRequest, ApiPullRequestRef, ApiReviewThread,
    ApiThreadComment,
};
pub use pagination::{Page, PageInfo, collect_pages, collect_pages_from};

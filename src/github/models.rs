//! Raw GraphQL nodes returned by the thread source.
//!
//! These are deserialisation targets mirroring the GitHub GraphQL schema.
//! They are handed to the inbox normaliser, which converts them into the
//! uniform thread model.

use serde::Deserialize;

use super::pagination::Page;

/// The author of a comment. Deleted accounts come back as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiActor {
    /// Account login.
    pub login: String,
}

/// A line-anchored review thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReviewThread {
    /// GraphQL node id.
    pub id: String,
    /// Whether the thread has been marked resolved.
    #[serde(default)]
    pub is_resolved: bool,
    /// File path the thread is attached to.
    #[serde(default)]
    pub path: String,
    /// Line in the current diff, if the anchor still exists.
    #[serde(default)]
    pub line: Option<u32>,
    /// Line at the time the thread was started.
    #[serde(default)]
    pub original_line: Option<u32>,
    /// Comments in chronological order.
    #[serde(default)]
    pub comments: Page<ApiThreadComment>,
}

/// A comment inside a review thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiThreadComment {
    /// GraphQL node id.
    pub id: String,
    /// Numeric REST identifier.
    #[serde(default)]
    pub database_id: Option<u64>,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
    /// Comment author.
    #[serde(default)]
    pub author: Option<ApiActor>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Permalink to the comment.
    #[serde(default)]
    pub url: String,
    /// Diff context the comment was made against.
    #[serde(default)]
    pub diff_hunk: Option<String>,
}

/// A general conversation comment on the pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConversationComment {
    /// GraphQL node id.
    pub id: String,
    /// Numeric REST identifier.
    #[serde(default)]
    pub database_id: Option<u64>,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
    /// Comment author.
    #[serde(default)]
    pub author: Option<ApiActor>,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Permalink to the comment.
    #[serde(default)]
    pub url: String,
}

/// Pull request fields needed to describe the inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// HTML URL.
    #[serde(default)]
    pub url: String,
    /// Description rendered as plain text.
    #[serde(default)]
    pub body_text: String,
}

/// A pull request reference returned by a head-branch lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiPullRequestRef {
    /// Pull request number.
    pub number: u64,
}

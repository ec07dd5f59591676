//! Uniform thread model and the compacted inbox representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// File path assigned to pull request conversation threads.
pub const CONVERSATION_FILE_PATH: &str = "PR conversation";

/// Thread id prefix for pull request conversation threads.
pub const CONVERSATION_ID_PREFIX: &str = "conversation:";

/// Author name used when GitHub no longer knows who wrote a comment.
pub const GHOST_AUTHOR: &str = "ghost";

/// A single comment within a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Stable comment identifier.
    pub id: String,
    /// Raw Markdown body.
    pub body: String,
    /// Author login.
    pub author: String,
    /// Creation timestamp; empty when unknown or stripped.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,
    /// Permalink.
    #[serde(default)]
    pub url: String,
}

/// A discussion thread in chronological comment order.
///
/// Line-anchored review threads carry a file path and line; conversation
/// threads use [`CONVERSATION_FILE_PATH`] and line zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thread {
    /// Thread identifier.
    pub id: String,
    /// File the thread is attached to.
    pub file_path: String,
    /// Anchored line; zero when the thread is not line-anchored.
    pub line: u32,
    /// Whether the thread is resolved.
    pub resolved: bool,
    /// Comments, oldest first.
    pub comments: Vec<Comment>,
    /// Diff context of the root comment.
    pub diff_hunk: Option<String>,
    /// Thread permalink.
    pub url: String,
}

impl Thread {
    /// The first comment, which opened the thread.
    #[must_use]
    pub fn root(&self) -> Option<&Comment> {
        self.comments.first()
    }

    /// The most recent comment.
    #[must_use]
    pub fn latest(&self) -> Option<&Comment> {
        self.comments.last()
    }
}

/// Urgency rank of an inbox item. `P0` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Blocking or high-risk feedback.
    P0,
    /// Regular feedback.
    P1,
    /// Nits and optional suggestions.
    P2,
}

impl Priority {
    /// All priorities in rank order.
    pub const ALL: [Self; 3] = [Self::P0, Self::P1, Self::P2];

    /// Returns the label used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The compact, prioritised view of one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxItem {
    /// Source thread identifier.
    pub thread_id: String,
    /// Assigned priority.
    pub priority: Priority,
    /// File the thread is attached to.
    pub file_path: String,
    /// Anchored line; zero when not line-anchored.
    pub line_number: u32,
    /// Author of the root comment.
    pub author: String,
    /// Condensed root comment body.
    pub summary: String,
    /// Condensed latest comment body.
    pub latest: String,
    /// Link to the latest comment, or the thread when it has none.
    pub url: String,
    /// Whether the thread is resolved.
    pub resolved: bool,
    /// Diff context, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_hunk: Option<String>,
    /// Root comment timestamp, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_created_at: Option<String>,
    /// Latest comment timestamp, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_created_at: Option<String>,
    /// Full comment list, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}

/// Minimal pull request metadata used as inbox context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrMeta {
    /// Pull request number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// HTML URL.
    pub url: String,
    /// Leading portion of the pull request description.
    pub goal: String,
    /// `OWNER/REPO` slug.
    pub repo: String,
}

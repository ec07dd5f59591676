//! Keyword heuristic that ranks threads by urgency.

use std::str::FromStr;

use super::model::{Priority, Thread};
use crate::github::error::InboxError;

const HIGH_SIGNALS: [&str; 8] = [
    "must", "block", "blocking", "security", "crash", "bug", "failure", "incorrect",
];

const LOW_SIGNALS: [&str; 6] = ["nit", "nitpick", "style", "optional", "suggest", "tiny"];

/// Threads with more comments than this are treated as active discussions.
const BUSY_THREAD_COMMENTS: usize = 4;

/// Classifies a thread from its root comment body and comment count.
///
/// Signals are matched case-insensitively as substrings, so `"blocker"`
/// still counts as a blocking signal. The order of checks is significant:
/// high signals beat busy threads, which beat low signals.
///
/// # Examples
///
/// ```
/// use pr_inbox::inbox::{Priority, classify};
///
/// assert_eq!(classify("This MUST be fixed", 1), Priority::P0);
/// assert_eq!(classify("nit: spacing", 1), Priority::P2);
/// assert_eq!(classify("nit: spacing", 5), Priority::P1);
/// ```
#[must_use]
pub fn classify(root_body: &str, comment_count: usize) -> Priority {
    let text = root_body.to_lowercase();

    if HIGH_SIGNALS.iter().any(|signal| text.contains(signal)) {
        return Priority::P0;
    }
    if comment_count > BUSY_THREAD_COMMENTS {
        return Priority::P1;
    }
    if LOW_SIGNALS.iter().any(|signal| text.contains(signal)) {
        return Priority::P2;
    }
    Priority::P1
}

/// Classifies a thread using its root comment.
///
/// Returns `None` for threads without comments.
#[must_use]
pub fn classify_thread(thread: &Thread) -> Option<Priority> {
    thread
        .root()
        .map(|root| classify(&root.body, thread.comments.len()))
}

/// Restricts an inbox to one priority, or keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    /// Keep every priority.
    #[default]
    All,
    /// Keep only the given priority.
    Only(Priority),
}

impl PriorityFilter {
    /// Returns true if an item with `priority` passes the filter.
    #[must_use]
    pub fn admits(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = InboxError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "p0" => Ok(Self::Only(Priority::P0)),
            "p1" => Ok(Self::Only(Priority::P1)),
            "p2" => Ok(Self::Only(Priority::P2)),
            _ => Err(InboxError::Configuration {
                message: format!("invalid priority '{value}': expected all, p0, p1, or p2"),
            }),
        }
    }
}

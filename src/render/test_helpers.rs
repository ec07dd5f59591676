//! Shared test utilities for rendering tests.

use crate::inbox::{Comment, InboxItem, PrMeta, Priority};

/// Test data constants.
pub mod test_data {
    /// Sample repository slug.
    pub const SAMPLE_REPO: &str = "octo/widgets";
    /// Sample pull request URL.
    pub const SAMPLE_PR_URL: &str = "https://github.com/octo/widgets/pull/42";
    /// Sample author name.
    pub const SAMPLE_AUTHOR: &str = "alice";
    /// Sample diff hunk.
    pub const SAMPLE_DIFF_HUNK: &str = "@@ -40,3 +40,5 @@\n let x = 1;\n+let y = 2;\n";
    /// Sample timestamp.
    pub const SAMPLE_TIMESTAMP: &str = "2025-01-15T10:00:00Z";
}

/// Returns metadata for the sample pull request.
#[must_use]
pub fn sample_meta() -> PrMeta {
    PrMeta {
        number: 42,
        title: "Add widget cache".to_owned(),
        url: test_data::SAMPLE_PR_URL.to_owned(),
        goal: "Speed up widget lookups.".to_owned(),
        repo: test_data::SAMPLE_REPO.to_owned(),
    }
}

/// Builder for [`InboxItem`] values with a fluent API.
#[must_use]
pub struct ItemBuilder {
    item: InboxItem,
}

impl ItemBuilder {
    /// Creates a P1 item on `src/lib.rs` with the given thread id.
    pub fn new(thread_id: &str) -> Self {
        Self {
            item: InboxItem {
                thread_id: thread_id.to_owned(),
                priority: Priority::P1,
                file_path: "src/lib.rs".to_owned(),
                line_number: 0,
                author: test_data::SAMPLE_AUTHOR.to_owned(),
                summary: format!("summary of {thread_id}"),
                latest: format!("latest of {thread_id}"),
                url: format!("{}#{thread_id}", test_data::SAMPLE_PR_URL),
                resolved: false,
                diff_hunk: None,
                root_created_at: None,
                latest_created_at: None,
                comments: Vec::new(),
            },
        }
    }

    /// Sets the priority.
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.item.priority = priority;
        self
    }

    /// Sets the file path.
    pub fn file_path(mut self, file_path: &str) -> Self {
        self.item.file_path = file_path.to_owned();
        self
    }

    /// Sets the line number.
    pub const fn line(mut self, line: u32) -> Self {
        self.item.line_number = line;
        self
    }

    /// Sets the summary.
    pub fn summary(mut self, summary: &str) -> Self {
        self.item.summary = summary.to_owned();
        self
    }

    /// Sets the diff hunk.
    pub fn diff_hunk(mut self, diff_hunk: &str) -> Self {
        self.item.diff_hunk = Some(diff_hunk.to_owned());
        self
    }

    /// Sets both timestamps.
    pub fn times(mut self, created: &str, updated: &str) -> Self {
        self.item.root_created_at = Some(created.to_owned());
        self.item.latest_created_at = Some(updated.to_owned());
        self
    }

    /// Appends a comment.
    pub fn comment(mut self, author: &str, body: &str, created_at: &str, url: &str) -> Self {
        self.item.comments.push(Comment {
            id: (self.item.comments.len() + 1).to_string(),
            body: body.to_owned(),
            author: author.to_owned(),
            created_at: created_at.to_owned(),
            url: url.to_owned(),
        });
        self
    }

    /// Builds the item.
    #[must_use]
    pub fn build(self) -> InboxItem {
        self.item
    }
}

/// Asserts that `haystack` contains `needle`, returning an error if not.
///
/// # Errors
///
/// Returns a description of the mismatch.
pub fn assert_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(format!(
            "expected output to contain '{needle}', got:\n{haystack}"
        ))
    }
}

/// Asserts that `haystack` does NOT contain `needle`, returning an error if it does.
///
/// # Errors
///
/// Returns a description of the mismatch.
pub fn assert_not_contains(haystack: &str, needle: &str) -> Result<(), String> {
    if haystack.contains(needle) {
        Err(format!(
            "expected output to NOT contain '{needle}', got:\n{haystack}"
        ))
    } else {
        Ok(())
    }
}

//! Reduces normalised threads to a sorted, prioritised inbox.

use super::model::{Comment, InboxItem, Thread};
use super::priority::{PriorityFilter, classify_thread};
use super::truncate::condense;

/// Switches that control which threads and fields survive compaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactOptions {
    /// Keep resolved threads.
    pub include_resolved: bool,
    /// Restrict the inbox to one priority.
    pub priority: PriorityFilter,
    /// Attach the diff context to each item.
    pub include_diff: bool,
    /// Attach root and latest timestamps, and keep comment timestamps.
    pub include_times: bool,
    /// Attach every comment of the thread.
    pub all_comments: bool,
    /// Maximum number of items to keep; zero keeps everything.
    pub budget: usize,
}

/// Turns threads into inbox items.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compactor {
    options: CompactOptions,
}

impl Compactor {
    /// Creates a compactor with the given options.
    #[must_use]
    pub const fn new(options: CompactOptions) -> Self {
        Self { options }
    }

    /// Filters, classifies, sorts, and budgets the given threads.
    ///
    /// Resolved threads are dropped unless requested and threads without
    /// comments are always dropped. Items are ordered by priority, then file
    /// path, then line, then thread id; the sort is stable. The budget is
    /// applied after sorting so the most urgent items survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use pr_inbox::inbox::{Comment, CompactOptions, Compactor, Priority, Thread};
    ///
    /// let thread = Thread {
    ///     id: "t1".to_owned(),
    ///     file_path: "src/lib.rs".to_owned(),
    ///     line: 3,
    ///     comments: vec![Comment {
    ///         body: "this must be fixed".to_owned(),
    ///         author: "alice".to_owned(),
    ///         ..Comment::default()
    ///     }],
    ///     ..Thread::default()
    /// };
    ///
    /// let items = Compactor::new(CompactOptions::default()).compact(&[thread]);
    /// assert_eq!(items.len(), 1);
    /// assert_eq!(items[0].priority, Priority::P0);
    /// ```
    #[must_use]
    pub fn compact(&self, threads: &[Thread]) -> Vec<InboxItem> {
        let mut items: Vec<InboxItem> = threads
            .iter()
            .filter(|thread| self.options.include_resolved || !thread.resolved)
            .filter_map(|thread| self.item_for(thread))
            .filter(|item| self.options.priority.admits(item.priority))
            .collect();

        items.sort_by(|left, right| {
            left.priority
                .cmp(&right.priority)
                .then_with(|| left.file_path.cmp(&right.file_path))
                .then_with(|| left.line_number.cmp(&right.line_number))
                .then_with(|| left.thread_id.cmp(&right.thread_id))
        });

        if self.options.budget > 0 {
            items.truncate(self.options.budget);
        }
        tracing::debug!(
            "compacted {} threads into {} inbox items",
            threads.len(),
            items.len()
        );
        items
    }

    fn item_for(&self, thread: &Thread) -> Option<InboxItem> {
        let root = thread.root()?;
        let latest = thread.latest()?;
        let priority = classify_thread(thread)?;
        let options = &self.options;

        Some(InboxItem {
            thread_id: thread.id.clone(),
            priority,
            file_path: thread.file_path.clone(),
            line_number: thread.line,
            author: root.author.clone(),
            summary: condense(&root.body),
            latest: condense(&latest.body),
            url: choose_url(thread, latest),
            resolved: thread.resolved,
            diff_hunk: options
                .include_diff
                .then(|| thread.diff_hunk.clone())
                .flatten()
                .filter(|hunk| !hunk.is_empty()),
            root_created_at: options
                .include_times
                .then(|| non_empty(&root.created_at))
                .flatten(),
            latest_created_at: options
                .include_times
                .then(|| non_empty(&latest.created_at))
                .flatten(),
            comments: if options.all_comments {
                copy_comments(&thread.comments, options.include_times)
            } else {
                Vec::new()
            },
        })
    }
}

fn choose_url(thread: &Thread, latest: &Comment) -> String {
    if latest.url.is_empty() {
        thread.url.clone()
    } else {
        latest.url.clone()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn copy_comments(comments: &[Comment], include_times: bool) -> Vec<Comment> {
    comments
        .iter()
        .map(|comment| Comment {
            created_at: if include_times {
                comment.created_at.clone()
            } else {
                String::new()
            },
            ..comment.clone()
        })
        .collect()
}

#[cfg(test)]
#[path = "compact_tests.rs"]
mod tests;

//! Gathers every discussion record of a pull request and builds the inbox.

use super::compact::{CompactOptions, Compactor};
use super::model::{InboxItem, PrMeta, Thread};
use super::normalize::{RawThread, normalize};
use crate::github::error::InboxError;
use crate::github::gateway::ThreadSource;
use crate::github::locator::PullRequestLocator;
use crate::github::models::ApiReviewThread;
use crate::github::pagination::{PageInfo, collect_pages, collect_pages_from};

/// Pulls review threads, and optionally conversation comments, from a
/// [`ThreadSource`] and normalises them.
pub struct ThreadCollector<'a, S: ThreadSource + ?Sized> {
    source: &'a S,
    include_conversation: bool,
}

impl<'a, S: ThreadSource + ?Sized> ThreadCollector<'a, S> {
    /// Creates a collector that only reads review threads.
    #[must_use]
    pub const fn new(source: &'a S) -> Self {
        Self {
            source,
            include_conversation: false,
        }
    }

    /// Also read the pull request conversation comments.
    #[must_use]
    pub const fn with_conversation(mut self, include_conversation: bool) -> Self {
        self.include_conversation = include_conversation;
        self
    }

    /// Collects all threads for the pull request.
    ///
    /// Review threads come first, followed by conversation comments, each in
    /// source order. Page requests are issued one at a time.
    ///
    /// # Errors
    ///
    /// Propagates the first source or pagination error; no partial thread
    /// list is returned.
    pub async fn collect(&self, locator: &PullRequestLocator) -> Result<Vec<Thread>, InboxError> {
        let review_threads = collect_pages("review threads", |cursor| {
            self.source.review_threads_page(locator, cursor)
        })
        .await?;

        let mut raw: Vec<RawThread> = Vec::with_capacity(review_threads.len());
        for mut thread in review_threads {
            self.complete_comments(&mut thread).await?;
            raw.push(RawThread::Review(thread));
        }

        if self.include_conversation {
            let comments = collect_pages("conversation comments", |cursor| {
                self.source.conversation_comments_page(locator, cursor)
            })
            .await?;
            raw.extend(comments.into_iter().map(RawThread::Conversation));
        }

        tracing::debug!("collected {} raw threads", raw.len());
        Ok(normalize(raw))
    }

    /// Fetches the comments that did not fit in a thread's first page.
    async fn complete_comments(&self, thread: &mut ApiReviewThread) -> Result<(), InboxError> {
        let first_page = &thread.comments.page_info;
        if !first_page.has_next_page() {
            return Ok(());
        }
        let Some(start) = first_page
            .end_cursor()
            .filter(|cursor| !cursor.is_empty())
            .map(ToOwned::to_owned)
        else {
            return Err(InboxError::InvalidPagination {
                message: format!(
                    "comments of thread {} have a next page but no end cursor",
                    thread.id
                ),
            });
        };

        let thread_id = thread.id.clone();
        let remaining = collect_pages_from("thread comments", Some(start), |cursor| {
            self.source.thread_comments_page(&thread_id, cursor)
        })
        .await?;
        thread.comments.nodes.extend(remaining);
        thread.comments.page_info = PageInfo::last();
        Ok(())
    }
}

/// Metadata and compacted items for one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbox {
    /// Pull request context.
    pub meta: PrMeta,
    /// Sorted inbox items.
    pub items: Vec<InboxItem>,
}

/// Fetches metadata and threads, then compacts them into an inbox.
///
/// # Errors
///
/// Returns the first error reported by the source.
pub async fn build_inbox<S: ThreadSource + ?Sized>(
    source: &S,
    locator: &PullRequestLocator,
    include_conversation: bool,
    options: CompactOptions,
) -> Result<Inbox, InboxError> {
    let meta = source.pull_request_meta(locator).await?;
    let threads = ThreadCollector::new(source)
        .with_conversation(include_conversation)
        .collect(locator)
        .await?;
    let items = Compactor::new(options).compact(&threads);
    Ok(Inbox { meta, items })
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::github::gateway::MockThreadSource;
    use crate::github::locator::{GITHUB_API_BASE, PullRequestNumber, RepositoryLocator};
    use crate::github::models::{ApiConversationComment, ApiReviewThread, ApiThreadComment};
    use crate::github::pagination::{Page, PageInfo};
    use crate::inbox::model::Priority;

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    #[fixture]
    fn locator() -> PullRequestLocator {
        let repository =
            RepositoryLocator::from_slug("owner/repo", GITHUB_API_BASE).expect("valid slug");
        PullRequestLocator::new(repository, PullRequestNumber::new(7).expect("valid number"))
    }

    fn review_thread(id: &str, body: &str, resolved: bool) -> ApiReviewThread {
        ApiReviewThread {
            id: id.to_owned(),
            is_resolved: resolved,
            path: "src/lib.rs".to_owned(),
            line: Some(3),
            original_line: None,
            comments: Page::last(vec![ApiThreadComment {
                id: format!("C_{id}"),
                body: body.to_owned(),
                ..ApiThreadComment::default()
            }]),
        }
    }

    fn conversation(id: &str) -> ApiConversationComment {
        ApiConversationComment {
            id: id.to_owned(),
            body: "general remark".to_owned(),
            ..ApiConversationComment::default()
        }
    }

    #[rstest]
    fn collects_review_pages_in_cursor_order(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        let mut sequence = Sequence::new();
        source
            .expect_review_threads_page()
            .withf(|_, cursor| cursor.is_none())
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| {
                Ok(Page::new(
                    vec![review_thread("T1", "first", false)],
                    PageInfo::new(true, Some("CUR1".to_owned())),
                ))
            });
        source
            .expect_review_threads_page()
            .withf(|_, cursor| cursor.as_deref() == Some("CUR1"))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(Page::last(vec![review_thread("T2", "second", true)])));
        source.expect_conversation_comments_page().never();

        let threads = run(ThreadCollector::new(&source).collect(&locator))
            .expect("collection should succeed");

        let ids: Vec<&str> = threads.iter().map(|thread| thread.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);
        assert!(threads.get(1).is_some_and(|thread| thread.resolved));
    }

    #[rstest]
    fn conversation_comments_follow_review_threads(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        source
            .expect_review_threads_page()
            .returning(|_, _| Ok(Page::last(vec![review_thread("T1", "first", false)])));
        source
            .expect_conversation_comments_page()
            .times(1)
            .returning(|_, _| Ok(Page::last(vec![conversation("IC_1")])));

        let threads = run(ThreadCollector::new(&source)
            .with_conversation(true)
            .collect(&locator))
        .expect("collection should succeed");

        let ids: Vec<&str> = threads.iter().map(|thread| thread.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "conversation:IC_1"]);
    }

    fn thread_comment(id: &str, body: &str) -> ApiThreadComment {
        ApiThreadComment {
            id: id.to_owned(),
            body: body.to_owned(),
            url: format!("https://github.com/owner/repo/pull/7#{id}"),
            ..ApiThreadComment::default()
        }
    }

    #[rstest]
    fn overflowing_thread_comments_are_fetched_to_the_end(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        source.expect_review_threads_page().returning(|_, _| {
            let mut thread = review_thread("T1", "nit: rename", false);
            thread.comments.page_info = PageInfo::new(true, Some("C_CUR1".to_owned()));
            Ok(Page::last(vec![thread]))
        });
        let mut sequence = Sequence::new();
        source
            .expect_thread_comments_page()
            .withf(|thread_id, cursor| thread_id == "T1" && cursor.as_deref() == Some("C_CUR1"))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| {
                Ok(Page::new(
                    vec![thread_comment("C2", "second")],
                    PageInfo::new(true, Some("C_CUR2".to_owned())),
                ))
            });
        source
            .expect_thread_comments_page()
            .withf(|_, cursor| cursor.as_deref() == Some("C_CUR2"))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(Page::last(vec![thread_comment("C3", "this must be fixed")])));

        let threads = run(ThreadCollector::new(&source).collect(&locator))
            .expect("collection should succeed");

        let thread = threads.first().expect("thread should be collected");
        let bodies: Vec<&str> = thread
            .comments
            .iter()
            .map(|comment| comment.body.as_str())
            .collect();
        assert_eq!(bodies, vec!["nit: rename", "second", "this must be fixed"]);
        assert_eq!(
            thread.latest().map(|comment| comment.body.as_str()),
            Some("this must be fixed")
        );
    }

    #[rstest]
    fn complete_thread_needs_no_follow_up(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        source
            .expect_review_threads_page()
            .returning(|_, _| Ok(Page::last(vec![review_thread("T1", "first", false)])));
        source.expect_thread_comments_page().never();

        let threads = run(ThreadCollector::new(&source).collect(&locator))
            .expect("collection should succeed");

        assert_eq!(threads.len(), 1);
    }

    #[rstest]
    fn overflowing_thread_without_cursor_is_rejected(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        source.expect_review_threads_page().returning(|_, _| {
            let mut thread = review_thread("T1", "first", false);
            thread.comments.page_info = PageInfo::new(true, None);
            Ok(Page::last(vec![thread]))
        });
        source.expect_thread_comments_page().never();

        let result = run(ThreadCollector::new(&source).collect(&locator));

        assert!(
            matches!(result, Err(InboxError::InvalidPagination { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[rstest]
    fn source_error_aborts_collection(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        source.expect_review_threads_page().returning(|_, cursor| {
            if cursor.is_none() {
                Ok(Page::new(
                    vec![review_thread("T1", "first", false)],
                    PageInfo::new(true, Some("CUR1".to_owned())),
                ))
            } else {
                Err(InboxError::Network {
                    message: "timeout".to_owned(),
                })
            }
        });

        let result = run(ThreadCollector::new(&source).collect(&locator));
        assert_eq!(
            result,
            Err(InboxError::Network {
                message: "timeout".to_owned()
            })
        );
    }

    #[rstest]
    fn build_inbox_compacts_collected_threads(locator: PullRequestLocator) {
        let mut source = MockThreadSource::new();
        source.expect_pull_request_meta().returning(|locator| {
            Ok(PrMeta {
                number: locator.number().get(),
                title: "Inbox".to_owned(),
                repo: locator.repository().slug(),
                ..PrMeta::default()
            })
        });
        source.expect_review_threads_page().returning(|_, _| {
            Ok(Page::last(vec![
                review_thread("T1", "nit: spacing", false),
                review_thread("T2", "must handle errors", false),
                review_thread("T3", "must also fix", true),
            ]))
        });

        let inbox = run(build_inbox(
            &source,
            &locator,
            false,
            CompactOptions::default(),
        ))
        .expect("inbox should build");

        assert_eq!(inbox.meta.number, 7);
        assert_eq!(inbox.meta.repo, "owner/repo");
        let summary: Vec<(&str, Priority)> = inbox
            .items
            .iter()
            .map(|item| (item.thread_id.as_str(), item.priority))
            .collect();
        assert_eq!(summary, vec![("T2", Priority::P0), ("T1", Priority::P2)]);
    }
}

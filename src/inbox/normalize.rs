//! Conversion of raw GitHub records into the uniform thread model.

use super::model::{
    CONVERSATION_FILE_PATH, CONVERSATION_ID_PREFIX, Comment, GHOST_AUTHOR, Thread,
};
use crate::github::models::{ApiActor, ApiConversationComment, ApiReviewThread, ApiThreadComment};

/// A raw discussion record from either of the two GitHub sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawThread {
    /// A line-anchored review thread.
    Review(ApiReviewThread),
    /// A general pull request conversation comment.
    Conversation(ApiConversationComment),
}

/// Normalises raw records, preserving their order.
#[must_use]
pub fn normalize(raw: Vec<RawThread>) -> Vec<Thread> {
    raw.into_iter().map(Thread::from).collect()
}

impl From<RawThread> for Thread {
    fn from(raw: RawThread) -> Self {
        match raw {
            RawThread::Review(thread) => thread.into(),
            RawThread::Conversation(comment) => comment.into(),
        }
    }
}

impl From<ApiReviewThread> for Thread {
    fn from(thread: ApiReviewThread) -> Self {
        let line = [thread.line, thread.original_line]
            .into_iter()
            .flatten()
            .find(|line| *line != 0)
            .unwrap_or(0);

        let first = thread.comments.nodes.first();
        let url = first.map(|comment| comment.url.clone()).unwrap_or_default();
        let diff_hunk = first
            .and_then(|comment| comment.diff_hunk.clone())
            .filter(|hunk| !hunk.is_empty());

        Self {
            id: thread.id,
            file_path: thread.path,
            line,
            resolved: thread.is_resolved,
            comments: thread
                .comments
                .nodes
                .into_iter()
                .map(Comment::from)
                .collect(),
            diff_hunk,
            url,
        }
    }
}

impl From<ApiConversationComment> for Thread {
    fn from(comment: ApiConversationComment) -> Self {
        let id = format!("{CONVERSATION_ID_PREFIX}{}", comment.id);
        let url = comment.url.clone();
        Self {
            id,
            file_path: CONVERSATION_FILE_PATH.to_owned(),
            line: 0,
            resolved: false,
            comments: vec![comment.into()],
            diff_hunk: None,
            url,
        }
    }
}

impl From<ApiThreadComment> for Comment {
    fn from(comment: ApiThreadComment) -> Self {
        Self {
            id: comment_id(comment.database_id, comment.id),
            body: comment.body,
            author: author_login(comment.author),
            created_at: comment.created_at.unwrap_or_default(),
            url: comment.url,
        }
    }
}

impl From<ApiConversationComment> for Comment {
    fn from(comment: ApiConversationComment) -> Self {
        Self {
            id: comment_id(comment.database_id, comment.id),
            body: comment.body,
            author: author_login(comment.author),
            created_at: comment.created_at.unwrap_or_default(),
            url: comment.url,
        }
    }
}

fn comment_id(database_id: Option<u64>, node_id: String) -> String {
    database_id.map_or(node_id, |id| id.to_string())
}

fn author_login(author: Option<ApiActor>) -> String {
    author
        .map(|actor| actor.login)
        .filter(|login| !login.is_empty())
        .unwrap_or_else(|| GHOST_AUTHOR.to_owned())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::github::pagination::Page;

    fn api_comment(id: &str, database_id: Option<u64>, login: Option<&str>) -> ApiThreadComment {
        ApiThreadComment {
            id: id.to_owned(),
            database_id,
            body: format!("body of {id}"),
            author: login.map(|value| ApiActor {
                login: value.to_owned(),
            }),
            created_at: Some("2025-02-01T10:00:00Z".to_owned()),
            url: format!("https://github.com/o/r/pull/3#{id}"),
            diff_hunk: Some(format!("@@ hunk {id} @@")),
        }
    }

    #[fixture]
    fn review_thread() -> ApiReviewThread {
        ApiReviewThread {
            id: "PRRT_1".to_owned(),
            is_resolved: true,
            path: "src/main.rs".to_owned(),
            line: Some(12),
            original_line: Some(10),
            comments: Page::last(vec![
                api_comment("PRRC_1", Some(101), Some("alice")),
                api_comment("PRRC_2", None, None),
            ]),
        }
    }

    #[rstest]
    fn review_thread_maps_location_and_state(review_thread: ApiReviewThread) {
        let thread = Thread::from(review_thread);

        assert_eq!(thread.id, "PRRT_1");
        assert_eq!(thread.file_path, "src/main.rs");
        assert_eq!(thread.line, 12);
        assert!(thread.resolved);
        assert_eq!(thread.url, "https://github.com/o/r/pull/3#PRRC_1");
        assert_eq!(thread.diff_hunk.as_deref(), Some("@@ hunk PRRC_1 @@"));
    }

    #[rstest]
    fn review_comments_keep_order_and_fall_back_for_ids_and_authors(
        review_thread: ApiReviewThread,
    ) {
        let thread = Thread::from(review_thread);
        let ids: Vec<&str> = thread.comments.iter().map(|c| c.id.as_str()).collect();
        let authors: Vec<&str> = thread.comments.iter().map(|c| c.author.as_str()).collect();

        assert_eq!(ids, vec!["101", "PRRC_2"]);
        assert_eq!(authors, vec!["alice", "ghost"]);
    }

    #[rstest]
    #[case::current_line(Some(12), Some(10), 12)]
    #[case::outdated_thread(None, Some(10), 10)]
    #[case::zero_line(Some(0), Some(7), 7)]
    #[case::no_line(None, None, 0)]
    fn line_prefers_current_then_original(
        mut review_thread: ApiReviewThread,
        #[case] line: Option<u32>,
        #[case] original_line: Option<u32>,
        #[case] expected: u32,
    ) {
        review_thread.line = line;
        review_thread.original_line = original_line;
        assert_eq!(Thread::from(review_thread).line, expected);
    }

    #[rstest]
    fn conversation_comment_becomes_singleton_thread() {
        let comment = ApiConversationComment {
            id: "IC_9".to_owned(),
            database_id: Some(900),
            body: "Overall looks good".to_owned(),
            author: Some(ApiActor {
                login: "carol".to_owned(),
            }),
            created_at: None,
            url: "https://github.com/o/r/pull/3#issuecomment-900".to_owned(),
        };

        let thread = Thread::from(comment);

        assert_eq!(thread.id, "conversation:IC_9");
        assert_eq!(thread.file_path, CONVERSATION_FILE_PATH);
        assert_eq!(thread.line, 0);
        assert!(!thread.resolved);
        assert!(thread.diff_hunk.is_none());
        assert_eq!(thread.url, "https://github.com/o/r/pull/3#issuecomment-900");
        assert_eq!(thread.comments.len(), 1);
        let only = thread.comments.first().expect("one comment");
        assert_eq!(only.id, "900");
        assert_eq!(only.author, "carol");
        assert!(only.created_at.is_empty());
    }

    #[rstest]
    fn normalize_preserves_source_order(review_thread: ApiReviewThread) {
        let raw = vec![
            RawThread::Review(review_thread),
            RawThread::Conversation(ApiConversationComment {
                id: "IC_1".to_owned(),
                ..ApiConversationComment::default()
            }),
        ];

        let threads = normalize(raw);
        let ids: Vec<&str> = threads.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["PRRT_1", "conversation:IC_1"]);
    }

    #[rstest]
    fn review_thread_without_comments_normalises_to_empty_thread() {
        let thread = Thread::from(ApiReviewThread {
            id: "PRRT_2".to_owned(),
            comments: Page::last(Vec::new()),
            ..ApiReviewThread::default()
        });
        assert!(thread.comments.is_empty());
        assert!(thread.url.is_empty());
        assert!(thread.diff_hunk.is_none());
    }
}

//! Shared test utilities for CLI tests.

use std::sync::Mutex;

use async_trait::async_trait;
use camino::Utf8PathBuf;
use git2::{Repository, Signature};
use pr_inbox::github::{
    ApiConversationComment, ApiReviewThread, ApiThreadComment, InboxError, Page,
    PullRequestLocator, RepositoryLocator, ThreadSource,
};
use pr_inbox::inbox::PrMeta;
use pr_inbox::local::{LocalRepository, discover_repository};
use tempfile::TempDir;

/// Runs a future to completion on a fresh current-thread runtime.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime should build")
        .block_on(future)
}

/// A thread source that answers branch lookups and records them.
///
/// Every other call returns an empty result.
pub struct StubSource {
    branch_pull_request: Option<u64>,
    lookups: Mutex<Vec<String>>,
}

impl StubSource {
    pub const fn with_branch_pull_request(number: Option<u64>) -> Self {
        Self {
            branch_pull_request: number,
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Branches passed to `pull_request_for_branch`, in call order.
    pub fn branch_lookups(&self) -> Vec<String> {
        self.lookups
            .lock()
            .expect("lookups mutex should be available")
            .clone()
    }
}

#[async_trait]
impl ThreadSource for StubSource {
    async fn pull_request_meta(&self, _locator: &PullRequestLocator) -> Result<PrMeta, InboxError> {
        Ok(PrMeta::default())
    }

    async fn review_threads_page(
        &self,
        _locator: &PullRequestLocator,
        _cursor: Option<String>,
    ) -> Result<Page<ApiReviewThread>, InboxError> {
        Ok(Page::default())
    }

    async fn thread_comments_page(
        &self,
        _thread_id: &str,
        _cursor: Option<String>,
    ) -> Result<Page<ApiThreadComment>, InboxError> {
        Ok(Page::default())
    }

    async fn conversation_comments_page(
        &self,
        _locator: &PullRequestLocator,
        _cursor: Option<String>,
    ) -> Result<Page<ApiConversationComment>, InboxError> {
        Ok(Page::default())
    }

    async fn pull_request_for_branch(
        &self,
        _repository: &RepositoryLocator,
        branch: &str,
    ) -> Result<Option<u64>, InboxError> {
        self.lookups
            .lock()
            .expect("lookups mutex should be available")
            .push(branch.to_owned());
        Ok(self.branch_pull_request)
    }
}

/// A temporary Git checkout kept alive for the duration of a test.
pub struct LocalCheckout {
    _dir: TempDir,
    repository: LocalRepository,
}

impl LocalCheckout {
    pub const fn repository(&self) -> &LocalRepository {
        &self.repository
    }
}

/// Creates a checkout with an `origin` remote, optionally committing on
/// `branch` so HEAD names it.
pub fn local_checkout(origin_url: &str, branch: Option<&str>) -> LocalCheckout {
    let dir = TempDir::new().expect("should create temp directory");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .expect("temp directory should be UTF-8");
    let repo = Repository::init(&path).expect("should init repository");
    repo.remote("origin", origin_url)
        .expect("should add origin remote");

    if let Some(name) = branch {
        let signature = Signature::now("Test", "test@example.com").expect("signature");
        let tree_id = repo
            .index()
            .expect("index")
            .write_tree()
            .expect("write tree");
        let tree = repo.find_tree(tree_id).expect("tree");
        let reference = format!("refs/heads/{name}");
        repo.commit(Some(&reference), &signature, &signature, "initial", &tree, &[])
            .expect("commit");
        repo.set_head(&reference).expect("set head");
    }

    let repository = discover_repository(&path).expect("should discover repository");
    LocalCheckout {
        _dir: dir,
        repository,
    }
}

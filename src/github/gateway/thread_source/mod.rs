//! GraphQL thread source backed by Octocrab.

mod queries;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::github::error::InboxError;
use crate::github::locator::{PersonalAccessToken, PullRequestLocator, RepositoryLocator};
use crate::github::models::{
    ApiConversationComment, ApiPullRequest, ApiPullRequestRef, ApiReviewThread, ApiThreadComment,
};
use crate::github::pagination::Page;
use crate::inbox::PrMeta;
use crate::inbox::truncate::{GOAL_LIMIT, take_chars};

use super::ThreadSource;
use super::client::build_octocrab_client;
use super::error_mapping::{GraphQlError, map_graphql_errors, map_octocrab_error};

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct RepositoryData<T> {
    repository: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestData<T> {
    pull_request: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewThreadsData {
    review_threads: Page<ApiReviewThread>,
}

#[derive(Debug, Deserialize)]
struct NodeData<T> {
    node: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ThreadCommentsData {
    comments: Page<ApiThreadComment>,
}

#[derive(Debug, Deserialize)]
struct ConversationData {
    comments: Page<ApiConversationComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsData {
    pull_requests: Page<ApiPullRequestRef>,
}

/// Loads pull request discussions through the GitHub GraphQL API.
pub struct OctocrabThreadSource {
    client: Octocrab,
}

impl OctocrabThreadSource {
    /// Creates a source from an existing Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an authenticated source for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the Octocrab client cannot be built.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, InboxError> {
        Ok(Self::new(build_octocrab_client(token, api_base)?))
    }

    /// Borrow the underlying client, e.g. to share it with the update check.
    #[must_use]
    pub const fn client(&self) -> &Octocrab {
        &self.client
    }

    async fn query<T>(&self, operation: &str, query: &str, variables: Value) -> Result<T, InboxError>
    where
        T: DeserializeOwned + Send,
    {
        let payload = json!({ "query": query, "variables": variables });
        let response: GraphQlResponse<T> = self
            .client
            .graphql(&payload)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        if !response.errors.is_empty() {
            return Err(map_graphql_errors(operation, &response.errors));
        }
        response.data.ok_or_else(|| InboxError::Api {
            message: format!("{operation} failed: response carried no data"),
        })
    }

    async fn pull_request_query<T>(
        &self,
        operation: &str,
        query: &str,
        locator: &PullRequestLocator,
        cursor: Option<String>,
    ) -> Result<T, InboxError>
    where
        T: DeserializeOwned + Send,
    {
        let repository = locator.repository();
        let variables = json!({
            "owner": repository.owner().as_str(),
            "name": repository.repository().as_str(),
            "number": locator.number().get(),
            "after": cursor,
        });

        let data: RepositoryData<PullRequestData<T>> =
            self.query(operation, query, variables).await?;
        data.repository
            .and_then(|repo| repo.pull_request)
            .ok_or_else(|| InboxError::Api {
                message: format!(
                    "{operation} failed: pull request {}#{} not found",
                    repository.slug(),
                    locator.number()
                ),
            })
    }
}

#[async_trait]
impl ThreadSource for OctocrabThreadSource {
    async fn pull_request_meta(
        &self,
        locator: &PullRequestLocator,
    ) -> Result<PrMeta, InboxError> {
        let pull_request: ApiPullRequest = self
            .pull_request_query(
                "pull request",
                queries::PULL_REQUEST_META,
                locator,
                None,
            )
            .await?;

        Ok(PrMeta {
            number: pull_request.number,
            title: pull_request.title,
            url: pull_request.url,
            goal: take_chars(&pull_request.body_text, GOAL_LIMIT),
            repo: locator.repository().slug(),
        })
    }

    async fn review_threads_page(
        &self,
        locator: &PullRequestLocator,
        cursor: Option<String>,
    ) -> Result<Page<ApiReviewThread>, InboxError> {
        let data: ReviewThreadsData = self
            .pull_request_query("review threads", queries::REVIEW_THREADS, locator, cursor)
            .await?;
        Ok(data.review_threads)
    }

    async fn thread_comments_page(
        &self,
        thread_id: &str,
        cursor: Option<String>,
    ) -> Result<Page<ApiThreadComment>, InboxError> {
        let variables = json!({ "id": thread_id, "after": cursor });
        let data: NodeData<ThreadCommentsData> = self
            .query("thread comments", queries::THREAD_COMMENTS, variables)
            .await?;
        data.node
            .map(|thread| thread.comments)
            .ok_or_else(|| InboxError::Api {
                message: format!("thread comments failed: review thread {thread_id} not found"),
            })
    }

    async fn conversation_comments_page(
        &self,
        locator: &PullRequestLocator,
        cursor: Option<String>,
    ) -> Result<Page<ApiConversationComment>, InboxError> {
        let data: ConversationData = self
            .pull_request_query(
                "conversation comments",
                queries::CONVERSATION_COMMENTS,
                locator,
                cursor,
            )
            .await?;
        Ok(data.comments)
    }

    async fn pull_request_for_branch(
        &self,
        repository: &RepositoryLocator,
        branch: &str,
    ) -> Result<Option<u64>, InboxError> {
        let variables = json!({
            "owner": repository.owner().as_str(),
            "name": repository.repository().as_str(),
            "branch": branch,
        });
        let data: RepositoryData<PullRequestsData> = self
            .query("pull request lookup", queries::PULL_REQUEST_FOR_BRANCH, variables)
            .await?;

        Ok(data
            .repository
            .and_then(|repo| repo.pull_requests.nodes.into_iter().next())
            .map(|pull_request| pull_request.number))
    }
}

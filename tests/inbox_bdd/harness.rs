//! GraphQL fixtures for the inbox BDD tests.

use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::runtime::SharedRuntime;

/// Builds a review thread node with a single comment.
pub(crate) fn review_thread_node(
    id: &str,
    file_path: &str,
    line: u32,
    body: &str,
    resolved: bool,
) -> Value {
    json!({
        "id": id,
        "isResolved": resolved,
        "path": file_path,
        "line": line,
        "originalLine": line,
        "comments": { "nodes": [{
            "id": format!("C_{id}"),
            "databaseId": null,
            "body": body,
            "author": { "login": "reviewer" },
            "createdAt": "2025-01-01T00:00:00Z",
            "url": format!("https://github.com/octo/widgets/pull/42#discussion_{id}"),
            "diffHunk": "@@ -1 +1 @@\n-old\n+new"
        }]}
    })
}

/// Builds a conversation comment node.
pub(crate) fn conversation_node(id: &str, body: &str) -> Value {
    json!({
        "id": id,
        "databaseId": null,
        "body": body,
        "author": { "login": "maintainer" },
        "createdAt": "2025-01-02T00:00:00Z",
        "url": format!("https://github.com/octo/widgets/pull/42#{id}")
    })
}

fn single_page(field: &str, nodes: &[Value]) -> Value {
    json!({
        "data": { "repository": { "pullRequest": { field: {
            "nodes": nodes,
            "pageInfo": { "hasNextPage": false, "endCursor": null }
        }}}}
    })
}

fn graphql_operation(operation: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path_regex(r"/graphql$"))
        .and(body_string_contains(format!("query {operation}(")))
}

/// Mounts metadata, review thread, and conversation responses.
pub(crate) fn mount_pull_request(
    runtime: &SharedRuntime,
    server: &MockServer,
    number: u64,
    review_threads: &[Value],
    conversation: &[Value],
) {
    let meta = json!({
        "data": { "repository": { "pullRequest": {
            "number": number,
            "title": "Add widget cache",
            "url": format!("https://github.com/octo/widgets/pull/{number}"),
            "bodyText": "Speed up widget lookups."
        }}}
    });

    let mocks = [
        graphql_operation("PullRequestMeta")
            .respond_with(ResponseTemplate::new(200).set_body_json(meta)),
        graphql_operation("ReviewThreads").respond_with(
            ResponseTemplate::new(200).set_body_json(single_page("reviewThreads", review_threads)),
        ),
        graphql_operation("ConversationComments").respond_with(
            ResponseTemplate::new(200).set_body_json(single_page("comments", conversation)),
        ),
    ];

    for mock in mocks {
        runtime.block_on(mock.mount(server));
    }
}

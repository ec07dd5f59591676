//! GraphQL documents sent by the thread source.

pub(super) const PULL_REQUEST_META: &str = r"
query PullRequestMeta($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      number
      title
      url
      bodyText
    }
  }
}
";

pub(super) const REVIEW_THREADS: &str = r"
query ReviewThreads($owner: String!, $name: String!, $number: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviewThreads(first: 100, after: $after) {
        nodes {
          id
          isResolved
          path
          line
          originalLine
          comments(first: 100) {
            nodes {
              id
              databaseId
              body
              author { login }
              createdAt
              url
              diffHunk
            }
            pageInfo { hasNextPage endCursor }
          }
        }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
";

pub(super) const THREAD_COMMENTS: &str = r"
query ThreadComments($id: ID!, $after: String) {
  node(id: $id) {
    ... on PullRequestReviewThread {
      comments(first: 100, after: $after) {
        nodes {
          id
          databaseId
          body
          author { login }
          createdAt
          url
          diffHunk
        }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
";

pub(super) const CONVERSATION_COMMENTS: &str = r"
query ConversationComments($owner: String!, $name: String!, $number: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      comments(first: 100, after: $after) {
        nodes {
          id
          databaseId
          body
          author { login }
          createdAt
          url
        }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}
";

pub(super) const PULL_REQUEST_FOR_BRANCH: &str = r"
query PullRequestForBranch($owner: String!, $name: String!, $branch: String!) {
  repository(owner: $owner, name: $name) {
    pullRequests(headRefName: $branch, states: OPEN, first: 1) {
      nodes { number }
    }
  }
}
";

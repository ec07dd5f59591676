//! Error mapping helpers for the Octocrab gateway.

use http::StatusCode;
use serde::Deserialize;

use crate::github::error::InboxError;

/// GraphQL error type GitHub reports when the point budget is spent.
const GRAPHQL_RATE_LIMITED: &str = "RATE_LIMITED";

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GraphQlError {
    pub(super) message: String,
    #[serde(rename = "type", default)]
    pub(super) kind: Option<String>,
}

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(crate) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> InboxError {
    if let octocrab::Error::GitHub { source, .. } = error {
        if is_rate_limit_error(source) {
            return InboxError::RateLimitExceeded {
                message: format!("{operation} failed: {message}", message = source.message),
            };
        }
        return if is_auth_failure(source.status_code) {
            InboxError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            InboxError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return InboxError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    InboxError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-empty GraphQL `errors` array to a single error.
///
/// Messages are joined; a rate-limit entry anywhere wins.
pub(super) fn map_graphql_errors(operation: &str, errors: &[GraphQlError]) -> InboxError {
    let message = format!(
        "{operation} failed: {}",
        errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    );

    let rate_limited = errors
        .iter()
        .any(|error| error.kind.as_deref() == Some(GRAPHQL_RATE_LIMITED));
    if rate_limited {
        InboxError::RateLimitExceeded { message }
    } else {
        InboxError::Api { message }
    }
}

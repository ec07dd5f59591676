//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::InboxError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an authenticated Octocrab client for the given API base URL.
///
/// Must be called inside a Tokio runtime; Octocrab spawns its HTTP service
/// on construction.
///
/// # Errors
///
/// Returns [`InboxError::InvalidUrl`] when the base URI cannot be parsed or
/// [`InboxError::Api`] when Octocrab fails to construct a client.
pub fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, InboxError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| InboxError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base_uri)
        .map_err(|error| InboxError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

//! Cursor pagination for GitHub GraphQL connections.
//!
//! GraphQL connections expose a `pageInfo { hasNextPage endCursor }` block
//! alongside each page of nodes. [`collect_pages`] drives any paged fetch
//! from the first page to the last, handing each request the previous
//! page's end cursor, and only returns once every node has been gathered.

use std::future::Future;

use serde::Deserialize;

use super::error::InboxError;

/// Continuation state reported with a page of results.
///
/// # Example
///
/// ```
/// use pr_inbox::github::PageInfo;
///
/// let info = PageInfo::new(true, Some("CURSOR".to_owned()));
/// assert!(info.has_next_page());
/// assert_eq!(info.end_cursor(), Some("CURSOR"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

impl PageInfo {
    /// Creates page info from its two fields.
    #[must_use]
    pub const fn new(has_next_page: bool, end_cursor: Option<String>) -> Self {
        Self {
            has_next_page,
            end_cursor,
        }
    }

    /// Page info for the final page of a connection.
    #[must_use]
    pub const fn last() -> Self {
        Self::new(false, None)
    }

    /// Returns true if more pages follow this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Returns the opaque cursor for the next request, if any.
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }
}

/// One page of nodes from a GraphQL connection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Nodes on this page, in server order.
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
    /// Continuation state.
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page from its nodes and continuation state.
    #[must_use]
    pub const fn new(nodes: Vec<T>, page_info: PageInfo) -> Self {
        Self { nodes, page_info }
    }

    /// Creates the final page of a connection.
    #[must_use]
    pub const fn last(nodes: Vec<T>) -> Self {
        Self::new(nodes, PageInfo::last())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

/// Fetches every page of a connection and returns all nodes in order.
///
/// `fetch_page` is first called with `None`, then with the end cursor of
/// each previous page until a page reports no successor. Requests are
/// strictly sequential.
///
/// # Errors
///
/// Propagates the first error returned by `fetch_page`; nothing collected
/// so far is returned. Returns [`InboxError::InvalidPagination`] when a page
/// claims a successor but carries no end cursor.
pub async fn collect_pages<T, F, Fut>(label: &str, fetch_page: F) -> Result<Vec<T>, InboxError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, InboxError>>,
{
    collect_pages_from(label, None, fetch_page).await
}

/// Like [`collect_pages`], but the first request is made with `start`.
///
/// Used to finish a connection whose first page arrived nested inside
/// another response.
///
/// # Errors
///
/// As for [`collect_pages`].
pub async fn collect_pages_from<T, F, Fut>(
    label: &str,
    start: Option<String>,
    mut fetch_page: F,
) -> Result<Vec<T>, InboxError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, InboxError>>,
{
    let mut collected = Vec::new();
    let mut cursor = start;
    let mut page_count: usize = 0;

    loop {
        let page = fetch_page(cursor.take()).await?;
        page_count += 1;
        tracing::debug!(
            "fetched {label} page {page_count} with {} nodes",
            page.nodes.len()
        );

        let Page { nodes, page_info } = page;
        collected.extend(nodes);

        if !page_info.has_next_page {
            return Ok(collected);
        }

        let Some(next) = page_info.end_cursor.filter(|value| !value.is_empty()) else {
            return Err(InboxError::InvalidPagination {
                message: format!("{label} page {page_count} has a next page but no end cursor"),
            });
        };
        cursor = Some(next);
    }
}

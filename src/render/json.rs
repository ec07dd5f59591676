//! JSON projection of an inbox.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::github::error::InboxError;
use crate::inbox::{InboxItem, PrMeta};

use super::io_error;

/// Pull request metadata and items as emitted by `--format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxDocument {
    /// `OWNER/REPO` slug.
    pub repo: String,
    /// Pull request number.
    pub number: u64,
    /// Pull request title.
    pub title: String,
    /// Pull request URL.
    pub url: String,
    /// Leading portion of the description.
    pub goal: String,
    /// Sorted inbox items.
    pub items: Vec<InboxItem>,
}

impl InboxDocument {
    /// Assembles a document from metadata and items.
    #[must_use]
    pub fn new(meta: &PrMeta, items: &[InboxItem]) -> Self {
        Self {
            repo: meta.repo.clone(),
            number: meta.number,
            title: meta.title.clone(),
            url: meta.url.clone(),
            goal: meta.goal.clone(),
            items: items.to_vec(),
        }
    }
}

/// Writes the inbox as a pretty-printed JSON document followed by a newline.
///
/// # Errors
///
/// Returns [`InboxError::Io`] if serialisation or writing fails.
pub fn write_json<W: Write>(
    writer: &mut W,
    meta: &PrMeta,
    items: &[InboxItem],
) -> Result<(), InboxError> {
    let document = InboxDocument::new(meta, items);
    serde_json::to_writer_pretty(&mut *writer, &document).map_err(|e| InboxError::Io {
        message: format!("JSON serialization failed: {e}"),
    })?;
    writeln!(writer).map_err(|e| io_error(&e))?;
    Ok(())
}

/// Serialises items as compact single-line JSON.
///
/// # Errors
///
/// Returns [`InboxError::Io`] if serialisation fails.
pub fn items_to_json(items: &[InboxItem]) -> Result<String, InboxError> {
    serde_json::to_string(items).map_err(|e| InboxError::Io {
        message: format!("JSON serialization failed: {e}"),
    })
}

//! Prompt variables and template selection.

use std::collections::BTreeMap;

use crate::github::error::InboxError;
use crate::inbox::{InboxItem, PrMeta};

use super::json::items_to_json;
use super::report::render_report;
use super::template::apply;

/// Values available to prompt templates.
///
/// Each field is exposed as an upper-case placeholder, e.g. `{{PR_TITLE}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariables {
    /// `{{REPO}}`
    pub repo: String,
    /// `{{PR_NUMBER}}`
    pub pr_number: u64,
    /// `{{PR_TITLE}}`
    pub pr_title: String,
    /// `{{PR_URL}}`
    pub pr_url: String,
    /// `{{PR_GOAL}}`
    pub pr_goal: String,
    /// `{{THREADS_MD}}`: the Markdown report.
    pub threads_md: String,
    /// `{{THREADS_JSON}}`: the items as compact JSON.
    pub threads_json: String,
}

impl PromptVariables {
    /// Builds the variables for an inbox.
    ///
    /// # Errors
    ///
    /// Returns [`InboxError::Io`] if the report or JSON cannot be produced.
    pub fn new(meta: &PrMeta, items: &[InboxItem]) -> Result<Self, InboxError> {
        Ok(Self {
            repo: meta.repo.clone(),
            pr_number: meta.number,
            pr_title: meta.title.clone(),
            pr_url: meta.url.clone(),
            pr_goal: meta.goal.clone(),
            threads_md: render_report(meta, items)?,
            threads_json: items_to_json(items)?,
        })
    }

    /// Returns the placeholder map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("REPO".to_owned(), self.repo.clone()),
            ("PR_NUMBER".to_owned(), self.pr_number.to_string()),
            ("PR_TITLE".to_owned(), self.pr_title.clone()),
            ("PR_URL".to_owned(), self.pr_url.clone()),
            ("PR_GOAL".to_owned(), self.pr_goal.clone()),
            ("THREADS_MD".to_owned(), self.threads_md.clone()),
            ("THREADS_JSON".to_owned(), self.threads_json.clone()),
        ])
    }

    /// Fills `template` with these variables.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        apply(template, &self.to_map())
    }
}

/// Picks the prompt template to use.
///
/// Inline text wins over the contents of a prompt file, which win over the
/// prompt from configuration. Empty candidates are skipped; `None` means the
/// plain report should be printed.
#[must_use]
pub fn select_prompt_template(
    inline: Option<&str>,
    file_contents: Option<&str>,
    configured: Option<&str>,
) -> Option<String> {
    [inline, file_contents, configured]
        .into_iter()
        .flatten()
        .find(|candidate| !candidate.is_empty())
        .map(ToOwned::to_owned)
}

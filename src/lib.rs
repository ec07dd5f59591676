//! Pull request review inbox.
//!
//! Collects the review threads of a GitHub pull request, ranks each by
//! urgency, and renders a compact inbox as Markdown, JSON, or a filled-in
//! prompt template.
//!
//! - [`github`]: Locators, GraphQL thread source, and API errors
//! - [`inbox`]: Normalisation, prioritisation, and compaction
//! - [`render`]: Markdown report, JSON document, and prompt templates
//! - [`config`]: Layered configuration and command-line arguments
//! - [`local`]: Local Git repository discovery
//! - [`update`]: Background check for newer releases

pub mod config;
pub mod github;
pub mod inbox;
pub mod local;
pub mod render;
pub mod update;

pub use config::{CliArgs, InboxConfig};
pub use github::{
    InboxError, OctocrabThreadSource, PersonalAccessToken, PullRequestLocator, RepositoryLocator,
    ThreadSource,
};
pub use inbox::{Inbox, InboxItem, PrMeta, Priority, build_inbox};

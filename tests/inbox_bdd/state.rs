//! Scenario state for the inbox BDD tests.

use pr_inbox::github::InboxError;
use pr_inbox::inbox::{CompactOptions, Inbox};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use wiremock::MockServer;

use super::runtime::SharedRuntime;

/// Scenario state for inbox tests.
#[derive(ScenarioState, Default)]
pub(crate) struct InboxState {
    /// Shared Tokio runtime for async operations.
    pub(crate) runtime: Slot<SharedRuntime>,
    /// Mock GitHub API server.
    pub(crate) server: Slot<MockServer>,
    /// Repository slug being served.
    pub(crate) repo: Slot<String>,
    /// Pull request number being served.
    pub(crate) number: Slot<u64>,
    /// Review thread nodes returned by the server.
    pub(crate) review_threads: Slot<Vec<Value>>,
    /// Conversation comment nodes returned by the server.
    pub(crate) conversation: Slot<Vec<Value>>,
    /// Compaction options for the run.
    pub(crate) options: Slot<CompactOptions>,
    /// Whether conversation comments are collected.
    pub(crate) include_conversation: Slot<bool>,
    /// Prompt template to fill.
    pub(crate) template: Slot<String>,
    /// The built inbox.
    pub(crate) inbox: Slot<Inbox>,
    /// Rendered output.
    pub(crate) output: Slot<String>,
    /// Error from building the inbox.
    pub(crate) error: Slot<InboxError>,
}

impl InboxState {
    /// Applies `change` to the current compaction options.
    pub(crate) fn update_options(&self, change: impl FnOnce(&mut CompactOptions)) {
        let mut options = self.options.take().unwrap_or_default();
        change(&mut options);
        self.options.set(options);
    }

    /// Appends a node to a list slot.
    pub(crate) fn push_node(slot: &Slot<Vec<Value>>, node: Value) {
        let mut nodes = slot.take().unwrap_or_default();
        nodes.push(node);
        slot.set(nodes);
    }
}

/// Ensures the runtime and server are initialised in `InboxState`.
pub(crate) fn ensure_runtime_and_server(
    state: &InboxState,
) -> Result<SharedRuntime, InboxError> {
    super::runtime::ensure_runtime_and_server(&state.runtime, &state.server).map_err(|error| {
        InboxError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        }
    })
}

//! Support modules for the inbox BDD tests.

pub(crate) mod harness;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use harness::{conversation_node, mount_pull_request, review_thread_node};
pub(crate) use state::{InboxState, ensure_runtime_and_server};

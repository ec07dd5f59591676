//! Thread acquisition and compaction pipeline.
//!
//! Raw GitHub records are normalised into [`Thread`]s, classified by
//! [`classify`], and reduced by the [`Compactor`] into sorted
//! [`InboxItem`]s ready for rendering.

pub mod collect;
pub mod compact;
pub mod model;
pub mod normalize;
pub mod priority;
pub mod truncate;

pub use collect::{Inbox, ThreadCollector, build_inbox};
pub use compact::{CompactOptions, Compactor};
pub use model::{
    CONVERSATION_FILE_PATH, CONVERSATION_ID_PREFIX, Comment, GHOST_AUTHOR, InboxItem, PrMeta,
    Priority, Thread,
};
pub use normalize::{RawThread, normalize};
pub use priority::{PriorityFilter, classify, classify_thread};
pub use truncate::{DISPLAY_LIMIT, GOAL_LIMIT, condense, take_chars, truncate_chars};

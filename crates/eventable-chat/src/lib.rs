//! Event chat for the Eventable client.
//!
//! Merging is a pure function over message lists; the poller wraps it in a
//! visibility-gated interval task. No push transport exists server-side,
//! so polling is the real-time mechanism.

pub mod merge;
pub mod poller;

pub use merge::merge_messages;
pub use poller::{ChatPoller, DEFAULT_POLL_INTERVAL};

//! Chat message record.

use chrono::{DateTime, Utc};

use crate::ids::{EventId, MessageId, UserId};

/// A single chat message, scoped to one event.
///
/// Append-only; never mutated after creation. Retrieval is ordered by
/// `created_at` ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub event_id: EventId,
    pub sender_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

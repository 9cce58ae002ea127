//! Pure message-merge logic.

use std::collections::HashSet;

use eventable_core::Message;

/// Merge a poll result into the already-loaded sequence.
///
/// Duplicates (by message id) are dropped, existing entries winning; the
/// result is sorted ascending by creation time, with the id as a stable
/// tie-break so racing sends and poll results always land in the same
/// order regardless of arrival.
pub fn merge_messages(existing: &[Message], incoming: Vec<Message>) -> Vec<Message> {
    let mut seen: HashSet<_> = existing.iter().map(|m| m.id).collect();
    let mut merged = existing.to_vec();
    for message in incoming {
        if seen.insert(message.id) {
            merged.push(message);
        }
    }
    merged.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.0.cmp(&b.id.0)));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use eventable_core::{EventId, MessageId, UserId};
    use uuid::Uuid;

    fn message(nth: u128, at: i64) -> Message {
        Message {
            id: MessageId(Uuid::from_u128(nth)),
            event_id: EventId(Uuid::from_u128(1)),
            sender_id: UserId(Uuid::from_u128(2)),
            content: format!("message {nth}"),
            created_at: Utc.timestamp_opt(at, 0).unwrap(),
        }
    }

    #[test]
    fn test_merge_dedupes_and_sorts() {
        // loaded: ids 1@10, 3@30; poll returns 2@20 and 3@30 again
        let existing = vec![message(1, 10), message(3, 30)];
        let incoming = vec![message(2, 20), message(3, 30)];

        let merged = merge_messages(&existing, incoming);

        let ids: Vec<u128> = merged.iter().map(|m| m.id.0.as_u128()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_empty_incoming_is_identity() {
        let existing = vec![message(1, 10), message(2, 20)];
        let merged = merge_messages(&existing, Vec::new());
        assert_eq!(merged, existing);
    }

    #[test]
    fn test_merge_sorts_out_of_order_poll() {
        let existing = vec![message(5, 50)];
        let incoming = vec![message(4, 40), message(6, 60)];
        let merged = merge_messages(&existing, incoming);
        let times: Vec<i64> = merged.iter().map(|m| m.created_at.timestamp()).collect();
        assert_eq!(times, vec![40, 50, 60]);
    }

    #[test]
    fn test_merge_equal_timestamps_break_ties_by_id() {
        let existing = vec![message(2, 10)];
        let incoming = vec![message(1, 10)];
        let merged = merge_messages(&existing, incoming);
        let ids: Vec<u128> = merged.iter().map(|m| m.id.0.as_u128()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_merge_existing_wins_on_duplicate_id() {
        let mut altered = message(1, 10);
        altered.content = "edited copy".to_string();
        let existing = vec![message(1, 10)];
        let merged = merge_messages(&existing, vec![altered]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, "message 1");
    }

    #[test]
    fn test_merge_dedupes_within_incoming() {
        let merged = merge_messages(&[], vec![message(1, 10), message(1, 10)]);
        assert_eq!(merged.len(), 1);
    }
}

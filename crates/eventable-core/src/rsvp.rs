//! RSVP status derivation over an event's three lists.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::types::Event;

/// A user's RSVP state with respect to one event.
///
/// `NoResponse` is the default state: the user appears in none of the
/// three lists. Transitions can always move a user out of it, but nothing
/// in the model moves a user back to `NoResponse`: only account or event
/// deletion clears the lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsvpStatus {
    Going,
    Waitlisted,
    NotGoing,
    NoResponse,
}

/// Error type for parsing RsvpStatus from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRsvpStatusError(pub String);

impl std::fmt::Display for ParseRsvpStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid rsvp status: {}", self.0)
    }
}

impl std::error::Error for ParseRsvpStatusError {}

impl FromStr for RsvpStatus {
    type Err = ParseRsvpStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "going" => Ok(RsvpStatus::Going),
            "waitlisted" => Ok(RsvpStatus::Waitlisted),
            "not_going" => Ok(RsvpStatus::NotGoing),
            "no_response" => Ok(RsvpStatus::NoResponse),
            _ => Err(ParseRsvpStatusError(s.to_string())),
        }
    }
}

impl RsvpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Going => "going",
            RsvpStatus::Waitlisted => "waitlisted",
            RsvpStatus::NotGoing => "not_going",
            RsvpStatus::NoResponse => "no_response",
        }
    }
}

impl Event {
    /// Derive a user's RSVP status. Pure over the three lists.
    pub fn status_of(&self, user: UserId) -> RsvpStatus {
        if self.going.contains(&user) {
            RsvpStatus::Going
        } else if self.waitlist.contains(&user) {
            RsvpStatus::Waitlisted
        } else if self.no_go.contains(&user) {
            RsvpStatus::NotGoing
        } else {
            RsvpStatus::NoResponse
        }
    }

    /// Confirmed attendees plus untracked guests.
    pub fn attending_count(&self) -> u32 {
        self.going.len() as u32 + self.guests
    }

    /// Whether the going list has reached capacity.
    pub fn is_full(&self) -> bool {
        match self.max_attendees {
            Some(max) => self.going.len() as u32 >= max,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EventId, GroupId};
    use chrono::{NaiveDate, NaiveTime};

    fn event() -> Event {
        Event::new(
            EventId::new(),
            GroupId::new(),
            "Picnic",
            NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_status_of_defaults_to_no_response() {
        let event = event();
        assert_eq!(event.status_of(UserId::new()), RsvpStatus::NoResponse);
    }

    #[test]
    fn test_status_of_each_list() {
        let mut event = event();
        let (a, b, c) = (UserId::new(), UserId::new(), UserId::new());
        event.going.push(a);
        event.waitlist.push(b);
        event.no_go.push(c);

        assert_eq!(event.status_of(a), RsvpStatus::Going);
        assert_eq!(event.status_of(b), RsvpStatus::Waitlisted);
        assert_eq!(event.status_of(c), RsvpStatus::NotGoing);
    }

    #[test]
    fn test_status_of_is_pure() {
        let mut event = event();
        let user = UserId::new();
        event.waitlist.push(user);
        assert_eq!(event.status_of(user), event.status_of(user));
    }

    #[test]
    fn test_attending_count_includes_guests() {
        let mut event = event();
        event.going.push(UserId::new());
        event.going.push(UserId::new());
        event.guests = 3;
        assert_eq!(event.attending_count(), 5);
    }

    #[test]
    fn test_is_full() {
        let mut event = event();
        assert!(!event.is_full()); // no capacity set

        event.max_attendees = Some(2);
        assert!(!event.is_full());
        event.going.push(UserId::new());
        event.going.push(UserId::new());
        assert!(event.is_full());
    }

    #[test]
    fn test_rsvp_status_roundtrip() {
        for status in [
            RsvpStatus::Going,
            RsvpStatus::Waitlisted,
            RsvpStatus::NotGoing,
            RsvpStatus::NoResponse,
        ] {
            let parsed: RsvpStatus = status.as_str().parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_rsvp_status_parse_invalid() {
        assert!("maybe".parse::<RsvpStatus>().is_err());
    }
}

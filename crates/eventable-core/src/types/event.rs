//! Event record with its three RSVP lists.

use chrono::{NaiveDate, NaiveTime};

use crate::ids::{EventId, GroupId, UserId};

/// Optional event location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub map_url: Option<String>,
}

/// Event record.
///
/// Date and time are stored and transmitted as separate fields; display
/// combines them into one instant in the organization's timezone. The
/// three lists are pairwise disjoint at all times; the transition engine
/// re-establishes that on every mutation. Guests are a bare counter with
/// no per-guest identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    /// Owning group; immutable after creation.
    pub group_id: GroupId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: Option<Location>,
    /// Capacity on the going list; `None` means unlimited.
    pub max_attendees: Option<u32>,
    /// Attendees not tracked individually.
    pub guests: u32,
    pub going: Vec<UserId>,
    pub waitlist: Vec<UserId>,
    pub no_go: Vec<UserId>,
}

impl Event {
    pub fn new(
        id: EventId,
        group_id: GroupId,
        title: impl Into<String>,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Self {
            id,
            group_id,
            title: title.into(),
            description: String::new(),
            date,
            time,
            location: None,
            max_attendees: None,
            guests: 0,
            going: Vec::new(),
            waitlist: Vec::new(),
            no_go: Vec::new(),
        }
    }
}

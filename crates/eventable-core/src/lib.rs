//! Domain model and transition rules for the Eventable client.
//!
//! The authoritative state lives server-side; this crate is the typed,
//! optimistic mirror the client reasons over: membership, RSVP lists,
//! permission checks, and the transitions that keep the mirror's
//! invariants intact while naming the server calls to issue.

pub mod ids;
pub mod membership;
pub mod permission;
pub mod rsvp;
pub mod transition;
pub mod types;

pub use ids::{EventId, GroupId, MessageId, UserId};
pub use membership::MembershipError;
pub use permission::{can, Action, Actor};
pub use rsvp::RsvpStatus;
pub use transition::{Applied, SideEffect, TransitionError};
pub use types::{Event, Group, Location, Message, Role, User};

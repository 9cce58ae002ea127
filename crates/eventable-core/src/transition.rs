//! RSVP transition engine.
//!
//! Each transition validates first and mutates only on success; a failed
//! transition leaves every list untouched. Successful transitions remove
//! the user from whichever list currently holds them before inserting into
//! the target list, so the three lists stay pairwise disjoint by
//! construction. The returned [`SideEffect`] names the request the caller
//! must issue to make the authoritative server agree with the local mirror.

use thiserror::Error;

use crate::ids::{EventId, GroupId, UserId};
use crate::membership::{self, MembershipError};
use crate::rsvp::RsvpStatus;
use crate::types::{Event, Group};

/// Typed failures of RSVP transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("user is not a member of the event's group")]
    NotAGroupMember,
    #[error("user is already on the going list")]
    AlreadyGoing,
    #[error("user is not on the waitlist")]
    NotOnWaitlist,
    #[error("event is full ({max} attendees)")]
    CapacityExceeded { max: u32 },
    #[error("user is neither going nor waitlisted")]
    NoPendingRsvp,
    #[error("user has not declined this event")]
    NotDeclined,
    #[error(transparent)]
    Membership(#[from] MembershipError),
}

/// The server request a successful transition asks the caller to issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    /// `POST /events/:id/join`
    JoinEvent { event: EventId },
    /// `POST /events/:id/approve`
    ApproveAttendee { event: EventId, user: UserId },
    /// `POST /events/:id/nogo`
    DeclineAttendee { event: EventId, user: UserId },
    /// `POST /events/:id/move-to-waitlist`
    MoveToWaitlist { event: EventId, user: UserId },
    /// `POST /groups/:id/leave`
    LeaveGroup { group: GroupId },
}

/// Result of a successful per-event transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub status: RsvpStatus,
    pub effect: SideEffect,
}

/// Remove the user from all three lists.
fn detach(event: &mut Event, user: UserId) {
    event.going.retain(|u| *u != user);
    event.waitlist.retain(|u| *u != user);
    event.no_go.retain(|u| *u != user);
}

/// NoResponse/NotGoing → Waitlisted. Idempotent while already waitlisted.
pub fn join_waitlist(
    group: &Group,
    event: &mut Event,
    user: UserId,
) -> Result<Applied, TransitionError> {
    if !membership::is_member(group, user) {
        return Err(TransitionError::NotAGroupMember);
    }
    match event.status_of(user) {
        RsvpStatus::Going => return Err(TransitionError::AlreadyGoing),
        RsvpStatus::Waitlisted => {}
        RsvpStatus::NotGoing | RsvpStatus::NoResponse => {
            detach(event, user);
            event.waitlist.push(user);
        }
    }
    Ok(Applied {
        status: RsvpStatus::Waitlisted,
        effect: SideEffect::JoinEvent { event: event.id },
    })
}

/// Waitlisted → Going. Blocked at capacity.
pub fn approve(event: &mut Event, user: UserId) -> Result<Applied, TransitionError> {
    if event.status_of(user) != RsvpStatus::Waitlisted {
        return Err(TransitionError::NotOnWaitlist);
    }
    if event.is_full() {
        // max_attendees is present whenever is_full() holds
        let max = event.max_attendees.unwrap_or_default();
        return Err(TransitionError::CapacityExceeded { max });
    }
    detach(event, user);
    event.going.push(user);
    Ok(Applied {
        status: RsvpStatus::Going,
        effect: SideEffect::ApproveAttendee {
            event: event.id,
            user,
        },
    })
}

/// Waitlisted or Going → NotGoing.
pub fn deny(event: &mut Event, user: UserId) -> Result<Applied, TransitionError> {
    match event.status_of(user) {
        RsvpStatus::Going | RsvpStatus::Waitlisted => {
            detach(event, user);
            event.no_go.push(user);
            Ok(Applied {
                status: RsvpStatus::NotGoing,
                effect: SideEffect::DeclineAttendee {
                    event: event.id,
                    user,
                },
            })
        }
        _ => Err(TransitionError::NoPendingRsvp),
    }
}

/// NotGoing → Waitlisted; the undo of [`deny`].
pub fn move_to_waitlist(event: &mut Event, user: UserId) -> Result<Applied, TransitionError> {
    if event.status_of(user) != RsvpStatus::NotGoing {
        return Err(TransitionError::NotDeclined);
    }
    detach(event, user);
    event.waitlist.push(user);
    Ok(Applied {
        status: RsvpStatus::Waitlisted,
        effect: SideEffect::MoveToWaitlist {
            event: event.id,
            user,
        },
    })
}

/// Any state → NotGoing. Idempotent when already NotGoing.
pub fn mark_not_going(event: &mut Event, user: UserId) -> Result<Applied, TransitionError> {
    if event.status_of(user) != RsvpStatus::NotGoing {
        detach(event, user);
        event.no_go.push(user);
    }
    Ok(Applied {
        status: RsvpStatus::NotGoing,
        effect: SideEffect::DeclineAttendee {
            event: event.id,
            user,
        },
    })
}

/// Remove the user from the group and from every owned event's lists.
/// Irreversible without a new invite.
pub fn leave_group(
    group: &mut Group,
    events: &mut [Event],
    user: UserId,
) -> Result<SideEffect, TransitionError> {
    membership::remove_member(group, events, user)?;
    Ok(SideEffect::LeaveGroup { group: group.id })
}

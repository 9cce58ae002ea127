//! Membership registry: who belongs to a group, who administers it.

use thiserror::Error;

use crate::ids::UserId;
use crate::types::{Event, Group};

/// Typed failures of membership operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MembershipError {
    #[error("user is already a member of this group")]
    AlreadyMember,
    #[error("user is not a member of this group")]
    NotAMember,
    #[error("the main admin cannot be removed from the group")]
    CannotRemoveMainAdmin,
}

/// True if the user belongs to the group.
pub fn is_member(group: &Group, user: UserId) -> bool {
    group.members.contains(&user)
}

/// True if the user has admin scope on the group (group admin or main admin).
pub fn is_group_admin(group: &Group, user: UserId) -> bool {
    user == group.main_admin || group.group_admins.contains(&user)
}

/// Add a user to the group's member set.
pub fn add_member(group: &mut Group, user: UserId) -> Result<(), MembershipError> {
    if is_member(group, user) {
        return Err(MembershipError::AlreadyMember);
    }
    group.members.push(user);
    Ok(())
}

/// Remove a user from the group, cascading to the RSVP lists of every
/// owned event. The main admin is never removable.
pub fn remove_member(
    group: &mut Group,
    events: &mut [Event],
    user: UserId,
) -> Result<(), MembershipError> {
    if user == group.main_admin {
        return Err(MembershipError::CannotRemoveMainAdmin);
    }
    if !is_member(group, user) {
        return Err(MembershipError::NotAMember);
    }

    group.members.retain(|m| *m != user);
    group.group_admins.retain(|a| *a != user);
    for event in events.iter_mut().filter(|e| e.group_id == group.id) {
        event.going.retain(|u| *u != user);
        event.waitlist.retain(|u| *u != user);
        event.no_go.retain(|u| *u != user);
    }
    Ok(())
}

/// Grant group-admin scope to a member. Idempotent.
pub fn promote_to_group_admin(group: &mut Group, user: UserId) -> Result<(), MembershipError> {
    if !is_member(group, user) {
        return Err(MembershipError::NotAMember);
    }
    if !group.group_admins.contains(&user) {
        group.group_admins.push(user);
    }
    Ok(())
}

/// Revoke group-admin scope from a member. Idempotent; the main admin's
/// scope is implicit and unaffected.
pub fn demote_group_admin(group: &mut Group, user: UserId) -> Result<(), MembershipError> {
    if !is_member(group, user) {
        return Err(MembershipError::NotAMember);
    }
    group.group_admins.retain(|a| *a != user);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EventId, GroupId};
    use chrono::{NaiveDate, NaiveTime};

    fn group_with(main_admin: UserId, members: &[UserId]) -> Group {
        let mut group = Group::new(GroupId::new(), "Book club", main_admin);
        for m in members {
            group.members.push(*m);
        }
        group
    }

    fn event_in(group: &Group) -> Event {
        Event::new(
            EventId::new(),
            group.id,
            "Monthly meetup",
            NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_main_admin_is_group_admin() {
        let admin = UserId::new();
        let group = group_with(admin, &[]);
        assert!(is_group_admin(&group, admin));
        assert!(!is_group_admin(&group, UserId::new()));
    }

    #[test]
    fn test_add_member_rejects_duplicate() {
        let admin = UserId::new();
        let user = UserId::new();
        let mut group = group_with(admin, &[]);

        add_member(&mut group, user).unwrap();
        assert_eq!(
            add_member(&mut group, user),
            Err(MembershipError::AlreadyMember)
        );
        assert_eq!(group.members.iter().filter(|m| **m == user).count(), 1);
    }

    #[test]
    fn test_remove_member_refuses_main_admin() {
        let admin = UserId::new();
        let mut group = group_with(admin, &[]);
        assert_eq!(
            remove_member(&mut group, &mut [], admin),
            Err(MembershipError::CannotRemoveMainAdmin)
        );
        assert!(is_member(&group, admin));
    }

    #[test]
    fn test_remove_member_absent() {
        let mut group = group_with(UserId::new(), &[]);
        assert_eq!(
            remove_member(&mut group, &mut [], UserId::new()),
            Err(MembershipError::NotAMember)
        );
    }

    #[test]
    fn test_remove_member_cascades_to_events() {
        let admin = UserId::new();
        let user = UserId::new();
        let mut group = group_with(admin, &[user]);
        group.group_admins.push(user);

        let mut going_event = event_in(&group);
        going_event.going.push(user);
        let mut waitlisted_event = event_in(&group);
        waitlisted_event.waitlist.push(user);
        let mut declined_event = event_in(&group);
        declined_event.no_go.push(user);
        let mut events = [going_event, waitlisted_event, declined_event];

        remove_member(&mut group, &mut events, user).unwrap();

        assert!(!is_member(&group, user));
        assert!(!group.group_admins.contains(&user));
        for event in &events {
            assert!(!event.going.contains(&user));
            assert!(!event.waitlist.contains(&user));
            assert!(!event.no_go.contains(&user));
        }
    }

    #[test]
    fn test_remove_member_leaves_other_groups_events_alone() {
        let admin = UserId::new();
        let user = UserId::new();
        let mut group = group_with(admin, &[user]);

        let mut foreign = Event::new(
            EventId::new(),
            GroupId::new(),
            "Other group's event",
            NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        );
        foreign.going.push(user);
        let mut events = [foreign];

        remove_member(&mut group, &mut events, user).unwrap();
        assert!(events[0].going.contains(&user));
    }

    #[test]
    fn test_add_then_remove_restores_prior_state() {
        let admin = UserId::new();
        let user = UserId::new();
        let mut group = group_with(admin, &[]);
        let members_before = group.members.clone();
        let admins_before = group.group_admins.clone();

        add_member(&mut group, user).unwrap();
        promote_to_group_admin(&mut group, user).unwrap();
        remove_member(&mut group, &mut [], user).unwrap();

        assert_eq!(group.members, members_before);
        assert_eq!(group.group_admins, admins_before);
    }

    #[test]
    fn test_promote_requires_membership() {
        let mut group = group_with(UserId::new(), &[]);
        assert_eq!(
            promote_to_group_admin(&mut group, UserId::new()),
            Err(MembershipError::NotAMember)
        );
    }

    #[test]
    fn test_promote_and_demote_are_idempotent() {
        let admin = UserId::new();
        let user = UserId::new();
        let mut group = group_with(admin, &[user]);

        promote_to_group_admin(&mut group, user).unwrap();
        promote_to_group_admin(&mut group, user).unwrap();
        assert_eq!(
            group.group_admins.iter().filter(|a| **a == user).count(),
            1
        );

        demote_group_admin(&mut group, user).unwrap();
        demote_group_admin(&mut group, user).unwrap();
        assert!(!group.group_admins.contains(&user));
    }
}

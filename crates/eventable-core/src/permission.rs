//! Permission evaluation.
//!
//! One predicate, [`can`], replaces the inline role checks the views would
//! otherwise scatter. Denial is a normal `false`, never an error; callers
//! render it as a disabled control or a "not authorized" message.

use crate::ids::{GroupId, UserId};
use crate::membership;
use crate::types::{Group, Role};

/// The acting identity, built from the session and passed explicitly.
///
/// An anonymous actor (no user id) is allowed nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    user: Option<UserId>,
    role: Role,
    admin_of: Vec<GroupId>,
}

impl Actor {
    pub fn new(user: UserId, role: Role, admin_of: Vec<GroupId>) -> Self {
        Self {
            user: Some(user),
            role,
            admin_of,
        }
    }

    /// An unauthenticated actor.
    pub fn anonymous() -> Self {
        Self {
            user: None,
            role: Role::Member,
            admin_of: Vec::new(),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// An action an actor may request against a group (or one of its events).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    JoinWaitlist,
    /// Set a user's state to NotGoing. Self-service for members; any
    /// target for admins.
    MarkNotGoing { user: UserId },
    Approve,
    Deny,
    MoveToWaitlist,
    CreateEvent,
    EditEvent,
    DeleteEvent,
    EditGroup,
    DeleteGroup,
    ManageMembers,
    ManageAdmins,
    SendEmail,
    /// Read-only "who's going" view; members see names only.
    ViewRoster,
    /// Leave the group. Self only; denied for the main admin.
    LeaveGroup { user: UserId },
}

/// Whether `actor` may perform `action` scoped to `group`.
pub fn can(actor: &Actor, action: Action, group: &Group) -> bool {
    let Some(user) = actor.user else {
        return false;
    };
    if actor.role == Role::Admin {
        return true;
    }

    let group_admin =
        membership::is_group_admin(group, user) || actor.admin_of.contains(&group.id);
    let member = membership::is_member(group, user);

    match action {
        Action::Approve
        | Action::Deny
        | Action::MoveToWaitlist
        | Action::CreateEvent
        | Action::EditEvent
        | Action::DeleteEvent
        | Action::EditGroup
        | Action::DeleteGroup
        | Action::ManageMembers
        | Action::ManageAdmins
        | Action::SendEmail => group_admin,
        Action::JoinWaitlist | Action::ViewRoster => member,
        Action::MarkNotGoing { user: target } => {
            if group_admin {
                true
            } else {
                member && target == user
            }
        }
        Action::LeaveGroup { user: target } => {
            member && target == user && target != group.main_admin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::GroupId;
    use crate::types::Group;

    fn all_actions(u: UserId) -> [Action; 15] {
        [
            Action::JoinWaitlist,
            Action::MarkNotGoing { user: u },
            Action::Approve,
            Action::Deny,
            Action::MoveToWaitlist,
            Action::CreateEvent,
            Action::EditEvent,
            Action::DeleteEvent,
            Action::EditGroup,
            Action::DeleteGroup,
            Action::ManageMembers,
            Action::ManageAdmins,
            Action::SendEmail,
            Action::ViewRoster,
            Action::LeaveGroup { user: u },
        ]
    }

    fn group() -> Group {
        Group::new(GroupId::new(), "Chess", UserId::new())
    }

    #[test]
    fn test_anonymous_can_do_nothing() {
        let group = group();
        let anon = Actor::anonymous();
        for action in all_actions(UserId::new()) {
            assert!(!can(&anon, action, &group), "{action:?} allowed anonymously");
        }
    }

    #[test]
    fn test_global_admin_can_do_everything() {
        let group = group();
        let user = UserId::new();
        let admin = Actor::new(user, Role::Admin, vec![]);
        for action in all_actions(user) {
            assert!(can(&admin, action, &group), "{action:?} denied to admin");
        }
    }

    #[test]
    fn test_group_admin_scope() {
        let mut group = group();
        let user = UserId::new();
        group.members.push(user);
        group.group_admins.push(user);
        let actor = Actor::new(user, Role::Member, vec![]);

        assert!(can(&actor, Action::Approve, &group));
        assert!(can(&actor, Action::CreateEvent, &group));
        assert!(can(&actor, Action::SendEmail, &group));
        assert!(can(
            &actor,
            Action::MarkNotGoing { user: UserId::new() },
            &group
        ));

        // scope does not leak into another group
        let other = Group::new(GroupId::new(), "Other", UserId::new());
        assert!(!can(&actor, Action::Approve, &other));
    }

    #[test]
    fn test_admin_of_list_grants_group_scope() {
        let mut group = group();
        let user = UserId::new();
        group.members.push(user);
        // session says group-admin even though the local mirror lags
        let actor = Actor::new(user, Role::Member, vec![group.id]);
        assert!(can(&actor, Action::EditEvent, &group));
    }

    #[test]
    fn test_member_permissions() {
        let mut group = group();
        let user = UserId::new();
        group.members.push(user);
        let actor = Actor::new(user, Role::Member, vec![]);

        assert!(can(&actor, Action::JoinWaitlist, &group));
        assert!(can(&actor, Action::ViewRoster, &group));
        assert!(can(&actor, Action::MarkNotGoing { user }, &group));
        assert!(can(&actor, Action::LeaveGroup { user }, &group));

        assert!(!can(&actor, Action::Approve, &group));
        assert!(!can(&actor, Action::DeleteEvent, &group));
        assert!(!can(&actor, Action::ManageMembers, &group));
        assert!(!can(
            &actor,
            Action::MarkNotGoing { user: UserId::new() },
            &group
        ));
        assert!(!can(
            &actor,
            Action::LeaveGroup { user: UserId::new() },
            &group
        ));
    }

    #[test]
    fn test_non_member_cannot_join_or_view() {
        let group = group();
        let actor = Actor::new(UserId::new(), Role::Member, vec![]);
        assert!(!can(&actor, Action::JoinWaitlist, &group));
        assert!(!can(&actor, Action::ViewRoster, &group));
    }

    #[test]
    fn test_main_admin_cannot_leave_own_group() {
        let group = group();
        let admin = group.main_admin;
        let actor = Actor::new(admin, Role::Member, vec![]);
        assert!(!can(&actor, Action::LeaveGroup { user: admin }, &group));
    }
}

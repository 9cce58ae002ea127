//! Group record and its membership sets.

use crate::ids::{GroupId, UserId};

/// Group record.
///
/// The main admin is the creator; it is always a member and the member
/// management flow can never remove it. Group admins are a mutable subset
/// of the members. Deleting a group cascades to its events and membership
/// records server-side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub tags: Vec<String>,
    /// The immutable creator-admin.
    pub main_admin: UserId,
    /// Promotable/demotable members with admin scope on this group.
    pub group_admins: Vec<UserId>,
    pub members: Vec<UserId>,
    /// Single active invite token; regenerating replaces it.
    pub invite_token: Option<String>,
}

impl Group {
    /// Create a group owned by `main_admin`, who starts as its only member.
    pub fn new(id: GroupId, name: impl Into<String>, main_admin: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
            main_admin,
            group_admins: Vec::new(),
            members: vec![main_admin],
            invite_token: None,
        }
    }
}

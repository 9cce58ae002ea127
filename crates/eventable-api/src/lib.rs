//! The API boundary the rest of the workspace consumes.
//!
//! `eventable-http` implements [`EventableApi`] over the REST backend;
//! tests mock it via the `test-support` feature.

pub mod error;
pub mod wire;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use eventable_core::{EventId, GroupId, UserId};

pub use error::ApiError;
pub use wire::{
    ChangePasswordRequest, CreateEventRequest, CreateGroupRequest, EmailRequest, Envelope,
    EventDto, GroupDto, MessageDto, UpdateEventRequest, UpdateGroupRequest, UpdateUserRequest,
    UserDto,
};

/// The REST backend, one method per endpoint.
///
/// Mutating calls answer the `{success, data, message}` envelope; a
/// `success: false` body or an HTTP error status surfaces as [`ApiError`].
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait EventableApi: Send + Sync {
    // ───────────────────────────────── Groups ─────────────────────────────────

    /// `GET /groups`: every group (admin dashboards).
    async fn list_groups(&self) -> Result<Vec<GroupDto>, ApiError>;

    /// `GET /groups/user`: groups the current user belongs to.
    async fn my_groups(&self) -> Result<Vec<GroupDto>, ApiError>;

    /// `POST /groups`
    async fn create_group(&self, req: &CreateGroupRequest) -> Result<GroupDto, ApiError>;

    /// `PUT /groups/:id`
    async fn update_group(
        &self,
        group: GroupId,
        req: &UpdateGroupRequest,
    ) -> Result<GroupDto, ApiError>;

    /// `DELETE /groups/:id`: cascades to events and memberships server-side.
    async fn delete_group(&self, group: GroupId) -> Result<(), ApiError>;

    /// `POST /groups/:id/invite`: regenerate the invite token, replacing
    /// the previous one.
    async fn regenerate_invite(&self, group: GroupId) -> Result<String, ApiError>;

    /// `GET /groups/:id/members`
    async fn group_members(&self, group: GroupId) -> Result<Vec<UserDto>, ApiError>;

    /// `POST /groups/:id/members`: add an existing account by email.
    async fn add_group_member(&self, group: GroupId, email: &str) -> Result<(), ApiError>;

    /// `DELETE /groups/:id/members/:userId`
    async fn remove_group_member(&self, group: GroupId, user: UserId) -> Result<(), ApiError>;

    /// `POST /groups/:id/leave`
    async fn leave_group(&self, group: GroupId) -> Result<(), ApiError>;

    /// `GET /groups/:id/admins`
    async fn group_admins(&self, group: GroupId) -> Result<Vec<UserDto>, ApiError>;

    /// `POST /groups/:id/admins`
    async fn add_group_admin(&self, group: GroupId, user: UserId) -> Result<(), ApiError>;

    /// `DELETE /groups/:id/admins/:userId`
    async fn remove_group_admin(&self, group: GroupId, user: UserId) -> Result<(), ApiError>;

    /// `POST /groups/:id/send-email`: email every member.
    async fn email_group(&self, group: GroupId, req: &EmailRequest) -> Result<(), ApiError>;

    // ───────────────────────────────── Events ─────────────────────────────────

    /// `GET /events`: every upcoming event (admin dashboards).
    async fn list_events(&self) -> Result<Vec<EventDto>, ApiError>;

    /// `GET /events/user`: upcoming events in the user's groups.
    async fn my_events(&self) -> Result<Vec<EventDto>, ApiError>;

    /// `GET /events/past`
    async fn past_events(&self) -> Result<Vec<EventDto>, ApiError>;

    /// `POST /groups/:id/events`
    async fn create_event(
        &self,
        group: GroupId,
        req: &CreateEventRequest,
    ) -> Result<EventDto, ApiError>;

    /// `PUT /events/:id`
    async fn update_event(
        &self,
        event: EventId,
        req: &UpdateEventRequest,
    ) -> Result<EventDto, ApiError>;

    /// `DELETE /events/:id`
    async fn delete_event(&self, event: EventId) -> Result<(), ApiError>;

    /// `GET /events/:id/attendees`: confirmed attendees, names only for
    /// non-admin callers.
    async fn event_attendees(&self, event: EventId) -> Result<Vec<UserDto>, ApiError>;

    /// `POST /events/:id/join`: the current user joins the waitlist.
    async fn join_event(&self, event: EventId) -> Result<EventDto, ApiError>;

    /// `POST /events/:id/approve`
    async fn approve_attendee(&self, event: EventId, user: UserId) -> Result<EventDto, ApiError>;

    /// `POST /events/:id/move-to-waitlist`
    async fn move_attendee_to_waitlist(
        &self,
        event: EventId,
        user: UserId,
    ) -> Result<EventDto, ApiError>;

    /// `POST /events/:id/nogo`: deny or self-service "not going".
    async fn decline_attendee(&self, event: EventId, user: UserId) -> Result<EventDto, ApiError>;

    /// `POST /events/:id/send-email`: email the going list.
    async fn email_event(&self, event: EventId, req: &EmailRequest) -> Result<(), ApiError>;

    // ──────────────────────────────── Messages ────────────────────────────────

    /// `GET /messages/event/:id?since=&limit=`: ascending by creation time.
    async fn event_messages(
        &self,
        event: EventId,
        since: Option<DateTime<Utc>>,
        limit: Option<u32>,
    ) -> Result<Vec<MessageDto>, ApiError>;

    /// `POST /messages/event/:id`
    async fn post_message(&self, event: EventId, content: &str) -> Result<MessageDto, ApiError>;

    /// `GET /messages/unread-counts?eventIds=`
    async fn unread_counts(
        &self,
        events: &[EventId],
    ) -> Result<HashMap<EventId, u32>, ApiError>;

    // ──────────────────────────────── Invites ─────────────────────────────────

    /// `GET /join/:token`: public preview of the inviting group; issued
    /// without credentials.
    async fn preview_invite(&self, token: &str) -> Result<GroupDto, ApiError>;

    /// `POST /join/:token`: the current user joins via the invite.
    async fn accept_invite(&self, token: &str) -> Result<GroupDto, ApiError>;

    // ───────────────────────────────── Users ──────────────────────────────────

    /// `GET /users/:id`
    async fn get_user(&self, user: UserId) -> Result<UserDto, ApiError>;

    /// `PUT /users/:id`
    async fn update_user(&self, user: UserId, req: &UpdateUserRequest)
        -> Result<UserDto, ApiError>;

    /// `PUT /users/:id/password`
    async fn change_password(
        &self,
        user: UserId,
        req: &ChangePasswordRequest,
    ) -> Result<(), ApiError>;

    /// `GET /users/search?email=`
    async fn search_user_by_email(&self, email: &str) -> Result<UserDto, ApiError>;

    // ───────────────────────────── Password reset ─────────────────────────────

    /// `POST /password-reset/request`
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// `GET /password-reset/verify/:token`
    async fn verify_reset_token(&self, token: &str) -> Result<(), ApiError>;

    /// `POST /password-reset/reset`
    async fn submit_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), ApiError>;
}

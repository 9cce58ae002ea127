//! reqwest-backed implementation of [`EventableApi`].
//!
//! The client holds the backend base URL and, once logged in, a bearer
//! token the session layer supplies. No retries or extra timeouts are
//! layered on top of reqwest; a failed call surfaces as a single
//! [`ApiError`] and the caller decides whether to re-invoke.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use eventable_api::{
    ApiError, ChangePasswordRequest, CreateEventRequest, CreateGroupRequest, EmailRequest,
    Envelope, EventDto, EventableApi, GroupDto, MessageDto, UpdateEventRequest,
    UpdateGroupRequest, UpdateUserRequest, UserDto,
};
use eventable_core::{EventId, GroupId, UserId};

/// HTTP client for the Eventable backend.
#[derive(Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
    token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            token: None,
        }
    }

    /// Attach the session's bearer token to subsequent requests.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        authed: bool,
    ) -> Result<Envelope<T>, ApiError> {
        debug!(%method, path, "api request");
        let mut request = self.client.request(method, self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if authed {
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status, &bytes));
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, &[], None, true)
            .await?
            .into_result()
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, path, query, None, true)
            .await?
            .into_result()
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(Method::POST, path, &[], Some(body), true)
            .await?
            .into_result()
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send::<(), T>(Method::POST, path, &[], None, true)
            .await?
            .into_result()
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(Method::PUT, path, &[], Some(body), true)
            .await?
            .into_result()
    }

    /// POST whose response carries no payload worth decoding.
    async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send::<_, serde_json::Value>(Method::POST, path, &[], Some(body), true)
            .await?
            .into_ack()
    }

    async fn post_empty_ack(&self, path: &str) -> Result<(), ApiError> {
        self.send::<(), serde_json::Value>(Method::POST, path, &[], None, true)
            .await?
            .into_ack()
    }

    async fn put_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.send::<_, serde_json::Value>(Method::PUT, path, &[], Some(body), true)
            .await?
            .into_ack()
    }

    async fn get_ack(&self, path: &str) -> Result<(), ApiError> {
        self.send::<(), serde_json::Value>(Method::GET, path, &[], None, true)
            .await?
            .into_ack()
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<(), serde_json::Value>(Method::DELETE, path, &[], None, true)
            .await?
            .into_ack()
    }
}

/// Map a non-success status to the taxonomy, preferring the body's
/// `message` when the server sent one.
fn error_from_body(status: StatusCode, bytes: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Envelope<serde_json::Value>>(bytes)
        .ok()
        .and_then(|env| env.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    ApiError::from_status(status.as_u16(), message)
}

// Nested `data` payload shapes, matching the backend contract.
#[derive(Deserialize)]
struct GroupsData {
    groups: Vec<GroupDto>,
}

#[derive(Deserialize)]
struct GroupData {
    group: GroupDto,
}

#[derive(Deserialize)]
struct EventsData {
    events: Vec<EventDto>,
}

#[derive(Deserialize)]
struct EventData {
    event: EventDto,
}

#[derive(Deserialize)]
struct MembersData {
    members: Vec<UserDto>,
}

#[derive(Deserialize)]
struct AdminsData {
    admins: Vec<UserDto>,
}

#[derive(Deserialize)]
struct AttendeesData {
    attendees: Vec<UserDto>,
}

#[derive(Deserialize)]
struct MessagesData {
    messages: Vec<MessageDto>,
}

#[derive(Deserialize)]
struct MessageData {
    message: MessageDto,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InviteTokenData {
    invite_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnreadCountsData {
    unread_counts: HashMap<EventId, u32>,
}

#[derive(Deserialize)]
struct UserData {
    user: UserDto,
}

#[async_trait::async_trait]
impl EventableApi for HttpApi {
    async fn list_groups(&self) -> Result<Vec<GroupDto>, ApiError> {
        Ok(self.get::<GroupsData>("/groups").await?.groups)
    }

    async fn my_groups(&self) -> Result<Vec<GroupDto>, ApiError> {
        Ok(self.get::<GroupsData>("/groups/user").await?.groups)
    }

    async fn create_group(&self, req: &CreateGroupRequest) -> Result<GroupDto, ApiError> {
        Ok(self.post::<_, GroupData>("/groups", req).await?.group)
    }

    async fn update_group(
        &self,
        group: GroupId,
        req: &UpdateGroupRequest,
    ) -> Result<GroupDto, ApiError> {
        Ok(self
            .put::<_, GroupData>(&format!("/groups/{group}"), req)
            .await?
            .group)
    }

    async fn delete_group(&self, group: GroupId) -> Result<(), ApiError> {
        self.delete(&format!("/groups/{group}")).await
    }

    async fn regenerate_invite(&self, group: GroupId) -> Result<String, ApiError> {
        Ok(self
            .post_empty::<InviteTokenData>(&format!("/groups/{group}/invite"))
            .await?
            .invite_token)
    }

    async fn group_members(&self, group: GroupId) -> Result<Vec<UserDto>, ApiError> {
        Ok(self
            .get::<MembersData>(&format!("/groups/{group}/members"))
            .await?
            .members)
    }

    async fn add_group_member(&self, group: GroupId, email: &str) -> Result<(), ApiError> {
        self.post_ack(
            &format!("/groups/{group}/members"),
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    async fn remove_group_member(&self, group: GroupId, user: UserId) -> Result<(), ApiError> {
        self.delete(&format!("/groups/{group}/members/{user}")).await
    }

    async fn leave_group(&self, group: GroupId) -> Result<(), ApiError> {
        self.post_empty_ack(&format!("/groups/{group}/leave")).await
    }

    async fn group_admins(&self, group: GroupId) -> Result<Vec<UserDto>, ApiError> {
        Ok(self
            .get::<AdminsData>(&format!("/groups/{group}/admins"))
            .await?
            .admins)
    }

    async fn add_group_admin(&self, group: GroupId, user: UserId) -> Result<(), ApiError> {
        self.post_ack(
            &format!("/groups/{group}/admins"),
            &serde_json::json!({ "userId": user }),
        )
        .await
    }

    async fn remove_group_admin(&self, group: GroupId, user: UserId) -> Result<(), ApiError> {
        self.delete(&format!("/groups/{group}/admins/{user}")).await
    }

    async fn email_group(&self, group: GroupId, req: &EmailRequest) -> Result<(), ApiError> {
        self.post_ack(&format!("/groups/{group}/send-email"), req).await
    }

    async fn list_events(&self) -> Result<Vec<EventDto>, ApiError> {
        Ok(self.get::<EventsData>("/events").await?.events)
    }

    async fn my_events(&self) -> Result<Vec<EventDto>, ApiError> {
        Ok(self.get::<EventsData>("/events/user").await?.events)
    }

    async fn past_events(&self) -> Result<Vec<EventDto>, ApiError> {
        Ok(self.get::<EventsData>("/events/past").await?.events)
    }

    async fn create_event(
        &self,
        group: GroupId,
        req: &CreateEventRequest,
    ) -> Result<EventDto, ApiError> {
        Ok(self
            .post::<_, EventData>(&format!("/groups/{group}/events"), req)
            .await?
            .event)
    }

    async fn update_event(
        &self,
        event: EventId,
        req: &UpdateEventRequest,
    ) -> Result<EventDto, ApiError> {
        Ok(self
            .put::<_, EventData>(&format!("/events/{event}"), req)
            .await?
            .event)
    }

    async fn delete_event(&self, event: EventId) -> Result<(), ApiError> {
        self.delete(&format!("/events/{event}")).await
    }

    async fn event_attendees(&self, event: EventId) -> Result<Vec<UserDto>, ApiError> {
        Ok(self
            .get::<AttendeesData>(&format!("/events/{event}/attendees"))
            .await?
            .attendees)
    }

    async fn join_event(&self, event: EventId) -> Result<EventDto, ApiError> {
        Ok(self
            .post_empty::<EventData>(&format!("/events/{event}/join"))
            .await?
            .event)
    }

    async fn approve_attendee(&self, event: EventId, user: UserId) -> Result<EventDto, ApiError> {
        Ok(self
            .post::<_, EventData>(
                &format!("/events/{event}/approve"),
                &serde_json::json!({ "userId": user }),
            )
            .await?
            .event)
    }

    async fn move_attendee_to_waitlist(
        &self,
        event: EventId,
        user: UserId,
    ) -> Result<EventDto, ApiError> {
        Ok(self
            .post::<_, EventData>(
                &format!("/events/{event}/move-to-waitlist"),
                &serde_json::json!({ "userId": user }),
            )
            .await?
            .event)
    }

    async fn decline_attendee(&self, event: EventId, user: UserId) -> Result<EventDto, ApiError> {
        Ok(self
            .post::<_, EventData>(
                &format!("/events/{event}/nogo"),
                &serde_json::json!({ "userId": user }),
            )
            .await?
            .event)
    }

    async fn email_event(&self, event: EventId, req: &EmailRequest) -> Result<(), ApiError> {
        self.post_ack(&format!("/events/{event}/send-email"), req).await
    }

    async fn event_messages(
        &self,
        event: EventId,
        since: Option<DateTime<Utc>>,
        limit: Option<u32>,
    ) -> Result<Vec<MessageDto>, ApiError> {
        let mut query = Vec::new();
        if let Some(since) = since {
            query.push(("since", since.to_rfc3339()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        Ok(self
            .get_with_query::<MessagesData>(&format!("/messages/event/{event}"), &query)
            .await?
            .messages)
    }

    async fn post_message(&self, event: EventId, content: &str) -> Result<MessageDto, ApiError> {
        Ok(self
            .post::<_, MessageData>(
                &format!("/messages/event/{event}"),
                &serde_json::json!({ "content": content }),
            )
            .await?
            .message)
    }

    async fn unread_counts(
        &self,
        events: &[EventId],
    ) -> Result<HashMap<EventId, u32>, ApiError> {
        let ids = events
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Ok(self
            .get_with_query::<UnreadCountsData>("/messages/unread-counts", &[("eventIds", ids)])
            .await?
            .unread_counts)
    }

    async fn preview_invite(&self, token: &str) -> Result<GroupDto, ApiError> {
        // public endpoint, no credentials attached
        Ok(self
            .send::<(), GroupData>(Method::GET, &format!("/join/{token}"), &[], None, false)
            .await?
            .into_result()?
            .group)
    }

    async fn accept_invite(&self, token: &str) -> Result<GroupDto, ApiError> {
        Ok(self
            .post_empty::<GroupData>(&format!("/join/{token}"))
            .await?
            .group)
    }

    async fn get_user(&self, user: UserId) -> Result<UserDto, ApiError> {
        Ok(self.get::<UserData>(&format!("/users/{user}")).await?.user)
    }

    async fn update_user(
        &self,
        user: UserId,
        req: &UpdateUserRequest,
    ) -> Result<UserDto, ApiError> {
        Ok(self
            .put::<_, UserData>(&format!("/users/{user}"), req)
            .await?
            .user)
    }

    async fn change_password(
        &self,
        user: UserId,
        req: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        self.put_ack(&format!("/users/{user}/password"), req).await
    }

    async fn search_user_by_email(&self, email: &str) -> Result<UserDto, ApiError> {
        Ok(self
            .get_with_query::<UserData>("/users/search", &[("email", email.to_string())])
            .await?
            .user)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        self.post_ack(
            "/password-reset/request",
            &serde_json::json!({ "email": email }),
        )
        .await
    }

    async fn verify_reset_token(&self, token: &str) -> Result<(), ApiError> {
        self.get_ack(&format!("/password-reset/verify/{token}")).await
    }

    async fn submit_password_reset(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.post_ack(
            "/password-reset/reset",
            &serde_json::json!({ "token": token, "newPassword": new_password }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpApi::new("http://localhost:5000/");
        assert_eq!(api.url("/groups"), "http://localhost:5000/groups");
    }

    #[test]
    fn test_error_from_body_prefers_server_message() {
        let body = br#"{"success":false,"data":null,"message":"Event is full"}"#;
        let err = error_from_body(StatusCode::CONFLICT, body);
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Event is full"));
    }

    #[test]
    fn test_error_from_body_falls_back_to_reason() {
        let err = error_from_body(StatusCode::NOT_FOUND, b"not json");
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Not Found"));
    }

    #[test]
    fn test_nested_payload_shapes() {
        let body = r#"{"success":true,"data":{"inviteToken":"abc123"}}"#;
        let env: Envelope<InviteTokenData> = serde_json::from_str(body).unwrap();
        assert_eq!(env.into_result().unwrap().invite_token, "abc123");

        let body = r#"{"success":true,"data":{"unreadCounts":{}}}"#;
        let env: Envelope<UnreadCountsData> = serde_json::from_str(body).unwrap();
        assert!(env.into_result().unwrap().unread_counts.is_empty());
    }

    #[test]
    fn test_ack_without_data_succeeds() {
        let body = r#"{"success":true,"message":"Deleted"}"#;
        let env: Envelope<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert!(env.into_ack().is_ok());
    }
}

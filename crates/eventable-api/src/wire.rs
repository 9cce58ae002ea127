//! Wire types: the response envelope and the JSON shapes of each entity.
//!
//! Field names follow the backend's camelCase contract. DTOs convert into
//! the core domain records with `From`; the ids are already typed UUIDs on
//! the wire.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use eventable_core::{
    Event, EventId, Group, GroupId, Location, Message, MessageId, Role, User, UserId,
};

use crate::error::ApiError;

/// Every mutating endpoint answers `{ success, data, message }`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, mapping `success: false` to a conflict carrying
    /// the server's message verbatim.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Conflict(
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("missing data field".to_string()))
    }

    /// Check `success` only; acknowledgement endpoints carry no payload.
    pub fn into_ack(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::Conflict(
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ))
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub groups: Vec<GroupId>,
    #[serde(default)]
    pub admin_of: Vec<GroupId>,
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        User {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            role: dto.role,
            groups: dto.groups,
            admin_of: dto.admin_of,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub main_admin: UserId,
    #[serde(default)]
    pub group_admins: Vec<UserId>,
    #[serde(default)]
    pub members: Vec<UserId>,
    #[serde(default)]
    pub invite_token: Option<String>,
}

impl From<GroupDto> for Group {
    fn from(dto: GroupDto) -> Self {
        Group {
            id: dto.id,
            name: dto.name,
            tags: dto.tags,
            main_admin: dto.main_admin,
            group_admins: dto.group_admins,
            members: dto.members,
            invite_token: dto.invite_token,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: EventId,
    pub group_id: GroupId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default)]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub going_list: Vec<UserId>,
    #[serde(default)]
    pub waitlist: Vec<UserId>,
    #[serde(default)]
    pub no_go_list: Vec<UserId>,
}

impl From<EventDto> for Event {
    fn from(dto: EventDto) -> Self {
        Event {
            id: dto.id,
            group_id: dto.group_id,
            title: dto.title,
            description: dto.description,
            date: dto.date,
            time: dto.time,
            location: dto.location.map(|name| Location {
                name,
                map_url: dto.map_url,
            }),
            max_attendees: dto.max_attendees,
            guests: dto.guests,
            going: dto.going_list,
            waitlist: dto.waitlist,
            no_go: dto.no_go_list,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: MessageId,
    pub event_id: EventId,
    pub sender_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Message {
            id: dto.id,
            event_id: dto.event_id,
            sender_id: dto.sender_id,
            content: dto.content,
            created_at: dto.created_at,
        }
    }
}

// ───────────────────────────── request payloads ─────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<u32>,
    #[serde(default)]
    pub guests: u32,
    /// Ask the server to email the group about the new event.
    #[serde(default)]
    pub notify_group: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    /// `Some(None)` clears the capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attendees: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success() {
        let json = r#"{"success":true,"data":42,"message":null}"#;
        let env: Envelope<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(env.into_result().unwrap(), 42);
    }

    #[test]
    fn test_envelope_failure_carries_message() {
        let json = r#"{"success":false,"data":null,"message":"Event is full"}"#;
        let env: Envelope<i32> = serde_json::from_str(json).unwrap();
        let err = env.into_result().unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref m) if m == "Event is full"));
    }

    #[test]
    fn test_envelope_success_without_data_is_decode_error() {
        let json = r#"{"success":true}"#;
        let env: Envelope<i32> = serde_json::from_str(json).unwrap();
        assert!(matches!(env.into_result(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_event_dto_camel_case_and_conversion() {
        let json = r#"{
            "id": "8c5e0d1e-9d13-4c22-9f2a-6f5a4f4f2e11",
            "groupId": "0d0a6e5e-52e2-4d8a-a6c7-2f6e9c3b1d22",
            "title": "Trail day",
            "description": "Bring water",
            "date": "2025-06-01",
            "time": "18:30:00",
            "location": "North entrance",
            "maxAttendees": 10,
            "guests": 2,
            "goingList": ["3d2a6e5e-52e2-4d8a-a6c7-2f6e9c3b1d33"],
            "waitlist": [],
            "noGoList": []
        }"#;
        let dto: EventDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.max_attendees, Some(10));

        let event: Event = dto.into();
        assert_eq!(event.title, "Trail day");
        assert_eq!(event.guests, 2);
        assert_eq!(event.going.len(), 1);
        assert_eq!(event.location.as_ref().unwrap().name, "North entrance");
        assert!(event.location.as_ref().unwrap().map_url.is_none());
        assert_eq!(event.attending_count(), 3);
    }

    #[test]
    fn test_event_dto_defaults_for_missing_lists() {
        let json = r#"{
            "id": "8c5e0d1e-9d13-4c22-9f2a-6f5a4f4f2e11",
            "groupId": "0d0a6e5e-52e2-4d8a-a6c7-2f6e9c3b1d22",
            "title": "Minimal",
            "date": "2025-06-01",
            "time": "09:00:00"
        }"#;
        let dto: EventDto = serde_json::from_str(json).unwrap();
        assert!(dto.going_list.is_empty());
        assert!(dto.max_attendees.is_none());
        assert_eq!(dto.guests, 0);
    }

    #[test]
    fn test_update_event_request_skips_absent_fields() {
        let req = UpdateEventRequest {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"title":"New title"}"#);
    }

    #[test]
    fn test_user_dto_role_lowercase() {
        let json = r#"{
            "id": "3d2a6e5e-52e2-4d8a-a6c7-2f6e9c3b1d33",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": "admin"
        }"#;
        let dto: UserDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.role, Role::Admin);
    }
}

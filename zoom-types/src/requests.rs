/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Request types for the Zoom REST API.
//!
//! `*Query` types are serialized into the URL query string; unset fields are
//! left out entirely. `*Request` types are JSON bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Paging parameters shared by every list endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PaginationQuery {
    /// Opaque cursor from the previous page's `next_page_token`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,

    /// Deprecated by Zoom in favour of `next_page_token`, still honoured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,

    /// Records per page (Zoom caps this at 300).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

/// A list query that can be advanced to the next page.
pub trait PageRequest {
    fn set_next_page_token(&mut self, token: Option<String>);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Query parameters for `GET /users`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ListUsersQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,

    /// Extra fields to include, e.g. `"custom_attributes"` or `"host_key"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_fields: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,

    /// `active`, `inactive` or `pending`. Zoom defaults to `active`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl PageRequest for ListUsersQuery {
    fn set_next_page_token(&mut self, token: Option<String>) {
        self.pagination.next_page_token = token;
    }
}

/// Request body for `POST /users`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// `create`, `autoCreate`, `custCreate` or `ssoCreate`.
    pub action: String,

    pub user_info: UserInfo,
}

/// The `user_info` object of [`CreateUserRequest`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub email: String,

    /// 1 = basic, 2 = licensed, 4 = unassigned without Meetings Basic, 99 = none.
    #[serde(rename = "type")]
    pub user_type: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Only used with the `autoCreate` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Query parameters for `DELETE /users/{userId}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DeleteUserQuery {
    /// `disassociate` (default) or `delete`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_email: Option<bool>,

    /// Recipient of the deleted user's meetings, webinars and recordings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_meeting: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_recording: Option<bool>,
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

/// Query parameters for `GET /users/{userId}/meetings`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct ListMeetingsQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,

    /// `scheduled`, `live`, `upcoming`, `upcoming_meetings` or `previous_meetings`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,

    /// Start date (`yyyy-mm-dd`), only with `previous_meetings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// End date (`yyyy-mm-dd`), only with `previous_meetings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl PageRequest for ListMeetingsQuery {
    fn set_next_page_token(&mut self, token: Option<String>) {
        self.pagination.next_page_token = token;
    }
}

/// Request body for `POST /users/{userId}/meetings`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CreateMeetingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda: Option<String>,

    /// Let Zoom generate a password from the account's password policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_password: Option<bool>,

    /// Scheduled length in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_schedule: Option<bool>,

    /// Email or user ID of the user to schedule on behalf of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_for: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<MeetingSettings>,

    /// Sent as `yyyy-MM-ddTHH:mm:ssZ`, i.e. always GMT.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "zoom_time"
    )]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    /// 1 = instant, 2 = scheduled, 3 = recurring without fixed time,
    /// 8 = recurring with fixed time.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<i32>,
}

/// The `settings` object of [`CreateMeetingRequest`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MeetingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_video: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_video: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_before_host: Option<bool>,

    /// Minutes before start that participants may join: 0 = any time, 5, 10 or 15.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jbh_time: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mute_upon_entry: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_room: Option<bool>,

    /// 0 = auto approve, 1 = manual, 2 = no registration required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_type: Option<i32>,

    /// `both`, `telephony`, `voip` or `thirdParty`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,

    /// `local`, `cloud` or `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_recording: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_authentication: Option<bool>,

    /// Semicolon-separated emails or IDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_hosts: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_meeting: Option<bool>,
}

/// Query parameters for `DELETE /meetings/{meetingId}`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DeleteMeetingQuery {
    /// Delete a single occurrence of a recurring meeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_for_reminder: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_meeting_reminder: Option<bool>,
}

/// `start_time` as Zoom expects it on create: `yyyy-MM-ddTHH:mm:ssZ`.
///
/// Decoding also accepts full RFC 3339 so values echoed back by the API
/// round-trip.
mod zoom_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => serializer.serialize_str(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, FORMAT) {
            return Ok(Some(naive.and_utc()));
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| Some(t.with_timezone(&Utc)))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn list_users_query_only_encodes_set_fields() {
        let query = ListUsersQuery {
            role_id: Some("foo".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "role_id=foo");
    }

    #[test]
    fn list_users_query_flattens_pagination() {
        let query = ListUsersQuery {
            pagination: PaginationQuery {
                next_page_token: Some("abc".to_string()),
                page_size: Some(300),
                ..Default::default()
            },
            status: Some("active".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_urlencoded::to_string(&query).unwrap(),
            "next_page_token=abc&page_size=300&status=active"
        );
    }

    #[test]
    fn empty_queries_encode_to_nothing() {
        assert_eq!(
            serde_urlencoded::to_string(DeleteUserQuery::default()).unwrap(),
            ""
        );
        assert_eq!(
            serde_urlencoded::to_string(DeleteMeetingQuery::default()).unwrap(),
            ""
        );
    }

    #[test]
    fn list_meetings_type_uses_vendor_name() {
        let query = ListMeetingsQuery {
            meeting_type: Some("2".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&query).unwrap(), "type=2");
    }

    #[test]
    fn set_next_page_token_replaces_cursor() {
        let mut query = ListMeetingsQuery::default();
        query.set_next_page_token(Some("next".to_string()));
        assert_eq!(query.pagination.next_page_token.as_deref(), Some("next"));
        query.set_next_page_token(None);
        assert!(query.pagination.next_page_token.is_none());
    }

    #[test]
    fn create_user_omits_unset_optionals() {
        let req = CreateUserRequest {
            action: "create".to_string(),
            user_info: UserInfo {
                email: "eleanor@example.com".to_string(),
                user_type: 2,
                first_name: Some("Eleanor".to_string()),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "action": "create",
                "user_info": {
                    "email": "eleanor@example.com",
                    "type": 2,
                    "first_name": "Eleanor"
                }
            })
        );
    }

    #[test]
    fn create_meeting_formats_start_time_in_gmt() {
        let start = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        let req = CreateMeetingRequest {
            start_time: Some(start),
            meeting_type: Some(2),
            settings: Some(MeetingSettings {
                join_before_host: Some(true),
                jbh_time: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["start_time"], "2024-03-09T14:30:05Z");
        assert_eq!(json["type"], 2);
        assert_eq!(json["settings"]["jbh_time"], 0);
        assert!(json.get("topic").is_none());

        let back: CreateMeetingRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back.start_time, Some(start));
    }

    #[test]
    fn start_time_accepts_rfc3339_offsets() {
        let req: CreateMeetingRequest =
            serde_json::from_str(r#"{"start_time":"2024-03-09T16:30:05+02:00"}"#).unwrap();
        assert_eq!(
            req.start_time,
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap())
        );
    }
}

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

//! Response types for the Zoom REST API.
//!
//! Every struct is `#[serde(default)]`: Zoom omits fields freely depending on
//! account plan and `include_fields`, and a missing field should decode to
//! its empty value rather than fail the call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Paging metadata carried by every list response.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
    /// Cursor for the next page. Empty or absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_records: Option<i64>,
}

impl Pagination {
    /// The cursor for the next page, or `None` when this is the last page.
    pub fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// One page of a list endpoint.
pub trait Page {
    type Item;

    fn next_page_token(&self) -> Option<&str>;

    fn into_items(self) -> Vec<Self::Item>;
}

// ---------------------------------------------------------------------------
// OAuth
// ---------------------------------------------------------------------------

/// Response of `POST https://zoom.us/oauth/token` for the
/// `account_credentials` grant.
#[derive(Serialize, Deserialize, Clone)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds (Zoom issues one-hour tokens).
    pub expires_in: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl std::fmt::Debug for OAuthTokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Response payload for `GET /users`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListUsersResponse {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub users: Vec<UserSummary>,
}

impl Page for ListUsersResponse {
    type Item = UserSummary;

    fn next_page_token(&self) -> Option<&str> {
        self.pagination.next_page_token()
    }

    fn into_items(self) -> Vec<UserSummary> {
        self.users
    }
}

/// Single user entry inside [`ListUsersResponse`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UserSummary {
    pub custom_attributes: Vec<CustomAttribute>,
    pub dept: String,
    pub display_name: String,
    pub email: String,
    pub employee_unique_id: String,
    pub first_name: String,
    pub group_ids: Vec<String>,
    pub id: String,
    pub im_group_ids: Vec<String>,
    pub last_client_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_time: Option<DateTime<Utc>>,
    pub last_name: String,
    pub plan_united_type: String,
    /// Personal meeting ID.
    pub pmi: i64,
    pub role_id: String,
    pub status: String,
    pub timezone: String,
    #[serde(rename = "type")]
    pub user_type: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_created_at: Option<DateTime<Utc>>,
    /// 1 when the user's email has been verified.
    pub verified: i32,
}

/// Entry of [`UserSummary::custom_attributes`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CustomAttribute {
    pub key: String,
    pub name: String,
    pub value: String,
}

/// Response payload for `POST /users` (201 Created).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreateUserResponse {
    pub email: String,
    pub first_name: String,
    pub id: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub user_type: i32,
}

// ---------------------------------------------------------------------------
// Meetings
// ---------------------------------------------------------------------------

/// Response payload for `GET /users/{userId}/meetings`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ListMeetingsResponse {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub meetings: Vec<MeetingSummary>,
}

impl Page for ListMeetingsResponse {
    type Item = MeetingSummary;

    fn next_page_token(&self) -> Option<&str> {
        self.pagination.next_page_token()
    }

    fn into_items(self) -> Vec<MeetingSummary> {
        self.meetings
    }
}

/// Single meeting entry inside [`ListMeetingsResponse`].
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MeetingSummary {
    pub agenda: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Minutes.
    pub duration: i32,
    pub host_id: String,
    /// Meeting number. Exceeds 32 bits for most accounts.
    pub id: i64,
    pub join_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    pub timezone: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub meeting_type: i32,
    /// Instance UUID; changes every time a recurring meeting starts.
    pub uuid: String,
}

/// Response payload for `POST /users/{userId}/meetings` (201 Created).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CreateMeetingResponse {
    pub id: i64,
    pub uuid: String,
    pub host_id: String,
    pub host_email: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub meeting_type: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    pub duration: i32,
    pub timezone: String,
    pub agenda: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Host-only link; carries a ZAK and expires after two hours.
    pub start_url: String,
    pub join_url: String,
    pub password: String,
    pub h323_password: String,
    pub pstn_password: String,
    pub encrypted_password: String,
    pub pre_schedule: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_users_reads_pagination_and_items() {
        let body = serde_json::json!({
            "next_page_token": "tok",
            "page_count": 2,
            "page_size": 1,
            "total_records": 2,
            "users": [{
                "id": "id1",
                "email": "user1@example.com",
                "role_id": "foo",
                "type": 2,
                "last_login_time": "2024-01-02T03:04:05Z",
                "custom_attributes": [{"key": "k", "name": "n", "value": "v"}]
            }]
        });
        let resp: ListUsersResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.next_page_token(), Some("tok"));
        assert_eq!(resp.pagination.total_records, Some(2));

        let users = resp.into_items();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_type, 2);
        assert_eq!(users[0].custom_attributes[0].value, "v");
        assert!(users[0].last_login_time.is_some());
        assert!(users[0].user_created_at.is_none());
    }

    #[test]
    fn empty_next_page_token_means_last_page() {
        let resp: ListMeetingsResponse =
            serde_json::from_str(r#"{"next_page_token":"","meetings":[]}"#).unwrap();
        assert_eq!(resp.next_page_token(), None);
    }

    #[test]
    fn meeting_ids_keep_64_bits() {
        let resp: ListMeetingsResponse = serde_json::from_str(
            r#"{"meetings":[{"id":85746065432,"type":2,"join_url":"https://zoom.us/j/85746065432"}]}"#,
        )
        .unwrap();
        assert_eq!(resp.meetings[0].id, 85_746_065_432);
        assert_eq!(resp.meetings[0].meeting_type, 2);
    }

    #[test]
    fn create_meeting_response_tolerates_missing_fields() {
        let resp: CreateMeetingResponse =
            serde_json::from_str(r#"{"id":1,"password":"xyz","type":2}"#).unwrap();
        assert_eq!(resp.id, 1);
        assert_eq!(resp.password, "xyz");
        assert!(resp.start_time.is_none());
        assert!(!resp.pre_schedule);
    }

    #[test]
    fn oauth_response_debug_redacts_token() {
        let resp: OAuthTokenResponse = serde_json::from_str(
            r#"{"access_token":"very-secret","token_type":"bearer","expires_in":3599,"scope":"user:read:admin"}"#,
        )
        .unwrap();
        let debug = format!("{resp:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("very-secret"));
        assert_eq!(resp.expires_in, 3599);
    }
}

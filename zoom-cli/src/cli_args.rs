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

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use zoom_client::zoom_types::requests::{
    CreateMeetingRequest, CreateUserRequest, DeleteMeetingQuery, DeleteUserQuery,
    ListMeetingsQuery, ListUsersQuery, MeetingSettings, PaginationQuery, UserInfo,
};
use zoom_client::zoom_types::SdkRole;

/// Zoom CLI
///
/// Calls the Zoom REST API with Server-to-Server OAuth credentials taken from
/// ZOOM_ACCOUNT_ID, ZOOM_CLIENT_ID and ZOOM_CLIENT_SECRET. Results are printed
/// as JSON on stdout; logs go to stderr (tune with RUST_LOG).
#[derive(Parser, Debug)]
#[clap(name = "zoom-cli")]
pub struct Opt {
    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// List, create and delete users on the account.
    #[clap(subcommand)]
    Users(UsersCommand),

    /// List, create and delete a user's meetings.
    #[clap(subcommand)]
    Meetings(MeetingsCommand),

    /// Sign a Meeting SDK JWT using ZOOM_SDK_KEY and ZOOM_SDK_SECRET.
    SdkToken(SdkToken),
}

#[derive(Args, Debug, Clone)]
pub struct Paging {
    /// Records per page (Zoom allows at most 300).
    #[clap(long = "page-size", value_parser = clap::value_parser!(i64).range(1..=300))]
    pub page_size: Option<i64>,

    /// Resume from a previous page's `next_page_token`.
    #[clap(long = "next-page-token")]
    pub next_page_token: Option<String>,

    /// Follow `next_page_token` until every page has been fetched.
    #[clap(long = "all")]
    pub all: bool,
}

impl Paging {
    fn to_query(&self) -> PaginationQuery {
        PaginationQuery {
            next_page_token: self.next_page_token.clone(),
            page_number: None,
            page_size: self.page_size,
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users (`GET /users`).
    List(ListUsers),

    /// Create a user (`POST /users`).
    Create(CreateUser),

    /// Delete or disassociate a user (`DELETE /users/{userId}`).
    Delete(DeleteUser),
}

#[derive(Args, Debug, Clone)]
pub struct ListUsers {
    /// active, inactive or pending.
    #[clap(long = "status")]
    pub status: Option<String>,

    #[clap(long = "role-id")]
    pub role_id: Option<String>,

    /// e.g. custom_attributes or host_key.
    #[clap(long = "include-fields")]
    pub include_fields: Option<String>,

    #[clap(flatten)]
    pub paging: Paging,
}

impl ListUsers {
    pub fn to_query(&self) -> ListUsersQuery {
        ListUsersQuery {
            pagination: self.paging.to_query(),
            include_fields: self.include_fields.clone(),
            role_id: self.role_id.clone(),
            status: self.status.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateUser {
    #[clap(long = "email")]
    pub email: String,

    /// 1 = basic, 2 = licensed, 4 = unassigned without Meetings Basic, 99 = none.
    #[clap(long = "type", default_value = "1")]
    pub user_type: i32,

    #[clap(
        long = "action",
        default_value = "create",
        value_parser = ["create", "autoCreate", "custCreate", "ssoCreate"]
    )]
    pub action: String,

    #[clap(long = "first-name")]
    pub first_name: Option<String>,

    #[clap(long = "last-name")]
    pub last_name: Option<String>,

    #[clap(long = "display-name")]
    pub display_name: Option<String>,

    /// Only used with `--action autoCreate`.
    #[clap(long = "password")]
    pub password: Option<String>,
}

impl CreateUser {
    pub fn to_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            action: self.action.clone(),
            user_info: UserInfo {
                email: self.email.clone(),
                user_type: self.user_type,
                display_name: self.display_name.clone(),
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                password: self.password.clone(),
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeleteUser {
    /// User ID or email address.
    pub user_id: String,

    #[clap(long = "action", value_parser = ["disassociate", "delete"])]
    pub action: Option<String>,

    /// Hand the user's meetings and recordings to this user.
    #[clap(long = "transfer-email")]
    pub transfer_email: Option<String>,

    #[clap(long = "transfer-meeting")]
    pub transfer_meeting: bool,

    #[clap(long = "transfer-recording")]
    pub transfer_recording: bool,

    /// `user_id` is an encrypted email address.
    #[clap(long = "encrypted-email")]
    pub encrypted_email: bool,
}

impl DeleteUser {
    pub fn to_query(&self) -> DeleteUserQuery {
        DeleteUserQuery {
            action: self.action.clone(),
            encrypted_email: self.encrypted_email.then_some(true),
            transfer_email: self.transfer_email.clone(),
            transfer_meeting: self.transfer_meeting.then_some(true),
            transfer_recording: self.transfer_recording.then_some(true),
        }
    }
}

// ── Meetings ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum MeetingsCommand {
    /// List a user's meetings (`GET /users/{userId}/meetings`).
    List(ListMeetings),

    /// Schedule a meeting (`POST /users/{userId}/meetings`).
    Create(CreateMeeting),

    /// Delete a meeting or one occurrence (`DELETE /meetings/{meetingId}`).
    Delete(DeleteMeeting),
}

#[derive(Args, Debug, Clone)]
pub struct ListMeetings {
    /// User ID or email; `me` for the app's own user.
    #[clap(default_value = "me")]
    pub user_id: String,

    /// scheduled, live, upcoming, upcoming_meetings or previous_meetings.
    #[clap(long = "type")]
    pub meeting_type: Option<String>,

    /// yyyy-mm-dd, with `--type previous_meetings`.
    #[clap(long = "from")]
    pub from: Option<String>,

    #[clap(long = "to")]
    pub to: Option<String>,

    #[clap(long = "timezone")]
    pub timezone: Option<String>,

    #[clap(flatten)]
    pub paging: Paging,
}

impl ListMeetings {
    pub fn to_query(&self) -> ListMeetingsQuery {
        ListMeetingsQuery {
            pagination: self.paging.to_query(),
            meeting_type: self.meeting_type.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            timezone: self.timezone.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CreateMeeting {
    #[clap(default_value = "me")]
    pub user_id: String,

    #[clap(long = "topic")]
    pub topic: Option<String>,

    /// 1 = instant, 2 = scheduled, 3 = recurring without fixed time, 8 = recurring.
    #[clap(long = "type", default_value = "2")]
    pub meeting_type: i32,

    /// RFC 3339 start time, e.g. 2026-03-01T15:00:00Z.
    #[clap(long = "start-time")]
    pub start_time: Option<DateTime<Utc>>,

    /// Length in minutes.
    #[clap(long = "duration")]
    pub duration: Option<i32>,

    #[clap(long = "timezone")]
    pub timezone: Option<String>,

    #[clap(long = "agenda")]
    pub agenda: Option<String>,

    #[clap(long = "password")]
    pub password: Option<String>,

    #[clap(long = "waiting-room")]
    pub waiting_room: bool,

    #[clap(long = "join-before-host")]
    pub join_before_host: bool,

    #[clap(long = "auto-recording", value_parser = ["local", "cloud", "none"])]
    pub auto_recording: Option<String>,
}

impl CreateMeeting {
    pub fn to_request(&self) -> CreateMeetingRequest {
        let settings = MeetingSettings {
            waiting_room: self.waiting_room.then_some(true),
            join_before_host: self.join_before_host.then_some(true),
            auto_recording: self.auto_recording.clone(),
            ..Default::default()
        };
        CreateMeetingRequest {
            agenda: self.agenda.clone(),
            duration: self.duration,
            password: self.password.clone(),
            settings: (settings != MeetingSettings::default()).then_some(settings),
            start_time: self.start_time,
            timezone: self.timezone.clone(),
            topic: self.topic.clone(),
            meeting_type: Some(self.meeting_type),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeleteMeeting {
    pub meeting_id: i64,

    #[clap(long = "occurrence-id")]
    pub occurrence_id: Option<String>,

    #[clap(long = "schedule-for-reminder")]
    pub schedule_for_reminder: bool,

    #[clap(long = "cancel-meeting-reminder")]
    pub cancel_meeting_reminder: bool,
}

impl DeleteMeeting {
    pub fn to_query(&self) -> DeleteMeetingQuery {
        DeleteMeetingQuery {
            occurrence_id: self.occurrence_id.clone(),
            schedule_for_reminder: self.schedule_for_reminder.then_some(true),
            cancel_meeting_reminder: self.cancel_meeting_reminder.then_some(true),
        }
    }
}

// ── SDK ──────────────────────────────────────────────────────────────────

#[derive(Args, Debug, Clone)]
pub struct SdkToken {
    #[clap(long = "meeting-number")]
    pub meeting_number: i64,

    /// host (1) or participant (0).
    #[clap(long = "role", default_value = "participant")]
    pub role: SdkRole,

    /// Signature lifetime in seconds, between 1800 and 172800.
    #[clap(long = "expiration-secs", default_value = "7200")]
    pub expiration_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse(args: &[&str]) -> Mode {
        let mut argv = vec!["zoom-cli"];
        argv.extend_from_slice(args);
        Opt::try_parse_from(argv).expect("should parse").mode
    }

    #[test]
    fn users_list_maps_filters() {
        let Mode::Users(UsersCommand::List(list)) =
            parse(&["users", "list", "--role-id", "foo", "--page-size", "300"])
        else {
            panic!("expected users list");
        };
        let query = list.to_query();
        assert_eq!(query.role_id.as_deref(), Some("foo"));
        assert_eq!(query.pagination.page_size, Some(300));
        assert!(query.status.is_none());
        assert!(!list.paging.all);
    }

    #[test]
    fn page_size_is_bounded() {
        let result = Opt::try_parse_from(["zoom-cli", "users", "list", "--page-size", "301"]);
        assert!(result.is_err());
    }

    #[test]
    fn users_create_defaults() {
        let Mode::Users(UsersCommand::Create(create)) =
            parse(&["users", "create", "--email", "a@example.com"])
        else {
            panic!("expected users create");
        };
        let request = create.to_request();
        assert_eq!(request.action, "create");
        assert_eq!(request.user_info.user_type, 1);
        assert_eq!(request.user_info.email, "a@example.com");
    }

    #[test]
    fn users_delete_flags_become_query() {
        let Mode::Users(UsersCommand::Delete(delete)) = parse(&[
            "users",
            "delete",
            "id1",
            "--action",
            "delete",
            "--transfer-meeting",
        ]) else {
            panic!("expected users delete");
        };
        assert_eq!(delete.user_id, "id1");
        let query = delete.to_query();
        assert_eq!(query.action.as_deref(), Some("delete"));
        assert_eq!(query.transfer_meeting, Some(true));
        assert_eq!(query.transfer_recording, None);
    }

    #[test]
    fn meetings_list_defaults_to_me() {
        let Mode::Meetings(MeetingsCommand::List(list)) =
            parse(&["meetings", "list", "--type", "upcoming"])
        else {
            panic!("expected meetings list");
        };
        assert_eq!(list.user_id, "me");
        assert_eq!(list.to_query().meeting_type.as_deref(), Some("upcoming"));
    }

    #[test]
    fn meetings_create_builds_request() {
        let Mode::Meetings(MeetingsCommand::Create(create)) = parse(&[
            "meetings",
            "create",
            "user@example.com",
            "--topic",
            "Planning",
            "--start-time",
            "2026-03-01T15:00:00Z",
            "--waiting-room",
        ]) else {
            panic!("expected meetings create");
        };
        let request = create.to_request();
        assert_eq!(create.user_id, "user@example.com");
        assert_eq!(request.topic.as_deref(), Some("Planning"));
        assert_eq!(request.meeting_type, Some(2));
        assert_eq!(
            request.start_time,
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).unwrap())
        );
        assert_eq!(request.settings.unwrap().waiting_room, Some(true));
    }

    #[test]
    fn meetings_create_omits_empty_settings() {
        let Mode::Meetings(MeetingsCommand::Create(create)) = parse(&["meetings", "create"]) else {
            panic!("expected meetings create");
        };
        assert!(create.to_request().settings.is_none());
    }

    #[test]
    fn sdk_token_parses_role() {
        let Mode::SdkToken(sdk) = parse(&["sdk-token", "--meeting-number", "123", "--role", "host"])
        else {
            panic!("expected sdk-token");
        };
        assert_eq!(sdk.meeting_number, 123);
        assert_eq!(sdk.role, SdkRole::Host);
        assert_eq!(sdk.expiration_secs, 7200);
    }
}

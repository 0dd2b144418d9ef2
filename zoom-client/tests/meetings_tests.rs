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

//! Integration tests for the meetings endpoints.


use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use test_helpers::*;
use wiremock::matchers::{
    body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zoom_client::zoom_types::requests::{
    CreateMeetingRequest, DeleteMeetingQuery, ListMeetingsQuery, MeetingSettings,
};
use zoom_client::{MeetingsApi, ZoomError};

fn meeting_json(id: i64, topic: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "uuid": format!("uuid-{id}"),
        "host_id": "userID123",
        "topic": topic,
        "type": 2,
        "start_time": "2026-03-01T15:00:00Z",
        "duration": 30,
        "timezone": "America/New_York",
        "join_url": format!("https://zoom.us/j/{id}")
    })
}

// ── List ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_meetings_for_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users/userID123/meetings"))
        .and(query_param("type", "2"))
        .and(header("authorization", seeded_bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "page_size": 30,
            "total_records": 2,
            "next_page_token": "",
            "meetings": [meeting_json(1, "Standup"), meeting_json(2, "Retro")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let query = ListMeetingsQuery {
        meeting_type: Some("2".to_string()),
        ..Default::default()
    };
    let resp = client.meetings().list("userID123", &query).await.unwrap();

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.data.meetings.len(), 2);
    assert_eq!(resp.data.meetings[0].id, 1);
    assert_eq!(resp.data.meetings[0].topic, "Standup");
    assert_eq!(resp.data.meetings[1].id, 2);
    assert_eq!(
        received_query(&server, "/v2/users/userID123/meetings")
            .await
            .as_deref(),
        Some("type=2")
    );
}

#[tokio::test]
async fn test_list_all_meetings_collects_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/users/me/meetings"))
        .and(query_param_is_missing("next_page_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "next_page_token": "cursor-1",
            "meetings": [meeting_json(10, "First")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/users/me/meetings"))
        .and(query_param("next_page_token", "cursor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meetings": [meeting_json(11, "Second"), meeting_json(12, "Third")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let meetings = client
        .meetings()
        .list_all("me", ListMeetingsQuery::default())
        .await
        .unwrap();

    let ids: Vec<i64> = meetings.iter().map(|m| m.id).collect();
    assert_eq!(ids, [10, 11, 12]);
}

// ── Create ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_meeting_sends_zoom_time_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/users/userID123/meetings"))
        .and(header("authorization", seeded_bearer().as_str()))
        .and(body_partial_json(serde_json::json!({
            "topic": "Planning",
            "type": 2,
            "duration": 45,
            "start_time": "2026-03-01T15:00:00Z",
            "settings": {"waiting_room": true}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 85746065432_i64,
            "uuid": "aDYlohsHRtCd4ii1uC2+hA==",
            "host_id": "userID123",
            "host_email": "host@example.com",
            "topic": "Planning",
            "type": 2,
            "status": "waiting",
            "start_time": "2026-03-01T15:00:00Z",
            "duration": 45,
            "timezone": "UTC",
            "created_at": "2026-02-20T10:00:00Z",
            "start_url": "https://zoom.us/s/85746065432?zak=abc",
            "join_url": "https://zoom.us/j/85746065432?pwd=xyz",
            "password": "123456"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let request = CreateMeetingRequest {
        topic: Some("Planning".to_string()),
        meeting_type: Some(2),
        duration: Some(45),
        start_time: Some(Utc.with_ymd_and_hms(2026, 3, 1, 15, 0, 0).unwrap()),
        settings: Some(MeetingSettings {
            waiting_room: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let resp = client
        .meetings()
        .create("userID123", &request)
        .await
        .unwrap();

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.data.id, 85746065432);
    assert_eq!(resp.data.topic, "Planning");
    assert_eq!(resp.data.password, "123456");
    assert!(resp.data.join_url.starts_with("https://zoom.us/j/"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("agenda").is_none(), "unset fields are omitted");
}

#[tokio::test]
async fn test_create_meeting_for_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/users/ghost/meetings"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "code": 1001,
            "message": "User does not exist: ghost."
        })))
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let err = client
        .meetings()
        .create("ghost", &CreateMeetingRequest::default())
        .await
        .unwrap_err();

    match err {
        ZoomError::Status { status, error, .. } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(error.unwrap().code, 1001);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── Delete ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_meeting() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/meetings/1"))
        .and(header("authorization", seeded_bearer().as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let resp = client
        .meetings()
        .delete(1, &DeleteMeetingQuery::default())
        .await
        .unwrap();

    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(received_query(&server, "/v2/meetings/1").await, None);
}

#[tokio::test]
async fn test_delete_meeting_occurrence() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/meetings/42"))
        .and(query_param("occurrence_id", "1648194360000"))
        .and(query_param("cancel_meeting_reminder", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let query = DeleteMeetingQuery {
        occurrence_id: Some("1648194360000".to_string()),
        cancel_meeting_reminder: Some(true),
        ..Default::default()
    };
    let resp = client.meetings().delete(42, &query).await.unwrap();

    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_meeting_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/meetings/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = seeded_client(&server).await;
    let resp = client
        .meetings()
        .delete(7, &DeleteMeetingQuery::default())
        .await
        .unwrap();

    assert_eq!(resp.status, StatusCode::OK);
}

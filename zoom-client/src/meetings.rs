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

//! Meeting endpoints: list, create, delete.

use async_trait::async_trait;
use zoom_types::{
    requests::{CreateMeetingRequest, DeleteMeetingQuery, ListMeetingsQuery},
    responses::{CreateMeetingResponse, ListMeetingsResponse, MeetingSummary},
};

use crate::error::ZoomError;
use crate::{collect_pages, encode_segment, Response, ZoomClient};

/// Meeting operations, as a trait so callers can substitute a fake.
#[async_trait]
pub trait MeetingsApi: Send + Sync {
    /// List a user's meetings.
    ///
    /// Calls `GET /users/{user_id}/meetings`. Use `"me"` for the token's own user.
    async fn list(
        &self,
        user_id: &str,
        query: &ListMeetingsQuery,
    ) -> Result<Response<ListMeetingsResponse>, ZoomError>;

    /// Schedule a meeting for a user.
    ///
    /// Calls `POST /users/{user_id}/meetings`.
    async fn create(
        &self,
        user_id: &str,
        request: &CreateMeetingRequest,
    ) -> Result<Response<CreateMeetingResponse>, ZoomError>;

    /// Delete a meeting, or one occurrence of it.
    ///
    /// Calls `DELETE /meetings/{meeting_id}`.
    async fn delete(
        &self,
        meeting_id: i64,
        query: &DeleteMeetingQuery,
    ) -> Result<Response<()>, ZoomError>;
}

/// [`MeetingsApi`] backed by a [`ZoomClient`].
#[derive(Debug, Clone)]
pub struct MeetingsService {
    client: ZoomClient,
}

impl MeetingsService {
    pub fn new(client: ZoomClient) -> Self {
        Self { client }
    }

    /// List every meeting of `user_id` matching `query`, across all pages.
    pub async fn list_all(
        &self,
        user_id: &str,
        query: ListMeetingsQuery,
    ) -> Result<Vec<MeetingSummary>, ZoomError> {
        collect_pages(query, |q| async move {
            self.list(user_id, &q).await.map(Response::into_data)
        })
        .await
    }
}

fn user_meetings_path(user_id: &str) -> Result<String, ZoomError> {
    if user_id.is_empty() {
        return Err(ZoomError::Config("user_id must not be empty".to_string()));
    }
    Ok(format!("/users/{}/meetings", encode_segment(user_id)))
}

#[async_trait]
impl MeetingsApi for MeetingsService {
    async fn list(
        &self,
        user_id: &str,
        query: &ListMeetingsQuery,
    ) -> Result<Response<ListMeetingsResponse>, ZoomError> {
        let path = user_meetings_path(user_id)?;
        self.client.get(&path, query).await
    }

    async fn create(
        &self,
        user_id: &str,
        request: &CreateMeetingRequest,
    ) -> Result<Response<CreateMeetingResponse>, ZoomError> {
        let path = user_meetings_path(user_id)?;
        self.client.post(&path, request).await
    }

    async fn delete(
        &self,
        meeting_id: i64,
        query: &DeleteMeetingQuery,
    ) -> Result<Response<()>, ZoomError> {
        let path = format!("/meetings/{meeting_id}");
        self.client.delete(&path, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meetings_path_encodes_user() {
        assert_eq!(
            user_meetings_path("user@example.com").unwrap(),
            "/users/user%40example.com/meetings"
        );
        assert_eq!(user_meetings_path("me").unwrap(), "/users/me/meetings");
    }

    #[test]
    fn meetings_path_rejects_empty_user() {
        assert!(matches!(
            user_meetings_path(""),
            Err(ZoomError::Config(_))
        ));
    }
}

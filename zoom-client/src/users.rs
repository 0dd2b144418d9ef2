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

//! User endpoints: list, create, delete.

use async_trait::async_trait;
use zoom_types::{
    requests::{CreateUserRequest, DeleteUserQuery, ListUsersQuery},
    responses::{CreateUserResponse, ListUsersResponse, UserSummary},
};

use crate::error::ZoomError;
use crate::{collect_pages, encode_segment, Response, ZoomClient};

/// User operations, as a trait so callers can substitute a fake.
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// List users on the account.
    ///
    /// Calls `GET /users`.
    async fn list(&self, query: &ListUsersQuery)
        -> Result<Response<ListUsersResponse>, ZoomError>;

    /// Create a user.
    ///
    /// Calls `POST /users`.
    async fn create(
        &self,
        request: &CreateUserRequest,
    ) -> Result<Response<CreateUserResponse>, ZoomError>;

    /// Disassociate or permanently delete a user.
    ///
    /// Calls `DELETE /users/{user_id}`. `user_id` may be an ID or an email.
    async fn delete(&self, user_id: &str, query: &DeleteUserQuery)
        -> Result<Response<()>, ZoomError>;
}

/// [`UsersApi`] backed by a [`ZoomClient`].
#[derive(Debug, Clone)]
pub struct UsersService {
    client: ZoomClient,
}

impl UsersService {
    pub fn new(client: ZoomClient) -> Self {
        Self { client }
    }

    /// List every user matching `query`, following `next_page_token`
    /// until the last page.
    pub async fn list_all(&self, query: ListUsersQuery) -> Result<Vec<UserSummary>, ZoomError> {
        collect_pages(query, |q| async move {
            self.list(&q).await.map(Response::into_data)
        })
        .await
    }
}

#[async_trait]
impl UsersApi for UsersService {
    async fn list(
        &self,
        query: &ListUsersQuery,
    ) -> Result<Response<ListUsersResponse>, ZoomError> {
        self.client.get("/users", query).await
    }

    async fn create(
        &self,
        request: &CreateUserRequest,
    ) -> Result<Response<CreateUserResponse>, ZoomError> {
        self.client.post("/users", request).await
    }

    async fn delete(
        &self,
        user_id: &str,
        query: &DeleteUserQuery,
    ) -> Result<Response<()>, ZoomError> {
        if user_id.is_empty() {
            return Err(ZoomError::Config("user_id must not be empty".to_string()));
        }
        let path = format!("/users/{}", encode_segment(user_id));
        self.client.delete(&path, query).await
    }
}

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

//! REST client for the Zoom API v2.
//!
//! Authenticates with Server-to-Server OAuth, caches the access token per
//! credential set, and exposes typed operations per resource.
//!
//! # Example
//!
//! ```no_run
//! use zoom_client::{UsersApi, ZoomClient};
//! use zoom_client::zoom_types::requests::ListUsersQuery;
//!
//! # async fn example() -> Result<(), zoom_client::ZoomError> {
//! let client = ZoomClient::new("account-id", "client-id", "client-secret")?;
//!
//! let users = client
//!     .users()
//!     .list(&ListUsersQuery {
//!         status: Some("active".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! for user in users.data.users {
//!     println!("{} <{}>", user.display_name, user.email);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod meetings;
#[cfg(feature = "redis")]
pub mod redis_cache;
pub mod sdk;
pub mod token_cache;
pub mod users;

pub use config::{SdkCredentials, ZoomConfig};
pub use error::ZoomError;
pub use meetings::{MeetingsApi, MeetingsService};
#[cfg(feature = "redis")]
pub use redis_cache::RedisTokenCache;
pub use reqwest::StatusCode;
pub use sdk::meeting_sdk_jwt;
pub use secrecy;
pub use token_cache::{InMemoryTokenCache, TokenCache};
pub use users::{UsersApi, UsersService};
pub use zoom_types;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock, PoisonError};
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use zoom_types::{Page, PageRequest, ZoomErrorBody};

/// Default Zoom API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.zoom.us/v2";

/// Default per-request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A decoded response together with its HTTP status.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: StatusCode,
    pub data: T,
}

impl<T> Response<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// A typed REST client for the Zoom API.
///
/// Cheap to clone; clones share the HTTP connection pool, the token cache
/// and the refresh lock.
#[derive(Clone)]
pub struct ZoomClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    account_id: String,
    client_id: String,
    client_secret: SecretString,
    cache: Arc<dyn TokenCache>,
    cache_key: String,
    refresh: Arc<tokio::sync::Mutex<()>>,
}

impl std::fmt::Debug for ZoomClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomClient")
            .field("base_url", &self.inner.base_url)
            .field("token_url", &self.inner.token_url)
            .field("account_id", &self.inner.account_id)
            .field("client_id", &self.inner.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

/// Builder for [`ZoomClient`].
pub struct ZoomClientBuilder {
    account_id: String,
    client_id: String,
    client_secret: SecretString,
    base_url: String,
    token_url: String,
    timeout: Duration,
    http: Option<reqwest::Client>,
    cache: Option<Arc<dyn TokenCache>>,
}

impl ZoomClientBuilder {
    /// Override the API base URL (e.g. a mock server in tests).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the OAuth token endpoint.
    pub fn token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Per-request timeout. Ignored when a custom HTTP client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Token storage. Defaults to [`InMemoryTokenCache::shared`].
    pub fn token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<ZoomClient, ZoomError> {
        for (name, value) in [
            ("account_id", &self.account_id),
            ("client_id", &self.client_id),
        ] {
            if value.trim().is_empty() {
                return Err(ZoomError::Config(format!("{name} must not be empty")));
            }
        }

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| ZoomError::Config(format!("Failed to build HTTP client: {e}")))?,
        };
        let cache = self
            .cache
            .unwrap_or_else(|| InMemoryTokenCache::shared() as Arc<dyn TokenCache>);
        let cache_key = token_cache::cache_key(&self.account_id, &self.client_id);
        let refresh = refresh_lock(&cache_key);

        Ok(ZoomClient {
            inner: Arc::new(Inner {
                http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                token_url: self.token_url,
                account_id: self.account_id,
                client_id: self.client_id,
                client_secret: self.client_secret,
                cache,
                cache_key,
                refresh,
            }),
        })
    }
}

impl ZoomClient {
    /// Create a client for the production API with default settings.
    pub fn new(
        account_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, ZoomError> {
        Self::builder(account_id, client_id, client_secret).build()
    }

    pub fn builder(
        account_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> ZoomClientBuilder {
        ZoomClientBuilder {
            account_id: account_id.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: auth::DEFAULT_TOKEN_URL.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            http: None,
            cache: None,
        }
    }

    /// User management endpoints (`/users`).
    pub fn users(&self) -> UsersService {
        UsersService::new(self.clone())
    }

    /// Meeting endpoints (`/users/{userId}/meetings`, `/meetings/{meetingId}`).
    pub fn meetings(&self) -> MeetingsService {
        MeetingsService::new(self.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Return a valid access token, fetching a new one if the cache has none.
    ///
    /// Refreshes are single-flight per credential set across every client in
    /// the process, and bracketed by the cache's `lock`/`unlock` for
    /// cross-process caches.
    pub async fn access_token(&self) -> Result<SecretString, ZoomError> {
        let inner = &self.inner;
        if let Some(token) = inner.cache.get(&inner.cache_key).await? {
            return Ok(token);
        }

        let _refresh = inner.refresh.lock().await;
        if let Some(token) = inner.cache.get(&inner.cache_key).await? {
            return Ok(token);
        }

        inner.cache.lock(&inner.cache_key).await?;
        let refreshed = self.refresh_locked().await;
        let unlocked = inner.cache.unlock(&inner.cache_key).await;
        let token = refreshed?;
        unlocked?;
        Ok(token)
    }

    async fn refresh_locked(&self) -> Result<SecretString, ZoomError> {
        let inner = &self.inner;
        // Another process may have refreshed while we waited for the lock.
        if let Some(token) = inner.cache.get(&inner.cache_key).await? {
            return Ok(token);
        }

        let fresh = auth::fetch_access_token(
            &inner.http,
            &inner.token_url,
            &inner.account_id,
            &inner.client_id,
            &inner.client_secret,
        )
        .await?;
        inner
            .cache
            .set(&inner.cache_key, fresh.token.clone(), fresh.expires_at)
            .await?;
        Ok(fresh.token)
    }

    pub(crate) async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<Response<T>, ZoomError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let (status, body) = self.send(Method::GET, path, |req| req.query(query)).await?;
        decode_body(status, &body, || format!("decoding GET {path} response"))
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<Response<T>, ZoomError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default,
    {
        let (status, body) = self.send(Method::POST, path, |req| req.json(body)).await?;
        decode_body(status, &body, || format!("decoding POST {path} response"))
    }

    /// Deletes report success through the status alone; any body is ignored.
    pub(crate) async fn delete<Q>(&self, path: &str, query: &Q) -> Result<Response<()>, ZoomError>
    where
        Q: Serialize + ?Sized,
    {
        let (status, _) = self
            .send(Method::DELETE, path, |req| req.query(query))
            .await?;
        Ok(Response { status, data: () })
    }

    /// Shared request path: authenticate, send, check status.
    #[instrument(skip_all, fields(method = %method, path = %path))]
    async fn send<F>(
        &self,
        method: Method,
        path: &str,
        build: F,
    ) -> Result<(StatusCode, Vec<u8>), ZoomError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.inner.base_url, path);

        let request = self
            .inner
            .http
            .request(method.clone(), &url)
            .bearer_auth(token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json");

        let response = build(request)
            .send()
            .await
            .map_err(|e| ZoomError::transport(format!("sending {method} {path}"), e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ZoomError::transport(format!("reading {method} {path} response"), e))?;

        debug!(target: "zoom_client", status = %status, bytes = bytes.len(), "Response received");

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                warn!(target: "zoom_client", "Access token rejected, clearing cached token");
                if let Err(e) = self.inner.cache.clear(&self.inner.cache_key).await {
                    warn!(target: "zoom_client", error = %e, "Failed to clear cached token");
                }
            }
            let body = String::from_utf8_lossy(&bytes).into_owned();
            let error = serde_json::from_slice::<ZoomErrorBody>(&bytes).ok();
            return Err(ZoomError::Status {
                status,
                body,
                error,
            });
        }

        Ok((status, bytes.to_vec()))
    }
}

/// Decode a success body. An empty or `null` body yields `T::default()`.
fn decode_body<T, C>(status: StatusCode, body: &[u8], context: C) -> Result<Response<T>, ZoomError>
where
    T: DeserializeOwned + Default,
    C: FnOnce() -> String,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Response {
            status,
            data: T::default(),
        });
    }
    let data = serde_json::from_slice::<Option<T>>(body)
        .map_err(|e| ZoomError::decode(context(), e))?
        .unwrap_or_default();
    Ok(Response { status, data })
}

/// The refresh lock for one credential set, shared by every client in the process.
fn refresh_lock(cache_key: &str) -> Arc<tokio::sync::Mutex<()>> {
    static LOCKS: OnceLock<std::sync::Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>> =
        OnceLock::new();
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    locks.entry(cache_key.to_string()).or_default().clone()
}

/// Percent-encode a caller-supplied value for use as one path segment.
pub(crate) fn encode_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Fetch every page of a list endpoint, following `next_page_token`.
pub(crate) async fn collect_pages<Q, P, F, Fut>(
    mut query: Q,
    mut fetch: F,
) -> Result<Vec<P::Item>, ZoomError>
where
    Q: PageRequest + Clone,
    P: Page,
    F: FnMut(Q) -> Fut,
    Fut: Future<Output = Result<P, ZoomError>>,
{
    let mut items = Vec::new();
    let mut current: Option<String> = None;

    loop {
        let page = fetch(query.clone()).await?;
        let next = page.next_page_token().map(str::to_owned);
        items.extend(page.into_items());

        match next {
            Some(token) if current.as_deref() == Some(token.as_str()) => {
                warn!(target: "zoom_client", "Server repeated next_page_token, stopping");
                break;
            }
            Some(token) => {
                query.set_next_page_token(Some(token.clone()));
                current = Some(token);
            }
            None => break,
        }
    }

    Ok(items)
}

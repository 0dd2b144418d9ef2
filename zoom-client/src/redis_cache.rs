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

//! Redis-backed [`TokenCache`] for sharing one token between processes.
//!
//! # Key patterns
//!
//! - `{key}` - the access token, stored with a `PX` expiry
//! - `{key}:lock` - refresh lock, `SET NX PX` with a value unique to the holder

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, Script};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::ZoomError;
use crate::token_cache::TokenCache;

/// Added to the HTTP timeout to get the refresh lock's TTL, so a lock never
/// lapses while its holder's token request can still succeed.
pub const LOCK_TTL_MARGIN: Duration = Duration::from_secs(15);

/// Extra time `lock` waits beyond the lock TTL before giving up.
const LOCK_WAIT_MARGIN: Duration = Duration::from_secs(5);

const LOCK_POLL: Duration = Duration::from_millis(100);

/// Delete the lock only if it still holds our value.
///
/// - KEYS[1]: lock key
/// - ARGV[1]: holder value written by `lock`
///
/// Returns 1 if released, 0 if the lock had expired or belongs to another holder.
pub(crate) const RELEASE_LOCK: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
else
    return 0
end
"#;

/// Refresh lock TTL for clients whose requests time out after `http_timeout`.
pub fn lock_ttl_for(http_timeout: Duration) -> Duration {
    http_timeout + LOCK_TTL_MARGIN
}

/// Token cache stored in Redis.
///
/// Cheap to clone; clones share the multiplexed connection and the set of
/// locks this process holds.
#[derive(Clone)]
pub struct RedisTokenCache {
    connection: MultiplexedConnection,
    release_script: Script,
    lock_ttl: Duration,
    held: Arc<Mutex<HashMap<String, String>>>,
}

impl RedisTokenCache {
    /// Connect to Redis at `redis_url` (e.g. `redis://localhost:6379`).
    pub async fn connect(redis_url: &str) -> Result<Self, ZoomError> {
        // Do not log redis_url: it may carry a password.
        let client = Client::open(redis_url)
            .map_err(|e| ZoomError::TokenCache(format!("Failed to open Redis client: {e}")))?;
        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| ZoomError::TokenCache(format!("Failed to connect to Redis: {e}")))?;
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: MultiplexedConnection) -> Self {
        Self {
            connection,
            release_script: Script::new(RELEASE_LOCK),
            lock_ttl: lock_ttl_for(crate::DEFAULT_HTTP_TIMEOUT),
            held: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Override the refresh lock TTL. Use [`lock_ttl_for`] with the client's
    /// HTTP timeout.
    pub fn with_lock_ttl(mut self, lock_ttl: Duration) -> Self {
        self.lock_ttl = lock_ttl;
        self
    }

    pub fn lock_ttl(&self) -> Duration {
        self.lock_ttl
    }
}

impl std::fmt::Debug for RedisTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisTokenCache")
            .field("lock_ttl", &self.lock_ttl)
            .finish_non_exhaustive()
    }
}

fn lock_key(key: &str) -> String {
    format!("{key}:lock")
}

fn holder_value() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Milliseconds until `expires_at`, or `None` if it has already passed.
fn ttl_millis(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<u64> {
    let ms = (expires_at - now).num_milliseconds();
    u64::try_from(ms).ok().filter(|ms| *ms > 0)
}

fn redis_err(action: &str, e: redis::RedisError) -> ZoomError {
    warn!(target: "zoom_client::redis_cache", error = %e, "Failed to {action}");
    ZoomError::TokenCache(format!("Failed to {action}: {e}"))
}

#[async_trait]
impl TokenCache for RedisTokenCache {
    async fn get(&self, key: &str) -> Result<Option<SecretString>, ZoomError> {
        let mut conn = self.connection.clone();
        let token: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| redis_err("read token", e))?;
        Ok(token.map(SecretString::from))
    }

    async fn set(
        &self,
        key: &str,
        token: SecretString,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ZoomError> {
        let Some(ttl) = ttl_millis(expires_at, Utc::now()) else {
            return self.clear(key).await;
        };
        let mut conn = self.connection.clone();
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(token.expose_secret())
            .arg("PX")
            .arg(ttl)
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_err("store token", e))?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), ZoomError> {
        let mut conn = self.connection.clone();
        let _: () = conn
            .del(key)
            .await
            .map_err(|e| redis_err("delete token", e))?;
        Ok(())
    }

    async fn lock(&self, key: &str) -> Result<(), ZoomError> {
        let lock = lock_key(key);
        let value = holder_value();
        let ttl_ms = u64::try_from(self.lock_ttl.as_millis()).unwrap_or(u64::MAX);
        let wait = self.lock_ttl + LOCK_WAIT_MARGIN;
        let deadline = tokio::time::Instant::now() + wait;
        let mut conn = self.connection.clone();

        loop {
            let acquired: Option<String> = redis::cmd("SET")
                .arg(&lock)
                .arg(&value)
                .arg("NX")
                .arg("PX")
                .arg(ttl_ms)
                .query_async(&mut conn)
                .await
                .map_err(|e| redis_err("acquire refresh lock", e))?;

            if acquired.is_some() {
                debug!(target: "zoom_client::redis_cache", "Acquired token refresh lock");
                self.held.lock().await.insert(lock, value);
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(ZoomError::TokenCache(format!(
                    "timed out after {wait:?} waiting for token refresh lock"
                )));
            }
            tokio::time::sleep(LOCK_POLL).await;
        }
    }

    async fn unlock(&self, key: &str) -> Result<(), ZoomError> {
        let lock = lock_key(key);
        let Some(value) = self.held.lock().await.remove(&lock) else {
            debug!(target: "zoom_client::redis_cache", "No refresh lock held, nothing to release");
            return Ok(());
        };

        let mut conn = self.connection.clone();
        let released: i64 = self
            .release_script
            .key(&lock)
            .arg(&value)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| redis_err("release refresh lock", e))?;

        if released == 0 {
            warn!(
                target: "zoom_client::redis_cache",
                "Refresh lock expired before release; another holder may own it"
            );
        }
        Ok(())
    }
}

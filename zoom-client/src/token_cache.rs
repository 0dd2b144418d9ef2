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

//! OAuth access token caches.
//!
//! Zoom hands out one-hour tokens per account/app pair and invalidates older
//! ones only on expiry, so any number of clients with the same credentials can
//! share a single token. A [`TokenCache`] stores it under a key derived from
//! those credentials (see [`cache_key`]).
//!
//! [`InMemoryTokenCache::shared`] is the process-wide default. Implement the
//! trait (or enable the `redis` feature) to share tokens across processes.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::error::ZoomError;

/// Storage for cached access tokens.
///
/// `lock`/`unlock` bracket a token refresh. They default to no-ops because
/// the client already serializes refreshes per credential set within one
/// process; backends shared between processes override them.
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Return the token for `key` if one is stored and not yet expired.
    async fn get(&self, key: &str) -> Result<Option<SecretString>, ZoomError>;

    async fn set(
        &self,
        key: &str,
        token: SecretString,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ZoomError>;

    async fn clear(&self, key: &str) -> Result<(), ZoomError>;

    async fn lock(&self, _key: &str) -> Result<(), ZoomError> {
        Ok(())
    }

    async fn unlock(&self, _key: &str) -> Result<(), ZoomError> {
        Ok(())
    }
}

/// Cache key for one set of Server-to-Server OAuth credentials.
pub fn cache_key(account_id: &str, client_id: &str) -> String {
    format!("zoom:token:{account_id}:{client_id}")
}

#[derive(Clone)]
struct CachedToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

/// Mutex-guarded in-process token map.
#[derive(Default)]
pub struct InMemoryTokenCache {
    tokens: Mutex<HashMap<String, CachedToken>>,
}

impl InMemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache every client uses unless told otherwise.
    pub fn shared() -> Arc<InMemoryTokenCache> {
        static SHARED: OnceLock<Arc<InMemoryTokenCache>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(InMemoryTokenCache::new()))
            .clone()
    }
}

impl std::fmt::Debug for InMemoryTokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTokenCache").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCache for InMemoryTokenCache {
    async fn get(&self, key: &str) -> Result<Option<SecretString>, ZoomError> {
        let mut tokens = self.tokens.lock().await;
        match tokens.get(key) {
            Some(cached) if cached.expires_at > Utc::now() => Ok(Some(cached.token.clone())),
            Some(_) => {
                tokens.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        token: SecretString,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ZoomError> {
        self.tokens
            .lock()
            .await
            .insert(key.to_string(), CachedToken { token, expires_at });
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), ZoomError> {
        self.tokens.lock().await.remove(key);
        Ok(())
    }
}

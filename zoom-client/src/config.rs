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

//! Client configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ZoomError;
use crate::{ZoomClient, ZoomClientBuilder};

/// Server-to-Server OAuth app settings plus optional Meeting SDK credentials.
#[derive(Debug, Clone)]
pub struct ZoomConfig {
    pub account_id: String,
    pub client_id: String,
    pub client_secret: SecretString,
    /// API base URL (default: `https://api.zoom.us/v2`).
    pub base_url: String,
    /// OAuth token endpoint (default: `https://zoom.us/oauth/token`).
    pub token_url: String,
    /// Per-request timeout (default: 30 seconds).
    pub http_timeout: Duration,
    /// Meeting SDK credentials. `None` if `ZOOM_SDK_KEY` is unset or empty.
    pub sdk: Option<SdkCredentials>,
    /// Redis URL for a shared token cache. Only honoured with the `redis` feature.
    pub redis_url: Option<String>,
}

/// Meeting SDK app key and secret.
#[derive(Debug, Clone)]
pub struct SdkCredentials {
    pub key: String,
    pub secret: SecretString,
}

impl SdkCredentials {
    /// Read `ZOOM_SDK_KEY` and `ZOOM_SDK_SECRET` without requiring the OAuth variables.
    pub fn from_env() -> Result<Option<Self>, ZoomError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ZoomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let Some(key) = var("ZOOM_SDK_KEY") else {
            return Ok(None);
        };
        let secret = var("ZOOM_SDK_SECRET").ok_or_else(|| {
            ZoomError::Config("ZOOM_SDK_SECRET required when ZOOM_SDK_KEY is set".to_string())
        })?;
        Ok(Some(Self {
            key,
            secret: SecretString::from(secret),
        }))
    }
}

impl ZoomConfig {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `ZOOM_ACCOUNT_ID`
    /// - `ZOOM_CLIENT_ID`
    /// - `ZOOM_CLIENT_SECRET`
    ///
    /// # Optional
    /// - `ZOOM_API_BASE_URL` (default: `"https://api.zoom.us/v2"`)
    /// - `ZOOM_OAUTH_TOKEN_URL` (default: `"https://zoom.us/oauth/token"`)
    /// - `ZOOM_HTTP_TIMEOUT_SECS` (default: `"30"`)
    /// - `ZOOM_SDK_KEY`, `ZOOM_SDK_SECRET`
    /// - `ZOOM_REDIS_URL`
    pub fn from_env() -> Result<Self, ZoomError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ZoomError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &str| {
            var(name).ok_or_else(|| {
                ZoomError::Config(format!("{name} environment variable is required"))
            })
        };

        let account_id = required("ZOOM_ACCOUNT_ID")?;
        let client_id = required("ZOOM_CLIENT_ID")?;
        let client_secret = SecretString::from(required("ZOOM_CLIENT_SECRET")?);

        let base_url =
            var("ZOOM_API_BASE_URL").unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());
        let token_url = var("ZOOM_OAUTH_TOKEN_URL")
            .unwrap_or_else(|| crate::auth::DEFAULT_TOKEN_URL.to_string());
        for (name, value) in [("ZOOM_API_BASE_URL", &base_url), ("ZOOM_OAUTH_TOKEN_URL", &token_url)] {
            validate_url(name, value)?;
        }

        let http_timeout = match var("ZOOM_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|_| {
                    ZoomError::Config("ZOOM_HTTP_TIMEOUT_SECS must be a valid integer".to_string())
                })?;
                if secs == 0 {
                    return Err(ZoomError::Config(
                        "ZOOM_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => crate::DEFAULT_HTTP_TIMEOUT,
        };

        let sdk = SdkCredentials::from_lookup(&lookup)?;

        Ok(Self {
            account_id,
            client_id,
            client_secret,
            base_url,
            token_url,
            http_timeout,
            sdk,
            redis_url: var("ZOOM_REDIS_URL"),
        })
    }

    /// Build a [`ZoomClient`] from this configuration.
    ///
    /// With the `redis` feature and `redis_url` set, tokens are cached in
    /// Redis; otherwise in the process-wide in-memory cache.
    pub async fn into_client(self) -> Result<ZoomClient, ZoomError> {
        let builder = ZoomClient::builder(
            self.account_id,
            self.client_id,
            self.client_secret.expose_secret().to_string(),
        )
        .base_url(self.base_url)
        .token_url(self.token_url)
        .timeout(self.http_timeout);

        with_token_cache(builder, self.redis_url.as_deref(), self.http_timeout)
            .await?
            .build()
    }
}

#[cfg(feature = "redis")]
async fn with_token_cache(
    builder: ZoomClientBuilder,
    redis_url: Option<&str>,
    http_timeout: Duration,
) -> Result<ZoomClientBuilder, ZoomError> {
    use crate::redis_cache::{lock_ttl_for, RedisTokenCache};

    match redis_url {
        Some(url) => {
            let cache = RedisTokenCache::connect(url)
                .await?
                .with_lock_ttl(lock_ttl_for(http_timeout));
            Ok(builder.token_cache(std::sync::Arc::new(cache)))
        }
        None => Ok(builder),
    }
}

#[cfg(not(feature = "redis"))]
async fn with_token_cache(
    builder: ZoomClientBuilder,
    redis_url: Option<&str>,
    _http_timeout: Duration,
) -> Result<ZoomClientBuilder, ZoomError> {
    if redis_url.is_some() {
        tracing::warn!(
            "ZOOM_REDIS_URL is set but the redis feature is disabled; using the in-memory token cache"
        );
    }
    Ok(builder)
}

fn validate_url(name: &str, value: &str) -> Result<(), ZoomError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ZoomError::Config(format!("{name} is not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ZoomError::Config(format!(
            "{name} has unsupported scheme '{scheme}'"
        ))),
    }
}

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

//! Server-to-Server OAuth token acquisition.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, trace, warn};
use zoom_types::OAuthTokenResponse;

use crate::error::ZoomError;

/// Default Zoom OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";

/// Tokens are treated as expired this many seconds before Zoom says they are,
/// to absorb clock differences and in-flight latency.
pub const CLOCK_DRIFT_MARGIN_SECS: i64 = 30;

// Zoom issues one-hour tokens; anything longer is treated as a day.
const MAX_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// An access token with the moment it should stop being used.
pub struct AccessToken {
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Request an access token with the `account_credentials` grant.
///
/// Calls `POST {token_url}?grant_type=account_credentials&account_id={account_id}`
/// with HTTP Basic auth `client_id:client_secret`.
#[instrument(skip_all, fields(account_id = %account_id, client_id = %client_id))]
pub async fn fetch_access_token(
    http: &reqwest::Client,
    token_url: &str,
    account_id: &str,
    client_id: &str,
    client_secret: &SecretString,
) -> Result<AccessToken, ZoomError> {
    debug!(target: "zoom_client::auth", url = %token_url, "Requesting access token");

    let response = http
        .post(token_url)
        .query(&[
            ("grant_type", "account_credentials"),
            ("account_id", account_id),
        ])
        .basic_auth(client_id, Some(client_secret.expose_secret()))
        .send()
        .await
        .map_err(|e| ZoomError::transport("requesting access token", e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ZoomError::transport("reading access token response", e))?;

    if !status.is_success() {
        warn!(target: "zoom_client::auth", status = %status, "Token request rejected");
        // The body may echo the credentials' reason; keep it out of normal logs.
        trace!(target: "zoom_client::auth", body = %body, "Token rejection body");
        return Err(ZoomError::TokenRejected { status, body });
    }

    let parsed: OAuthTokenResponse = serde_json::from_str(&body)
        .map_err(|e| ZoomError::decode("decoding access token response", e))?;

    if parsed.access_token.is_empty() {
        return Err(ZoomError::TokenRejected {
            status,
            body: "response carried an empty access_token".to_string(),
        });
    }

    let lifetime = i64::try_from(parsed.expires_in)
        .unwrap_or(MAX_TOKEN_LIFETIME_SECS)
        .min(MAX_TOKEN_LIFETIME_SECS);
    let expires_at =
        Utc::now() + chrono::Duration::seconds((lifetime - CLOCK_DRIFT_MARGIN_SECS).max(0));

    debug!(
        target: "zoom_client::auth",
        expires_in_secs = parsed.expires_in,
        "Access token acquired"
    );

    Ok(AccessToken {
        token: SecretString::from(parsed.access_token),
        expires_at,
    })
}

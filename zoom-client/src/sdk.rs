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

//! Meeting SDK signature generation.
//!
//! The SDK key/secret pair is separate from the Server-to-Server OAuth
//! credentials; the signature is produced locally and never sent to the API.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use zoom_types::{MeetingSdkClaims, SdkRole};

use crate::error::ZoomError;

/// Shortest signature lifetime Zoom accepts.
pub const MIN_SDK_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Longest signature lifetime Zoom accepts.
pub const MAX_SDK_TOKEN_TTL: Duration = Duration::from_secs(48 * 60 * 60);

/// Sign a Meeting SDK JWT (HS256) for `meeting_number`.
///
/// `exp` and `tokenExp` are both `iat + expiration`; `expiration` must lie
/// within [`MIN_SDK_TOKEN_TTL`]..=[`MAX_SDK_TOKEN_TTL`].
pub fn meeting_sdk_jwt(
    sdk_key: &str,
    sdk_secret: &str,
    meeting_number: i64,
    role: SdkRole,
    expiration: Duration,
) -> Result<String, ZoomError> {
    if sdk_key.is_empty() || sdk_secret.is_empty() {
        return Err(ZoomError::Config(
            "SDK key and secret must not be empty".to_string(),
        ));
    }
    if !(MIN_SDK_TOKEN_TTL..=MAX_SDK_TOKEN_TTL).contains(&expiration) {
        return Err(ZoomError::Config(format!(
            "SDK token expiration must be between {}s and {}s, got {}s",
            MIN_SDK_TOKEN_TTL.as_secs(),
            MAX_SDK_TOKEN_TTL.as_secs(),
            expiration.as_secs()
        )));
    }

    let iat = Utc::now().timestamp();
    // Bounded by MAX_SDK_TOKEN_TTL above.
    let exp = iat + expiration.as_secs() as i64;
    let claims = MeetingSdkClaims {
        app_key: sdk_key.to_string(),
        sdk_key: sdk_key.to_string(),
        mn: meeting_number,
        role: role.as_claim(),
        iat,
        exp,
        token_exp: exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(sdk_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to sign Meeting SDK JWT: {e}");
        ZoomError::Jwt(e)
    })?;
    Ok(token)
}

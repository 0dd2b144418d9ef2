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

//! Meeting SDK signature (JWT) claims.
//!
//! The Meeting SDK authenticates with an HS256 JWT signed by the app's SDK
//! secret. Claim names are fixed by Zoom.

use serde::{Deserialize, Serialize};

/// JWT payload for a Meeting SDK signature.
///
/// # Example payload
///
/// ```json
/// {
///   "appKey": "abc123",
///   "sdkKey": "abc123",
///   "mn": 85746065432,
///   "role": 1,
///   "iat": 1707001200,
///   "exp": 1707004800,
///   "tokenExp": 1707004800
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MeetingSdkClaims {
    /// SDK key, under its legacy claim name.
    #[serde(rename = "appKey")]
    pub app_key: String,

    #[serde(rename = "sdkKey")]
    pub sdk_key: String,

    /// Meeting number the signature is valid for.
    pub mn: i64,

    /// See [`SdkRole`].
    pub role: i32,

    /// Issued-at (Unix seconds).
    pub iat: i64,

    /// Signature expiry (Unix seconds).
    pub exp: i64,

    /// Expiry of the SDK session the signature opens (Unix seconds).
    #[serde(rename = "tokenExp")]
    pub token_exp: i64,
}

/// Role the SDK user joins with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkRole {
    Participant,
    Host,
}

impl SdkRole {
    /// The integer Zoom expects in the `role` claim.
    pub fn as_claim(self) -> i32 {
        match self {
            SdkRole::Participant => 0,
            SdkRole::Host => 1,
        }
    }
}

impl std::str::FromStr for SdkRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" | "participant" => Ok(SdkRole::Participant),
            "1" | "host" => Ok(SdkRole::Host),
            other => Err(format!("unknown SDK role '{other}' (expected host or participant)")),
        }
    }
}

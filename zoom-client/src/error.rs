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

//! Error types for the Zoom API client.

use reqwest::StatusCode;
use thiserror::Error;
use zoom_types::ZoomErrorBody;

/// Errors returned by [`ZoomClient`](crate::ZoomClient) and its services.
#[derive(Debug, Error)]
pub enum ZoomError {
    /// The request never produced a response (DNS, TLS, timeout, reset).
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{}", status_message(*status, error.as_ref(), body))]
    Status {
        status: StatusCode,
        body: String,
        /// Zoom's `{ code, message }` body, when the response carried one.
        error: Option<ZoomErrorBody>,
    },

    /// The OAuth endpoint refused the account credentials.
    #[error("token request rejected ({status}): {body}")]
    TokenRejected { status: StatusCode, body: String },

    /// A response body did not match the expected shape.
    #[error("{context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Signing a Meeting SDK JWT failed.
    #[error("JWT signing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The token cache backend failed.
    #[error("Token cache error: {0}")]
    TokenCache(String),

    /// Invalid configuration or argument.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ZoomError {
    /// HTTP status of the failed response, if the error came from one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ZoomError::Status { status, .. } | ZoomError::TokenRejected { status, .. } => {
                Some(*status)
            }
            ZoomError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    pub(crate) fn transport(context: impl Into<String>, source: reqwest::Error) -> Self {
        ZoomError::Transport {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn decode(context: impl Into<String>, source: serde_json::Error) -> Self {
        ZoomError::Decode {
            context: context.into(),
            source,
        }
    }
}

fn status_message(status: StatusCode, error: Option<&ZoomErrorBody>, body: &str) -> String {
    match error {
        Some(err) => format!("received unexpected status {status} ({err})"),
        None if body.is_empty() => format!("received unexpected status {status}"),
        None => format!("received unexpected status {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_vendor_message() {
        let err = ZoomError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"code":1001,"message":"User does not exist."}"#.to_string(),
            error: Some(ZoomErrorBody {
                code: 1001,
                message: "User does not exist.".to_string(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "received unexpected status 404 Not Found (code 1001: User does not exist.)"
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn status_error_falls_back_to_raw_body() {
        let err = ZoomError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
            error: None,
        };
        assert_eq!(
            err.to_string(),
            "received unexpected status 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn config_error_has_no_status() {
        assert_eq!(ZoomError::Config("x".to_string()).status(), None);
    }
}

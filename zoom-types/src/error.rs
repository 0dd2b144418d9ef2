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

//! Vendor error body.

use serde::{Deserialize, Serialize};

/// Error payload Zoom returns alongside a non-2xx status.
///
/// ```json
/// { "code": 1001, "message": "User does not exist: foo@example.com." }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ZoomErrorBody {
    /// Vendor error code (e.g. `1001`, `3001`, `124`).
    pub code: i64,

    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ZoomErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "code {}: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_vendor_error() {
        let body: ZoomErrorBody =
            serde_json::from_str(r#"{"code":3001,"message":"Meeting does not exist: 1."}"#)
                .unwrap();
        assert_eq!(body.code, 3001);
        assert_eq!(body.to_string(), "code 3001: Meeting does not exist: 1.");
    }

    #[test]
    fn message_is_optional() {
        let body: ZoomErrorBody = serde_json::from_str(r#"{"code":124}"#).unwrap();
        assert_eq!(body.code, 124);
        assert!(body.message.is_empty());
    }
}

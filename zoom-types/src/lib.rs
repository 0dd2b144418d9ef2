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

//! Typed payloads for the Zoom REST API v2.
//!
//! This crate mirrors the vendor's JSON schemas for the users and meetings
//! resources, the Server-to-Server OAuth token response, and the claims of
//! a Meeting SDK signature. It has no HTTP dependency; see `zoom-client`
//! for the transport.

pub mod error;
pub mod requests;
pub mod responses;
pub mod token;

pub use error::ZoomErrorBody;
pub use requests::PageRequest;
pub use responses::{OAuthTokenResponse, Page, Pagination};
pub use token::{MeetingSdkClaims, SdkRole};

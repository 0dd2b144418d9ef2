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

use std::time::Duration;

use anyhow::Context;
use serde_json::{json, Value};
use zoom_cli::cli_args::SdkToken;
use zoom_client::secrecy::ExposeSecret;
use zoom_client::{meeting_sdk_jwt, SdkCredentials};

/// Signing is local; no API call and no OAuth credentials are needed.
pub fn run(args: SdkToken) -> anyhow::Result<Value> {
    let creds = SdkCredentials::from_env()?
        .context("ZOOM_SDK_KEY and ZOOM_SDK_SECRET must be set")?;

    let signature = meeting_sdk_jwt(
        &creds.key,
        creds.secret.expose_secret(),
        args.meeting_number,
        args.role,
        Duration::from_secs(args.expiration_secs),
    )?;

    Ok(json!({
        "meeting_number": args.meeting_number,
        "role": args.role.as_claim(),
        "signature": signature,
    }))
}

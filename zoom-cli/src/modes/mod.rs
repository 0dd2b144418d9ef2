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

pub mod meetings;
pub mod sdk_token;
pub mod users;

use anyhow::Context;
use serde_json::{json, Value};
use zoom_client::StatusCode;
use zoom_client::{ZoomClient, ZoomConfig};

async fn client() -> anyhow::Result<ZoomClient> {
    let config = ZoomConfig::from_env().context("loading Zoom configuration")?;
    let client = config
        .into_client()
        .await
        .context("building Zoom client")?;
    Ok(client)
}

fn deleted(resource: &str, id: impl Into<Value>, status: StatusCode) -> Value {
    json!({
        "deleted": resource,
        "id": id.into(),
        "status": status.as_u16(),
    })
}

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

use serde_json::Value;
use tracing::info;
use zoom_cli::cli_args::MeetingsCommand;
use zoom_client::MeetingsApi;

use super::{client, deleted};

pub async fn run(command: MeetingsCommand) -> anyhow::Result<Value> {
    let meetings = client().await?.meetings();

    let output = match command {
        MeetingsCommand::List(args) if args.paging.all => {
            let all = meetings.list_all(&args.user_id, args.to_query()).await?;
            info!("Fetched {} meetings for {}", all.len(), args.user_id);
            serde_json::to_value(all)?
        }
        MeetingsCommand::List(args) => {
            let resp = meetings.list(&args.user_id, &args.to_query()).await?;
            serde_json::to_value(resp.data)?
        }
        MeetingsCommand::Create(args) => {
            let resp = meetings.create(&args.user_id, &args.to_request()).await?;
            info!("Scheduled meeting {}", resp.data.id);
            serde_json::to_value(resp.data)?
        }
        MeetingsCommand::Delete(args) => {
            let resp = meetings
                .delete(args.meeting_id, &args.to_query())
                .await?;
            deleted("meeting", args.meeting_id, resp.status)
        }
    };

    Ok(output)
}

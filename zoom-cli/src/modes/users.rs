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
use zoom_cli::cli_args::UsersCommand;
use zoom_client::UsersApi;

use super::{client, deleted};

pub async fn run(command: UsersCommand) -> anyhow::Result<Value> {
    let users = client().await?.users();

    let output = match command {
        UsersCommand::List(args) if args.paging.all => {
            let all = users.list_all(args.to_query()).await?;
            info!("Fetched {} users", all.len());
            serde_json::to_value(all)?
        }
        UsersCommand::List(args) => {
            let resp = users.list(&args.to_query()).await?;
            serde_json::to_value(resp.data)?
        }
        UsersCommand::Create(args) => {
            let resp = users.create(&args.to_request()).await?;
            info!("Created user {}", resp.data.id);
            serde_json::to_value(resp.data)?
        }
        UsersCommand::Delete(args) => {
            let resp = users.delete(&args.user_id, &args.to_query()).await?;
            deleted("user", args.user_id, resp.status)
        }
    };

    Ok(output)
}

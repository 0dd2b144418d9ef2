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

use clap::Parser;
mod modes;

use tracing::level_filters::LevelFilter;
use zoom_cli::cli_args::{Mode, Opt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON result only.
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_writer(std::io::stderr)
            .finish(),
    )?;

    let opt = Opt::parse();

    let output = match opt.mode {
        Mode::Users(command) => modes::users::run(command).await?,
        Mode::Meetings(command) => modes::meetings::run(command).await?,
        Mode::SdkToken(args) => modes::sdk_token::run(args)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

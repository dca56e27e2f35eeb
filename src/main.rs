mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod error;
mod messages;
mod render;
mod screen_actor;

#[cfg(test)]
mod mock_framework;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use crate::app_system::terminal::{self, LineInput, TerminalPrompt};
use crate::app_system::{setup_tracing, CatalogSystem, Command, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    setup_tracing();

    info!(api_url = %config.api_url, "Starting catalog form");

    let input = LineInput::stdin();
    let system = CatalogSystem::start(&config, Box::new(TerminalPrompt::new(input.clone())))
        .context("failed to start catalog system")?;

    let outcome = match config.command {
        Some(Command::List) => match system.screen_client.mount().await {
            Ok(_) => terminal::print_table(&system.screen_client)
                .await
                .context("failed to render product table"),
            Err(e) => Err(anyhow::Error::new(e).context("failed to load products")),
        },
        None => terminal::run_interactive(&system.screen_client, &input).await,
    };

    if let Err(e) = &outcome {
        error!(error = %e, "Session ended with an error");
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    info!("Catalog form closed");
    outcome
}

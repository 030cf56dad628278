mod cli;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use shorty_core::Shortener;
use shorty_gateway::{App, AppState};
use shorty_generator::{RandomGenerator, RandomGeneratorSettings};
use shorty_shortener::ShortenerService;
use shorty_storage::{InMemoryRepository, SqliteRepository};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();

    shorty_telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = config.storage_backend(),
        code_length = config.code_length,
        "starting shorty"
    );

    anyhow::ensure!(config.per_page > 0, "--per-page must be at least 1");

    let generator = RandomGenerator::new(
        RandomGeneratorSettings::builder()
            .length(config.code_length)
            .build(),
    )?;

    let shortener: Arc<dyn Shortener> = if config.use_sqlite {
        let repository = SqliteRepository::connect(&config.database_path)
            .await
            .with_context(|| {
                format!("opening database {}", config.database_path.display())
            })?;
        Arc::new(ShortenerService::new(repository, generator))
    } else {
        Arc::new(ShortenerService::new(InMemoryRepository::new(), generator))
    };

    let mut state = AppState::new(shortener).with_per_page(config.per_page);
    if let Some(base_url) = config.public_base_url {
        state = state.with_base_url(base_url);
    }

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

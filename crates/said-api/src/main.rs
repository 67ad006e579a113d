//! # said-api — Binary Entry Point
//!
//! Starts the Axum HTTP server. Binds to `PORT` (default 8080); decoder
//! settings come from `SAID_NORMALIZATION` and `SAID_REFERENCE_DATE`.

use said_api::state::{AppConfig, AppState};
use said_core::DecoderConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let decoder_config = DecoderConfig::from_env().map_err(|e| {
        tracing::error!("Decoder configuration invalid: {e}");
        e
    })?;
    tracing::info!(
        normalization = %decoder_config.normalization,
        reference_date = ?decoder_config.reference_date,
        "decoder configured"
    );

    let port = config.port;
    let app = said_api::app(AppState::with_config(config, decoder_config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("said API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

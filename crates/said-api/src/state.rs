//! # Application State
//!
//! Shared state for the Axum application, passed to every handler through
//! the `State` extractor. Cloning is cheap: the decoder is plain
//! configuration and the reference counter shares one map.

use said_core::{Decoder, DecoderConfig, InMemoryReferenceCounter};

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
}

impl AppConfig {
    /// Read `PORT` from the environment.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { port }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Shared application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: AppConfig,
    pub decoder: Decoder,
    pub references: InMemoryReferenceCounter,
}

impl AppState {
    /// State with default configuration and an empty reference counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the given server and decoder configuration.
    pub fn with_config(config: AppConfig, decoder_config: DecoderConfig) -> Self {
        Self {
            config,
            decoder: Decoder::new(decoder_config),
            references: InMemoryReferenceCounter::new(),
        }
    }
}

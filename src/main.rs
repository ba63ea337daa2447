// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Skybot API Server
//!
//! Receives Telegram updates on a webhook and delivers scheduled weather
//! notifications when the external scheduler calls `/tasks/tick`.

use skybot::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryStore, Store},
    services::{OpenWeatherClient, TelegramClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        admins = config.admin_ids.len(),
        "Starting Skybot"
    );

    let store: Arc<dyn Store> = match config.store_backend {
        StoreBackend::Firestore => {
            let db = FirestoreDb::new(&config.gcp_project_id).await?;
            tracing::info!(project = %config.gcp_project_id, "Firestore store initialized");
            Arc::new(db)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppState {
        weather: Arc::new(OpenWeatherClient::new(config.openweather_api_key.clone())),
        transport: Arc::new(TelegramClient::new(config.telegram_bot_token.clone())),
        store,
        config: config.clone(),
    });

    // Build router
    let app = skybot::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("skybot=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Webhook route for Telegram updates.

use crate::bot;
use crate::config::TELEGRAM_SECRET_HEADER;
use crate::middleware::scheduler_auth::header_matches;
use crate::services::telegram::Update;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::Arc;

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/webhook/telegram", post(handle_update))
}

/// Handle one update pushed by Telegram (POST).
///
/// Anything past the secret check answers 200: Telegram redelivers on any
/// other status, and a broken update will not get better on retry.
async fn handle_update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if !header_matches(
        &headers,
        TELEGRAM_SECRET_HEADER,
        &state.config.telegram_webhook_secret,
    ) {
        tracing::warn!("Security Alert: Webhook secret token mismatch");
        return StatusCode::FORBIDDEN;
    }

    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "Webhook body is not JSON");
            return StatusCode::OK;
        }
    };
    tracing::debug!(payload = %payload, "Webhook update received (raw)");

    let update: Update = match serde_json::from_value(payload) {
        Ok(u) => u,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse Telegram update");
            return StatusCode::OK;
        }
    };
    let update_id = update.id.0;

    if let Err(e) = bot::handle_update(&state, update).await {
        tracing::error!(error = %e, update_id, "Failed to handle update");
    }

    StatusCode::OK
}

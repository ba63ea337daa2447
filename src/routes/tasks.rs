// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Task routes called by the external scheduler.
//!
//! Protected by the scheduler token middleware in `create_router`.

use crate::bot::notify::{self, TickSummary};
use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use std::sync::Arc;

/// Task handler routes (called by the scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/tick", post(tick))
}

/// Evaluate every active subscription once and deliver what is due.
///
/// Meant to be hit once a minute. Per-subscription failures are counted in
/// the summary; only failing to list subscriptions fails the request.
async fn tick(State(state): State<Arc<AppState>>) -> Result<Json<TickSummary>, AppError> {
    let summary = notify::run_tick(&state, Utc::now()).await?;
    Ok(Json(summary))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Scheduler authentication middleware.

use crate::config::SCHEDULER_TOKEN_HEADER;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Whether `headers[name]` equals `expected`, compared in constant time.
pub fn header_matches(headers: &HeaderMap, name: &str, expected: &str) -> bool {
    let Some(value) = headers.get(name) else {
        return false;
    };
    !expected.is_empty() && bool::from(value.as_bytes().ct_eq(expected.as_bytes()))
}

/// Require the shared scheduler token for `/tasks/*` routes.
pub async fn require_scheduler_token(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if !header_matches(
        request.headers(),
        SCHEDULER_TOKEN_HEADER,
        &state.config.scheduler_token,
    ) {
        tracing::warn!(
            path = %request.uri().path(),
            present = request.headers().contains_key(SCHEDULER_TOKEN_HEADER),
            "Blocked tasks request with invalid scheduler token"
        );
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}

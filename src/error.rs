// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Application error types with consistent API responses.

use crate::bot::role::RoleRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Weather API error: {0}")]
    Weather(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Telegram rejects edits that would not change the message.
    pub const TELEGRAM_NOT_MODIFIED: &'static str = "message is not modified";

    /// Whether this is Telegram's harmless "message is not modified" error.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, AppError::Telegram(msg) if msg.contains(Self::TELEGRAM_NOT_MODIFIED))
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Weather(msg) => {
                (StatusCode::BAD_GATEWAY, "weather_error", Some(msg.clone()))
            }
            AppError::Telegram(msg) => {
                (StatusCode::BAD_GATEWAY, "telegram_error", Some(msg.clone()))
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a bot command or button flow.
///
/// Every variant degrades to a chat reply; none is fatal.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Token or argument could not be interpreted.
    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("insufficient permissions")]
    PermissionDenied,

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("illegal role transition: {0}")]
    IllegalTransition(RoleRejection),

    /// The user has no saved location yet.
    #[error("location required")]
    LocationRequired,

    /// Per-user creation limit hit.
    #[error("limit of {0} reached")]
    LimitReached(usize),

    /// Store or provider call failed.
    #[error(transparent)]
    Upstream(#[from] AppError),
}

impl FlowError {
    /// Localization key of the user-visible message.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FlowError::Malformed(_) => "error.malformed",
            FlowError::PermissionDenied => "error.permission_denied",
            FlowError::NotFound(_) => "error.not_found",
            FlowError::IllegalTransition(rejection) => rejection.i18n_key(),
            FlowError::LocationRequired => "error.location_required",
            FlowError::LimitReached(_) => "error.limit_reached",
            FlowError::Upstream(_) => "error.failed",
        }
    }
}

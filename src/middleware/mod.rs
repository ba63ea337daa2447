// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Middleware modules (scheduler authentication, security headers).

pub mod scheduler_auth;
pub mod security;

pub use scheduler_auth::require_scheduler_token;

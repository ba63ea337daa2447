// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Skybot: a Telegram bot for weather, air quality and threshold alerts.
//!
//! This crate provides the webhook server, the button-driven bot flows and
//! the scheduled notification tick.

pub mod bot;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;
use services::{ChatTransport, WeatherProvider};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub weather: Arc<dyn WeatherProvider>,
    pub transport: Arc<dyn ChatTransport>,
}

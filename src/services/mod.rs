// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Services module - external APIs and message catalogs.

pub mod i18n;
pub mod telegram;
pub mod weather;

pub use telegram::{ChatTransport, TelegramClient};
pub use weather::{OpenWeatherClient, WeatherProvider};

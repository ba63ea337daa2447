// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Data models for the application.

pub mod alert;
pub mod subscription;
pub mod user;
pub mod weather;

pub use alert::{AlertCondition, AlertConfig, AlertType, Operator};
pub use subscription::{Frequency, Subscription, SubscriptionType, TimeOfDay};
pub use user::{Location, Role, Units, User};
pub use weather::{AirQuality, CurrentWeather, ForecastEntry, GeoLocation};

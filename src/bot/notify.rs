// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Scheduled notification delivery.
//!
//! An external scheduler calls the tick endpoint once a minute. Each active
//! subscription is evaluated in its owner's local time and, when due,
//! turned into a message:
//! - `daily`: current conditions plus a short forecast
//! - `weekly`: per-day forecast summary
//! - `alerts`: only when at least one active alert condition is met
//! - `extreme`: only when a fixed extreme limit is crossed
//!
//! A missed minute is not caught up.

use super::format;
use super::reply::{Button, Reply};
use super::scheduler::should_notify;
use crate::error::AppError;
use crate::models::alert::format_value;
use crate::models::{
    AirQuality, AlertConfig, AlertType, CurrentWeather, Location, Subscription, SubscriptionType,
    User,
};
use crate::services::i18n;
use crate::time_utils::{format_utc_rfc3339, local_time};
use crate::AppState;
use chrono::{DateTime, Utc};
use futures_util::{stream, StreamExt};
use serde::Serialize;

/// Limit concurrent deliveries to stay under Telegram's rate limits.
pub const MAX_CONCURRENT_DELIVERIES: usize = 8;

/// Fixed limits for `extreme` subscriptions (metric).
pub mod limits {
    pub const HEAT_C: f64 = 35.0;
    pub const FROST_C: f64 = -25.0;
    pub const WIND_MPS: f64 = 20.0;
    pub const US_AQI: f64 = 200.0;
}

/// Result of one tick, returned to the scheduler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// Active subscriptions looked at
    pub evaluated: usize,
    /// Subscriptions whose time matched
    pub due: usize,
    /// Messages delivered
    pub sent: usize,
    /// Deliveries that errored
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    NotDue,
    /// Due, but nothing to say (no location, no condition met).
    Skipped,
    Sent,
    Failed,
}

/// A message ready to go, plus the alerts it reports.
struct Notification {
    reply: Reply,
    triggered: Vec<AlertConfig>,
}

/// Evaluate every active subscription at `now` and deliver the due ones.
pub async fn run_tick(state: &AppState, now: DateTime<Utc>) -> Result<TickSummary, AppError> {
    let subs = state.store.list_active_subscriptions().await?;
    let mut summary = TickSummary {
        evaluated: subs.len(),
        ..Default::default()
    };

    let outcomes: Vec<Outcome> = stream::iter(subs)
        .map(|sub| async move { process(state, &sub, now).await })
        .buffer_unordered(MAX_CONCURRENT_DELIVERIES)
        .collect()
        .await;

    for outcome in outcomes {
        match outcome {
            Outcome::NotDue => {}
            Outcome::Skipped => summary.due += 1,
            Outcome::Sent => {
                summary.due += 1;
                summary.sent += 1;
            }
            Outcome::Failed => {
                summary.due += 1;
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        evaluated = summary.evaluated,
        due = summary.due,
        sent = summary.sent,
        failed = summary.failed,
        "Tick complete"
    );
    Ok(summary)
}

async fn process(state: &AppState, sub: &Subscription, now: DateTime<Utc>) -> Outcome {
    let user = match state.store.get_user(sub.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!(sub_id = %sub.id, user_id = sub.user_id, "Subscription without user");
            return Outcome::NotDue;
        }
        Err(e) => {
            tracing::error!(sub_id = %sub.id, error = %e, "Failed to load subscriber");
            return Outcome::Failed;
        }
    };

    if !should_notify(sub, local_time(&user.timezone, now)) {
        return Outcome::NotDue;
    }

    let Some(location) = user.location.clone() else {
        tracing::debug!(user_id = user.id, sub_id = %sub.id, "Due but no location set");
        return Outcome::Skipped;
    };

    let notification = match build(state, &user, &location, sub).await {
        Ok(Some(n)) => n,
        Ok(None) => return Outcome::Skipped,
        Err(e) => {
            tracing::error!(user_id = user.id, sub_id = %sub.id, error = %e, "Failed to build notification");
            return Outcome::Failed;
        }
    };

    if let Err(e) = state.transport.send_message(user.id, &notification.reply).await {
        tracing::error!(user_id = user.id, sub_id = %sub.id, error = %e, "Failed to deliver notification");
        return Outcome::Failed;
    }

    let stamp = format_utc_rfc3339(now);
    for mut alert in notification.triggered {
        alert.last_triggered = Some(stamp.clone());
        if let Err(e) = state.store.upsert_alert(&alert).await {
            tracing::warn!(alert_id = %alert.id, error = %e, "Failed to record alert trigger");
        }
    }

    tracing::info!(
        user_id = user.id,
        sub_id = %sub.id,
        kind = sub.kind.as_str(),
        "Notification sent"
    );
    Outcome::Sent
}

async fn build(
    state: &AppState,
    user: &User,
    location: &Location,
    sub: &Subscription,
) -> Result<Option<Notification>, AppError> {
    let lang = user.language.as_str();
    let weather = state.weather.as_ref();

    let text = match sub.kind {
        SubscriptionType::Daily => {
            let current = weather.current(location.lat, location.lon, lang).await?;
            let forecast = weather.forecast(location.lat, location.lon, lang).await?;
            format!(
                "{}\n\n{}\n\n{}",
                i18n::t(lang, "notify.daily_title"),
                format::current(lang, user, &location.name, &current),
                format::short_forecast(lang, user, &location.name, &forecast),
            )
        }
        SubscriptionType::Weekly => {
            let forecast = weather.forecast(location.lat, location.lon, lang).await?;
            format!(
                "{}\n\n{}",
                i18n::t(lang, "notify.weekly_title"),
                format::weekly_summary(lang, user, &location.name, &forecast),
            )
        }
        SubscriptionType::Alerts => {
            let alerts: Vec<AlertConfig> = state
                .store
                .list_alerts(user.id)
                .await?
                .into_iter()
                .filter(|a| a.is_active)
                .collect();
            if alerts.is_empty() {
                return Ok(None);
            }

            let current = weather.current(location.lat, location.lon, lang).await?;
            let air = if alerts.iter().any(|a| a.alert_type == AlertType::AirQuality) {
                Some(weather.air_quality(location.lat, location.lon).await?)
            } else {
                None
            };

            let triggered: Vec<AlertConfig> = triggered_alerts(&alerts, &current, air.as_ref())
                .into_iter()
                .cloned()
                .collect();
            if triggered.is_empty() {
                return Ok(None);
            }

            let mut text = i18n::tf(lang, "notify.alerts_title", &[("place", &location.name)]);
            for alert in &triggered {
                let now = reading(alert.alert_type, &current, air.as_ref())
                    .map(format_value)
                    .unwrap_or_default();
                text.push_str(&format!(
                    "\n• {} ({})",
                    format::alert_line(lang, alert),
                    i18n::tf(lang, "notify.now", &[("value", &now)])
                ));
            }
            return Ok(Some(Notification {
                reply: with_buttons(lang, text)?,
                triggered,
            }));
        }
        SubscriptionType::Extreme => {
            let current = weather.current(location.lat, location.lon, lang).await?;
            let air = match weather.air_quality(location.lat, location.lon).await {
                Ok(air) => Some(air),
                Err(e) => {
                    tracing::warn!(user_id = user.id, error = %e, "Air quality unavailable");
                    None
                }
            };

            let reasons = extreme_conditions(&current, air.as_ref());
            if reasons.is_empty() {
                return Ok(None);
            }

            let mut text = i18n::tf(lang, "notify.extreme_title", &[("place", &location.name)]);
            for key in reasons {
                text.push_str("\n⚠️ ");
                text.push_str(&i18n::t(lang, key));
            }
            text.push_str("\n\n");
            text.push_str(&format::current(lang, user, &location.name, &current));
            text
        }
    };

    Ok(Some(Notification {
        reply: with_buttons(lang, text)?,
        triggered: Vec::new(),
    }))
}

fn with_buttons(lang: &str, text: String) -> Result<Reply, AppError> {
    let button = Button::new(i18n::t(lang, "button.weather_now"), "weather", "current", &[])
        .map_err(|e| AppError::Internal(e.into()))?;
    Ok(Reply::text(text).row(vec![button]))
}

/// Current value an alert of `alert_type` compares against, if known.
pub fn reading(
    alert_type: AlertType,
    current: &CurrentWeather,
    air: Option<&AirQuality>,
) -> Option<f64> {
    match alert_type {
        AlertType::Temperature => Some(current.temperature_c),
        AlertType::Humidity => Some(current.humidity_pct),
        AlertType::Pressure => Some(current.pressure_hpa),
        AlertType::WindSpeed => Some(current.wind_speed_mps),
        AlertType::UvIndex => current.uv_index,
        AlertType::AirQuality => air.map(AirQuality::us_aqi),
        AlertType::Precipitation => Some(current.rain_1h_mm.unwrap_or(0.0)),
    }
}

/// Active alerts whose condition holds right now.
pub fn triggered_alerts<'a>(
    alerts: &'a [AlertConfig],
    current: &CurrentWeather,
    air: Option<&AirQuality>,
) -> Vec<&'a AlertConfig> {
    alerts
        .iter()
        .filter(|a| a.is_active)
        .filter(|a| {
            reading(a.alert_type, current, air).is_some_and(|value| a.condition.is_met(value))
        })
        .collect()
}

/// Localization keys of the extreme limits crossed.
pub fn extreme_conditions(current: &CurrentWeather, air: Option<&AirQuality>) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    if current.temperature_c >= limits::HEAT_C {
        reasons.push("extreme.heat");
    }
    if current.temperature_c <= limits::FROST_C {
        reasons.push("extreme.frost");
    }
    if current.wind_speed_mps >= limits::WIND_MPS {
        reasons.push("extreme.wind");
    }
    if air.is_some_and(|a| a.us_aqi() >= limits::US_AQI) {
        reasons.push("extreme.air");
    }
    reasons
}

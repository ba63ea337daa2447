// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Message text for weather data, alerts and subscriptions.
//!
//! Values arrive metric and are converted for display only.

use crate::models::alert::format_value;
use crate::models::{
    AirQuality, AlertConfig, CurrentWeather, ForecastEntry, Subscription, Units, User,
};
use crate::services::i18n;
use crate::time_utils::format_unix_local;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt::Write;

/// How many forecast steps a short forecast shows (3 h apart).
pub const SHORT_FORECAST_STEPS: usize = 8;

pub fn temperature(units: Units, celsius: f64) -> String {
    match units {
        Units::Metric => format!("{:.1}°C", celsius),
        Units::Imperial => format!("{:.1}°F", celsius * 9.0 / 5.0 + 32.0),
    }
}

pub fn wind_speed(units: Units, mps: f64) -> String {
    match units {
        Units::Metric => format!("{:.1} m/s", mps),
        Units::Imperial => format!("{:.1} mph", mps * 2.236_936),
    }
}

/// Current conditions block.
pub fn current(lang: &str, user: &User, place: &str, weather: &CurrentWeather) -> String {
    let mut out = i18n::tf(lang, "weather.current_title", &[("place", place)]);
    out.push('\n');
    if !weather.description.is_empty() {
        let _ = writeln!(out, "{}", capitalize(&weather.description));
    }
    let _ = writeln!(
        out,
        "{}: {} ({} {})",
        i18n::t(lang, "weather.temperature"),
        temperature(user.units, weather.temperature_c),
        i18n::t(lang, "weather.feels_like"),
        temperature(user.units, weather.feels_like_c),
    );
    let _ = writeln!(
        out,
        "{}: {:.0}%",
        i18n::t(lang, "weather.humidity"),
        weather.humidity_pct
    );
    let _ = writeln!(
        out,
        "{}: {:.0} hPa",
        i18n::t(lang, "weather.pressure"),
        weather.pressure_hpa
    );
    let _ = write!(
        out,
        "{}: {}",
        i18n::t(lang, "weather.wind"),
        wind_speed(user.units, weather.wind_speed_mps)
    );
    if let Some(rain) = weather.rain_1h_mm {
        let _ = write!(out, "\n{}: {:.1} mm", i18n::t(lang, "weather.rain"), rain);
    }
    let _ = write!(
        out,
        "\n\n{}",
        i18n::tf(
            lang,
            "weather.observed_at",
            &[(
                "time",
                &format_unix_local(weather.observed_at, &user.timezone, "%H:%M")
            )]
        )
    );
    out
}

/// Next day in 3-hour steps.
pub fn short_forecast(lang: &str, user: &User, place: &str, entries: &[ForecastEntry]) -> String {
    let mut out = i18n::tf(lang, "weather.forecast_title", &[("place", place)]);
    for entry in entries.iter().take(SHORT_FORECAST_STEPS) {
        let _ = write!(
            out,
            "\n{}  {}  {}  💧{:.0}%",
            format_unix_local(entry.at, &user.timezone, "%a %H:%M"),
            temperature(user.units, entry.temperature_c),
            entry.description,
            entry.precipitation_probability * 100.0,
        );
    }
    if entries.is_empty() {
        out.push('\n');
        out.push_str(&i18n::t(lang, "weather.no_data"));
    }
    out
}

/// Daily min/max over the whole forecast, one line per local day.
pub fn weekly_summary(lang: &str, user: &User, place: &str, entries: &[ForecastEntry]) -> String {
    let mut days: BTreeMap<String, (String, f64, f64, f64)> = BTreeMap::new();
    for entry in entries {
        let key = format_unix_local(entry.at, &user.timezone, "%Y-%m-%d");
        let label = format_unix_local(entry.at, &user.timezone, "%a %d.%m");
        let day = days.entry(key).or_insert((
            label,
            f64::INFINITY,
            f64::NEG_INFINITY,
            0.0,
        ));
        day.1 = day.1.min(entry.temperature_c);
        day.2 = day.2.max(entry.temperature_c);
        day.3 = day.3.max(entry.precipitation_probability);
    }

    let mut out = i18n::tf(lang, "weather.weekly_title", &[("place", place)]);
    for (label, min, max, pop) in days.into_values() {
        let _ = write!(
            out,
            "\n{}  {} … {}  💧{:.0}%",
            label,
            temperature(user.units, min),
            temperature(user.units, max),
            pop * 100.0
        );
    }
    out
}

pub fn air_quality(lang: &str, place: &str, air: &AirQuality) -> String {
    let level_key = match air.index {
        1 => "air.level.1",
        2 => "air.level.2",
        3 => "air.level.3",
        4 => "air.level.4",
        _ => "air.level.5",
    };
    format!(
        "{}\n{}: {} ({})\nUS AQI: {:.0}\nPM2.5: {:.1} µg/m³\nPM10: {:.1} µg/m³\nO₃: {:.1} µg/m³\nNO₂: {:.1} µg/m³",
        i18n::tf(lang, "air.title", &[("place", place)]),
        i18n::t(lang, "air.index"),
        air.index,
        i18n::t(lang, level_key),
        air.us_aqi(),
        air.pm2_5,
        air.pm10,
        air.o3,
        air.no2,
    )
}

/// One-line alert summary, e.g. "Temperature > 30°C".
pub fn alert_line(lang: &str, alert: &AlertConfig) -> String {
    format!(
        "{} {} {}{}",
        i18n::t(lang, alert.alert_type.i18n_key()),
        alert.condition.operator.symbol(),
        format_value(alert.condition.value),
        alert.alert_type.unit(),
    )
}

pub fn alert_details(lang: &str, alert: &AlertConfig) -> String {
    let mut out = alert_line(lang, alert);
    let status = if alert.is_active {
        "status.active"
    } else {
        "status.paused"
    };
    let _ = write!(
        out,
        "\n{}: {}",
        i18n::t(lang, "status.label"),
        i18n::t(lang, status)
    );
    if let Some(at) = &alert.last_triggered {
        let _ = write!(
            out,
            "\n{}",
            i18n::tf(lang, "alert.last_triggered", &[("time", at)])
        );
    }
    out
}

/// One-line subscription summary, e.g. "Daily forecast · daily · 08:00".
pub fn subscription_line(lang: &str, sub: &Subscription) -> String {
    format!(
        "{} · {} · {}",
        i18n::t(lang, sub.kind.i18n_key()),
        i18n::t(lang, sub.frequency.i18n_key()),
        sub.time_of_day,
    )
}

pub fn subscription_details(lang: &str, sub: &Subscription, timezone: &str) -> String {
    let status = if sub.is_active {
        "status.active"
    } else {
        "status.paused"
    };
    format!(
        "{}\n{}: {}\n{}: {}\n{}: {} ({})\n{}: {}",
        i18n::t(lang, sub.kind.i18n_key()),
        i18n::t(lang, "sub.frequency"),
        i18n::t(lang, sub.frequency.i18n_key()),
        i18n::t(lang, "status.label"),
        i18n::t(lang, status),
        i18n::t(lang, "sub.time"),
        sub.time_of_day,
        timezone,
        i18n::t(lang, "sub.delivery"),
        i18n::t(lang, delivery_key(sub)),
    )
}

fn delivery_key(sub: &Subscription) -> &'static str {
    match sub.kind {
        crate::models::SubscriptionType::Weekly => "sub.delivery.weekly",
        crate::models::SubscriptionType::Daily => "sub.delivery.daily",
        crate::models::SubscriptionType::Alerts => "sub.delivery.alerts",
        crate::models::SubscriptionType::Extreme => "sub.delivery.extreme",
    }
}

/// Settings overview.
pub fn settings(lang: &str, user: &User) -> String {
    let location = user
        .location
        .as_ref()
        .map(|l| l.name.clone())
        .unwrap_or_else(|| i18n::t(lang, "settings.not_set"));
    format!(
        "{}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        i18n::t(lang, "settings.title"),
        i18n::t(lang, "settings.language"),
        i18n::language_name(&user.language),
        i18n::t(lang, "settings.units"),
        i18n::t(lang, &format!("units.{}", user.units.as_str())),
        i18n::t(lang, "settings.location"),
        location,
        i18n::t(lang, "settings.timezone"),
        user.timezone,
    )
}

/// Admin user list line.
pub fn user_line(user: &User) -> String {
    format!("{} · {} · id {}", user.label(), user.role, user.id)
}

/// Timestamp for export filenames.
pub fn file_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertType, Role};

    fn user() -> User {
        User::new(1, "Ann", Role::User, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(temperature(Units::Metric, 20.0), "20.0°C");
        assert_eq!(temperature(Units::Imperial, 20.0), "68.0°F");
        assert_eq!(wind_speed(Units::Imperial, 10.0), "22.4 mph");
    }

    #[test]
    fn test_alert_line() {
        let alert = AlertConfig::new(1, AlertType::Temperature, "2024-01-01T00:00:00Z");
        assert_eq!(alert_line("en", &alert), "Temperature > 30°C");
    }

    #[test]
    fn test_weekly_summary_groups_by_local_day() {
        let entry = |at: i64, t: f64| ForecastEntry {
            at,
            description: String::new(),
            temperature_c: t,
            humidity_pct: 50.0,
            wind_speed_mps: 1.0,
            precipitation_probability: 0.2,
        };
        // 2024-06-02 00:00 UTC, +3h, +24h
        let entries = vec![
            entry(1717286400, 10.0),
            entry(1717297200, 18.0),
            entry(1717372800, 12.0),
        ];
        let text = weekly_summary("en", &user(), "Oslo", &entries);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("10.0°C … 18.0°C"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize("снег"), "Снег");
        assert_eq!(capitalize(""), "");
    }
}

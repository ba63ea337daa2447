// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Alert configuration: what to watch and when to fire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Physical quantity an alert watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    UvIndex,
    AirQuality,
    /// Rain volume over the last hour (mm). No fixed picker range.
    Precipitation,
}

impl AlertType {
    pub const ALL: [AlertType; 7] = [
        AlertType::Temperature,
        AlertType::Humidity,
        AlertType::Pressure,
        AlertType::WindSpeed,
        AlertType::UvIndex,
        AlertType::AirQuality,
        AlertType::Precipitation,
    ];

    /// Short tag used in callback tokens.
    pub fn tag(self) -> &'static str {
        match self {
            AlertType::Temperature => "temp",
            AlertType::Humidity => "hum",
            AlertType::Pressure => "pres",
            AlertType::WindSpeed => "wind",
            AlertType::UvIndex => "uv",
            AlertType::AirQuality => "aqi",
            AlertType::Precipitation => "rain",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Localization key for the type name.
    pub fn i18n_key(self) -> &'static str {
        match self {
            AlertType::Temperature => "alert_type.temperature",
            AlertType::Humidity => "alert_type.humidity",
            AlertType::Pressure => "alert_type.pressure",
            AlertType::WindSpeed => "alert_type.wind_speed",
            AlertType::UvIndex => "alert_type.uv_index",
            AlertType::AirQuality => "alert_type.air_quality",
            AlertType::Precipitation => "alert_type.precipitation",
        }
    }

    /// Unit suffix for display (metric values are stored).
    pub fn unit(self) -> &'static str {
        match self {
            AlertType::Temperature => "°C",
            AlertType::Humidity => "%",
            AlertType::Pressure => " hPa",
            AlertType::WindSpeed => " m/s",
            AlertType::UvIndex => "",
            AlertType::AirQuality => " AQI",
            AlertType::Precipitation => " mm",
        }
    }

    /// Condition a newly created alert of this type starts with.
    pub fn default_condition(self) -> AlertCondition {
        match self {
            AlertType::Temperature => AlertCondition::new(Operator::Gt, 30.0),
            AlertType::Humidity => AlertCondition::new(Operator::Gt, 80.0),
            AlertType::Pressure => AlertCondition::new(Operator::Lt, 990.0),
            AlertType::WindSpeed => AlertCondition::new(Operator::Gt, 15.0),
            AlertType::UvIndex => AlertCondition::new(Operator::Gte, 6.0),
            AlertType::AirQuality => AlertCondition::new(Operator::Gt, 100.0),
            AlertType::Precipitation => AlertCondition::new(Operator::Gt, 5.0),
        }
    }
}

/// Comparison operator of an alert condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Eq,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Eq => "eq",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Gte => "≥",
            Operator::Lt => "<",
            Operator::Lte => "≤",
            Operator::Eq => "=",
        }
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|op| op.as_str() == s).ok_or(())
    }
}

/// Values closer than this compare equal under `Operator::Eq`.
const EQ_TOLERANCE: f64 = 1e-6;

/// A typed `(operator, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertCondition {
    pub operator: Operator,
    pub value: f64,
}

impl AlertCondition {
    pub fn new(operator: Operator, value: f64) -> Self {
        Self { operator, value }
    }

    /// Whether `current` satisfies the condition.
    pub fn is_met(&self, current: f64) -> bool {
        match self.operator {
            Operator::Gt => current > self.value,
            Operator::Gte => current >= self.value,
            Operator::Lt => current < self.value,
            Operator::Lte => current <= self.value,
            Operator::Eq => (current - self.value).abs() < EQ_TOLERANCE,
        }
    }

    /// Storage form: a small JSON blob.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"operator":"{}","value":0}}"#, self.operator.as_str())
        })
    }

    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}

impl fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operator.symbol(), format_value(self.value))
    }
}

/// Format a threshold without trailing zeros ("25", "2.5").
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.2}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Serialize the condition field as a JSON string inside the document.
mod condition_blob {
    use super::AlertCondition;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(c: &AlertCondition, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&c.to_json())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<AlertCondition, D::Error> {
        let blob = String::deserialize(d)?;
        AlertCondition::from_json(&blob).map_err(D::Error::custom)
    }
}

/// Alert record stored in the `alerts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertConfig {
    pub id: Uuid,
    pub user_id: i64,
    pub alert_type: AlertType,
    #[serde(with = "condition_blob")]
    pub condition: AlertCondition,
    pub is_active: bool,
    /// Last time this alert was delivered (ISO 8601)
    #[serde(default)]
    pub last_triggered: Option<String>,
    pub created_at: String,
}

impl AlertConfig {
    /// A new active alert with the type's default condition.
    pub fn new(user_id: i64, alert_type: AlertType, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            alert_type,
            condition: alert_type.default_condition(),
            is_active: true,
            last_triggered: None,
            created_at: now.to_string(),
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Recurring notification preferences.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// What a subscription delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Daily,
    Weekly,
    Alerts,
    Extreme,
}

impl SubscriptionType {
    pub const ALL: [SubscriptionType; 4] = [
        SubscriptionType::Daily,
        SubscriptionType::Weekly,
        SubscriptionType::Alerts,
        SubscriptionType::Extreme,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionType::Daily => "daily",
            SubscriptionType::Weekly => "weekly",
            SubscriptionType::Alerts => "alerts",
            SubscriptionType::Extreme => "extreme",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            SubscriptionType::Daily => "sub_type.daily",
            SubscriptionType::Weekly => "sub_type.weekly",
            SubscriptionType::Alerts => "sub_type.alerts",
            SubscriptionType::Extreme => "sub_type.extreme",
        }
    }

    /// Frequency a new subscription of this type starts with.
    pub fn default_frequency(self) -> Frequency {
        match self {
            SubscriptionType::Weekly => Frequency::Weekly,
            _ => Frequency::Daily,
        }
    }
}

impl FromStr for SubscriptionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

/// How often the user wants to hear from the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Every3h,
    Every6h,
    Daily,
    Weekly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Hourly,
        Frequency::Every3h,
        Frequency::Every6h,
        Frequency::Daily,
        Frequency::Weekly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Every3h => "every3h",
            Frequency::Every6h => "every6h",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }

    pub fn i18n_key(self) -> &'static str {
        match self {
            Frequency::Hourly => "freq.hourly",
            Frequency::Every3h => "freq.every3h",
            Frequency::Every6h => "freq.every6h",
            Frequency::Daily => "freq.daily",
            Frequency::Weekly => "freq.weekly",
        }
    }
}

impl FromStr for Frequency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

/// Wall-clock minute of day, rendered `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time of day: {0}")]
pub struct InvalidTimeOfDay(pub String);

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, InvalidTimeOfDay> {
        if hour > 23 || minute > 59 {
            return Err(InvalidTimeOfDay(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Compact `HHMM` form used in callback tokens.
    pub fn compact(self) -> String {
        format!("{:02}{:02}", self.hour, self.minute)
    }

    /// Parse the compact `HHMM` form.
    pub fn from_compact(s: &str) -> Result<Self, InvalidTimeOfDay> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidTimeOfDay(s.to_string()));
        }
        let hour = s[..2].parse().map_err(|_| InvalidTimeOfDay(s.to_string()))?;
        let minute = s[2..].parse().map_err(|_| InvalidTimeOfDay(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| InvalidTimeOfDay(s.to_string()))?;
        if h.len() != 2 || m.len() != 2 {
            return Err(InvalidTimeOfDay(s.to_string()));
        }
        let hour = h.parse().map_err(|_| InvalidTimeOfDay(s.to_string()))?;
        let minute = m.parse().map_err(|_| InvalidTimeOfDay(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Subscription record stored in the `subscriptions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: SubscriptionType,
    pub frequency: Frequency,
    pub time_of_day: TimeOfDay,
    pub is_active: bool,
    pub created_at: String,
}

/// Delivery time a new subscription starts with.
pub const DEFAULT_TIME_OF_DAY: TimeOfDay = TimeOfDay { hour: 8, minute: 0 };

impl Subscription {
    pub fn new(user_id: i64, kind: SubscriptionType, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            frequency: kind.default_frequency(),
            time_of_day: DEFAULT_TIME_OF_DAY,
            is_active: true,
            created_at: now.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_of_day_parse() {
        let t: TimeOfDay = "08:05".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (8, 5));
        assert_eq!(t.to_string(), "08:05");
        assert_eq!(t.compact(), "0805");
        assert_eq!(TimeOfDay::from_compact("0805").unwrap(), t);
    }

    #[test]
    fn test_time_of_day_rejects_invalid() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("8:00".parse::<TimeOfDay>().is_err());
        assert!("08:60".parse::<TimeOfDay>().is_err());
        assert!("0800".parse::<TimeOfDay>().is_err());
        assert!(TimeOfDay::from_compact("08:0").is_err());
        assert!(TimeOfDay::from_compact("2400").is_err());
    }

    #[test]
    fn test_subscription_document_shape() {
        let sub = Subscription::new(1, SubscriptionType::Weekly, "2024-01-01T00:00:00Z");
        let doc = serde_json::to_value(&sub).unwrap();
        assert_eq!(doc["type"], "weekly");
        assert_eq!(doc["frequency"], "weekly");
        assert_eq!(doc["time_of_day"], "08:00");
        let back: Subscription = serde_json::from_value(doc).unwrap();
        assert_eq!(back, sub);
    }
}

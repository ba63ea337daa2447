// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! User model and the role ladder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission level. Ordered: `User < Moderator < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Numeric value carried in callback tokens.
    pub fn value(self) -> u8 {
        match self {
            Role::User => 1,
            Role::Moderator => 2,
            Role::Admin => 3,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Role::User),
            2 => Some(Role::Moderator),
            3 => Some(Role::Admin),
            _ => None,
        }
    }

    /// Human-readable name used in replies and audit messages.
    pub fn name(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Moderator => "Moderator",
            Role::Admin => "Admin",
        }
    }

    /// One step up the ladder, if any.
    pub fn above(self) -> Option<Self> {
        match self {
            Role::User => Some(Role::Moderator),
            Role::Moderator => Some(Role::Admin),
            Role::Admin => None,
        }
    }

    /// One step down the ladder, if any.
    pub fn below(self) -> Option<Self> {
        match self {
            Role::User => None,
            Role::Moderator => Some(Role::User),
            Role::Admin => Some(Role::Moderator),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Measurement system for replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

impl FromStr for Units {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(()),
        }
    }
}

/// A saved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
}

/// Bot user stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Telegram user ID (also used as document ID)
    pub id: i64,
    /// Telegram @username, if public
    #[serde(default)]
    pub username: Option<String>,
    pub first_name: String,
    pub role: Role,
    /// Interface language code ("en", "ru")
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub location: Option<Location>,
    /// IANA timezone name
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// When user first started the bot (ISO 8601)
    pub created_at: String,
    /// Last interaction timestamp (ISO 8601)
    pub last_active: String,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl User {
    /// A fresh user with default preferences.
    pub fn new(id: i64, first_name: impl Into<String>, role: Role, now: &str) -> Self {
        Self {
            id,
            username: None,
            first_name: first_name.into(),
            role,
            language: default_language(),
            units: Units::default(),
            location: None,
            timezone: default_timezone(),
            created_at: now.to_string(),
            last_active: now.to_string(),
        }
    }

    /// Display label: `@username` when known, otherwise first name and id.
    pub fn label(&self) -> String {
        match &self.username {
            Some(u) => format!("@{}", u),
            None => format!("{} ({})", self.first_name, self.id),
        }
    }
}

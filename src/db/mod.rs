// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Storage layer.
//!
//! Flows talk to the [`Store`] trait: by-id lookups and single-document
//! mutations only. Production uses Firestore; local runs and tests use the
//! in-memory store.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{AlertConfig, Role, Subscription, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ALERTS: &str = "alerts";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    /// Audit trail of role changes
    pub const ROLE_CHANGES: &str = "role_changes";
}

/// Persistence operations used by the bot.
#[async_trait]
pub trait Store: Send + Sync {
    // ─── Users ───────────────────────────────────────────────────

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Set `target_id`'s role and record who did it.
    ///
    /// Fails with `NotFound` if the target does not exist.
    async fn change_user_role(
        &self,
        acting_admin_id: i64,
        target_id: i64,
        new_role: Role,
    ) -> Result<(), AppError>;

    // ─── Alerts ──────────────────────────────────────────────────

    async fn get_alert(&self, user_id: i64, alert_id: Uuid) -> Result<Option<AlertConfig>, AppError>;

    async fn list_alerts(&self, user_id: i64) -> Result<Vec<AlertConfig>, AppError>;

    /// Create or replace an alert.
    async fn upsert_alert(&self, alert: &AlertConfig) -> Result<(), AppError>;

    async fn delete_alert(&self, user_id: i64, alert_id: Uuid) -> Result<(), AppError>;

    // ─── Subscriptions ───────────────────────────────────────────

    async fn get_user_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>, AppError>;

    async fn get_subscription(
        &self,
        user_id: i64,
        sub_id: Uuid,
    ) -> Result<Option<Subscription>, AppError>;

    /// Create or replace a subscription.
    async fn upsert_subscription(&self, sub: &Subscription) -> Result<(), AppError>;

    async fn delete_subscription(&self, user_id: i64, sub_id: Uuid) -> Result<(), AppError>;

    /// Every subscription with `is_active == true`, across all users.
    async fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, AppError>;
}

/// Audit record written by `change_user_role`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RoleChangeRecord {
    pub acting_admin_id: i64,
    pub target_id: i64,
    pub old_role: Role,
    pub new_role: Role,
    pub changed_at: String,
}

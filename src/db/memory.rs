// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! In-memory store for local development and tests.

use super::{RoleChangeRecord, Store};
use crate::error::AppError;
use crate::models::{AlertConfig, Role, Subscription, User};
use crate::time_utils::format_utc_rfc3339;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Store backed by concurrent hash maps. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<i64, User>,
    alerts: DashMap<Uuid, AlertConfig>,
    subscriptions: DashMap<Uuid, Subscription>,
    role_changes: Mutex<Vec<RoleChangeRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role changes recorded so far, oldest first.
    pub fn role_changes(&self) -> Vec<RoleChangeRecord> {
        self.role_changes
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn change_user_role(
        &self,
        acting_admin_id: i64,
        target_id: i64,
        new_role: Role,
    ) -> Result<(), AppError> {
        let old_role = {
            let mut user = self
                .users
                .get_mut(&target_id)
                .ok_or_else(|| AppError::NotFound(format!("user {}", target_id)))?;
            std::mem::replace(&mut user.role, new_role)
        };

        let record = RoleChangeRecord {
            acting_admin_id,
            target_id,
            old_role,
            new_role,
            changed_at: format_utc_rfc3339(chrono::Utc::now()),
        };
        self.role_changes
            .lock()
            .map_err(|_| AppError::Database("role change log poisoned".to_string()))?
            .push(record);
        Ok(())
    }

    async fn get_alert(&self, user_id: i64, alert_id: Uuid) -> Result<Option<AlertConfig>, AppError> {
        Ok(self
            .alerts
            .get(&alert_id)
            .filter(|a| a.user_id == user_id)
            .map(|a| a.clone()))
    }

    async fn list_alerts(&self, user_id: i64) -> Result<Vec<AlertConfig>, AppError> {
        let mut alerts: Vec<AlertConfig> = self
            .alerts
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.clone())
            .collect();
        alerts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(alerts)
    }

    async fn upsert_alert(&self, alert: &AlertConfig) -> Result<(), AppError> {
        self.alerts.insert(alert.id, alert.clone());
        Ok(())
    }

    async fn delete_alert(&self, user_id: i64, alert_id: Uuid) -> Result<(), AppError> {
        self.alerts.remove_if(&alert_id, |_, a| a.user_id == user_id);
        Ok(())
    }

    async fn get_user_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>, AppError> {
        let mut subs: Vec<Subscription> = self
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.clone())
            .collect();
        subs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(subs)
    }

    async fn get_subscription(
        &self,
        user_id: i64,
        sub_id: Uuid,
    ) -> Result<Option<Subscription>, AppError> {
        Ok(self
            .subscriptions
            .get(&sub_id)
            .filter(|s| s.user_id == user_id)
            .map(|s| s.clone()))
    }

    async fn upsert_subscription(&self, sub: &Subscription) -> Result<(), AppError> {
        self.subscriptions.insert(sub.id, sub.clone());
        Ok(())
    }

    async fn delete_subscription(&self, user_id: i64, sub_id: Uuid) -> Result<(), AppError> {
        self.subscriptions
            .remove_if(&sub_id, |_, s| s.user_id == user_id);
        Ok(())
    }

    async fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, AppError> {
        Ok(self
            .subscriptions
            .iter()
            .filter(|s| s.is_active)
            .map(|s| s.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertType, SubscriptionType};

    const NOW: &str = "2024-01-01T00:00:00Z";

    #[tokio::test]
    async fn test_change_user_role_records_audit() {
        let store = MemoryStore::new();
        store
            .upsert_user(&User::new(2, "Bo", Role::User, NOW))
            .await
            .unwrap();

        store.change_user_role(1, 2, Role::Moderator).await.unwrap();

        let user = store.get_user(2).await.unwrap().unwrap();
        assert_eq!(user.role, Role::Moderator);
        let log = store.role_changes();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].old_role, Role::User);
        assert_eq!(log[0].acting_admin_id, 1);
    }

    #[tokio::test]
    async fn test_change_role_of_missing_user() {
        let store = MemoryStore::new();
        let err = store.change_user_role(1, 99, Role::Admin).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_alerts_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let alert = AlertConfig::new(1, AlertType::Temperature, NOW);
        store.upsert_alert(&alert).await.unwrap();

        assert!(store.get_alert(2, alert.id).await.unwrap().is_none());
        store.delete_alert(2, alert.id).await.unwrap();
        assert!(store.get_alert(1, alert.id).await.unwrap().is_some());

        store.delete_alert(1, alert.id).await.unwrap();
        assert!(store.list_alerts(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_active_subscription_listing() {
        let store = MemoryStore::new();
        let active = Subscription::new(1, SubscriptionType::Daily, NOW);
        let mut paused = Subscription::new(2, SubscriptionType::Weekly, NOW);
        paused.is_active = false;
        store.upsert_subscription(&active).await.unwrap();
        store.upsert_subscription(&paused).await.unwrap();

        let listed = store.list_active_subscriptions().await.unwrap();
        assert_eq!(listed, vec![active]);
    }
}

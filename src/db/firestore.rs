// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile, preferences, role)
//! - Alerts (per-user threshold alerts)
//! - Subscriptions (recurring notifications)
//! - Role changes (audit trail)

use super::{collections, RoleChangeRecord, Store};
use crate::error::AppError;
use crate::models::{AlertConfig, Role, Subscription, User};
use crate::time_utils::format_utc_rfc3339;
use async_trait::async_trait;
use uuid::Uuid;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    async fn get_doc<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: for<'de> serde::Deserialize<'de> + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn set_doc<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: serde::Serialize + for<'de> serde::Deserialize<'de> + Send + Sync,
    {
        let _: T = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_doc(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All documents in `collection` owned by `user_id`, oldest first.
    async fn list_owned<T>(&self, collection: &str, user_id: i64) -> Result<Vec<T>, AppError>
    where
        T: for<'de> serde::Deserialize<'de> + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("created_at", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl Store for FirestoreDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        self.get_doc(collections::USERS, &id.to_string()).await
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.set_doc(collections::USERS, &user.id.to_string(), user)
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([("id", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn change_user_role(
        &self,
        acting_admin_id: i64,
        target_id: i64,
        new_role: Role,
    ) -> Result<(), AppError> {
        let mut user = self
            .get_user(target_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", target_id)))?;

        let record = RoleChangeRecord {
            acting_admin_id,
            target_id,
            old_role: user.role,
            new_role,
            changed_at: format_utc_rfc3339(chrono::Utc::now()),
        };
        user.role = new_role;

        // Profile and audit record land together or not at all.
        let client = self.get_client()?;
        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(target_id.to_string())
            .object(&user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| AppError::Database(format!("Failed to add user to transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::ROLE_CHANGES)
            .document_id(Uuid::new_v4().to_string())
            .object(&record)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add audit record to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            acting_admin_id,
            target_id,
            old_role = %record.old_role,
            new_role = %new_role,
            "User role changed"
        );
        Ok(())
    }

    // ─── Alert Operations ────────────────────────────────────────

    async fn get_alert(&self, user_id: i64, alert_id: Uuid) -> Result<Option<AlertConfig>, AppError> {
        let alert: Option<AlertConfig> = self
            .get_doc(collections::ALERTS, &alert_id.to_string())
            .await?;
        Ok(alert.filter(|a| a.user_id == user_id))
    }

    async fn list_alerts(&self, user_id: i64) -> Result<Vec<AlertConfig>, AppError> {
        self.list_owned(collections::ALERTS, user_id).await
    }

    async fn upsert_alert(&self, alert: &AlertConfig) -> Result<(), AppError> {
        self.set_doc(collections::ALERTS, &alert.id.to_string(), alert)
            .await
    }

    async fn delete_alert(&self, user_id: i64, alert_id: Uuid) -> Result<(), AppError> {
        // Ownership check before delete; ids are not secret.
        if self.get_alert(user_id, alert_id).await?.is_none() {
            return Ok(());
        }
        self.delete_doc(collections::ALERTS, &alert_id.to_string())
            .await
    }

    // ─── Subscription Operations ─────────────────────────────────

    async fn get_user_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>, AppError> {
        self.list_owned(collections::SUBSCRIPTIONS, user_id).await
    }

    async fn get_subscription(
        &self,
        user_id: i64,
        sub_id: Uuid,
    ) -> Result<Option<Subscription>, AppError> {
        let sub: Option<Subscription> = self
            .get_doc(collections::SUBSCRIPTIONS, &sub_id.to_string())
            .await?;
        Ok(sub.filter(|s| s.user_id == user_id))
    }

    async fn upsert_subscription(&self, sub: &Subscription) -> Result<(), AppError> {
        self.set_doc(collections::SUBSCRIPTIONS, &sub.id.to_string(), sub)
            .await
    }

    async fn delete_subscription(&self, user_id: i64, sub_id: Uuid) -> Result<(), AppError> {
        if self.get_subscription(user_id, sub_id).await?.is_none() {
            return Ok(());
        }
        self.delete_doc(collections::SUBSCRIPTIONS, &sub_id.to_string())
            .await
    }

    async fn list_active_subscriptions(&self) -> Result<Vec<Subscription>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::SUBSCRIPTIONS)
            .filter(|q| q.for_all([q.field("is_active").eq(true)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Start one with `gcloud emulators firestore start` and export
//! FIRESTORE_EMULATOR_HOST; otherwise the tests skip themselves.
//!
//! The emulator provides a clean state for each test run.

use skybot::db::Store;
use skybot::models::{
    AlertConfig, AlertType, Location, Operator, Role, Subscription, SubscriptionType, TimeOfDay,
    User,
};

mod common;
use common::test_db;

const NOW: &str = "2024-06-01T00:00:00Z";

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    // Microseconds fit comfortably in i64 and are unique enough per run
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros() as i64
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_round_trip() {
    require_emulator!();

    let db = test_db().await;
    let id = unique_user_id();

    assert!(db.get_user(id).await.unwrap().is_none());

    let mut user = User::new(id, "Test", Role::User, NOW);
    user.username = Some("tester".to_string());
    user.language = "ru".to_string();
    user.timezone = "Europe/Moscow".to_string();
    user.location = Some(Location {
        name: "Moscow".to_string(),
        lat: 55.75,
        lon: 37.62,
        country: Some("RU".to_string()),
    });
    db.upsert_user(&user).await.unwrap();

    let fetched = db.get_user(id).await.unwrap().unwrap();
    assert_eq!(fetched.first_name, "Test");
    assert_eq!(fetched.username.as_deref(), Some("tester"));
    assert_eq!(fetched.language, "ru");
    assert_eq!(fetched.timezone, "Europe/Moscow");
    assert_eq!(fetched.location.unwrap().name, "Moscow");

    println!("✓ User stored and fetched: id={}", id);
}

#[tokio::test]
async fn test_change_user_role_writes_audit() {
    require_emulator!();

    let db = test_db().await;
    let id = unique_user_id();
    db.upsert_user(&User::new(id, "Target", Role::User, NOW))
        .await
        .unwrap();

    db.change_user_role(1, id, Role::Moderator).await.unwrap();

    let fetched = db.get_user(id).await.unwrap().unwrap();
    assert_eq!(fetched.role, Role::Moderator);
}

#[tokio::test]
async fn test_change_role_of_missing_user_fails() {
    require_emulator!();

    let db = test_db().await;
    let err = db
        .change_user_role(1, unique_user_id(), Role::Moderator)
        .await
        .unwrap_err();
    assert!(matches!(err, skybot::error::AppError::NotFound(_)));
}

// ═══════════════════════════════════════════════════════════════════════════
// ALERT AND SUBSCRIPTION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_alert_lifecycle() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let mut alert = AlertConfig::new(user_id, AlertType::WindSpeed, NOW);
    alert.condition.operator = Operator::Gte;
    alert.condition.value = 15.0;
    db.upsert_alert(&alert).await.unwrap();

    let listed = db.list_alerts(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].condition, alert.condition);

    db.delete_alert(user_id, alert.id).await.unwrap();
    assert!(db.get_alert(user_id, alert.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_active_subscriptions_listed() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let mut active = Subscription::new(user_id, SubscriptionType::Daily, NOW);
    active.time_of_day = TimeOfDay::new(6, 30).unwrap();
    let mut paused = Subscription::new(user_id, SubscriptionType::Weekly, NOW);
    paused.is_active = false;
    db.upsert_subscription(&active).await.unwrap();
    db.upsert_subscription(&paused).await.unwrap();

    let mine = db.get_user_subscriptions(user_id).await.unwrap();
    assert_eq!(mine.len(), 2);

    let all_active = db.list_active_subscriptions().await.unwrap();
    assert!(all_active.iter().any(|s| s.id == active.id));
    assert!(!all_active.iter().any(|s| s.id == paused.id));

    let fetched = db.get_subscription(user_id, active.id).await.unwrap().unwrap();
    assert_eq!(fetched.time_of_day.to_string(), "06:30");
}

// ═══════════════════════════════════════════════════════════════════════════
// OFFLINE
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_offline_store_reports_database_error() {
    let db = skybot::db::FirestoreDb::new_mock();

    let err = db.get_user(1).await.unwrap_err();
    assert!(matches!(err, skybot::error::AppError::Database(_)));
    assert!(db.list_active_subscriptions().await.is_err());
}

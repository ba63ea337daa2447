// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Scheduled delivery tests, driven at fixed instants.

use chrono::{DateTime, TimeZone, Utc};
use skybot::bot::notify::run_tick;
use skybot::db::Store;
use skybot::models::{
    AlertConfig, AlertType, Location, Role, Subscription, SubscriptionType, TimeOfDay, User,
};

mod common;
use common::{create_test_app, create_test_app_with_weather, StubWeather, TestHarness};

const NOW: &str = "2024-06-01T00:00:00Z";

/// 2024-06-03 is a Monday, 2024-06-02 a Sunday.
fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, minute, 0).unwrap()
}

async fn subscriber(h: &TestHarness, id: i64, timezone: &str, kind: SubscriptionType) -> Subscription {
    let mut user = User::new(id, "Sub", Role::User, NOW);
    user.timezone = timezone.to_string();
    user.location = Some(Location {
        name: "Oslo".to_string(),
        lat: 59.91,
        lon: 10.75,
        country: Some("NO".to_string()),
    });
    h.store.upsert_user(&user).await.unwrap();

    let mut sub = Subscription::new(id, kind, NOW);
    sub.time_of_day = TimeOfDay::new(8, 0).unwrap();
    h.store.upsert_subscription(&sub).await.unwrap();
    sub
}

#[tokio::test]
async fn test_daily_delivered_only_at_its_minute() {
    let (_, h) = create_test_app();
    subscriber(&h, 10, "UTC", SubscriptionType::Daily).await;

    let early = run_tick(&h.state, utc(3, 7, 59)).await.unwrap();
    assert_eq!((early.evaluated, early.due, early.sent), (1, 0, 0));

    let on_time = run_tick(&h.state, utc(3, 8, 0)).await.unwrap();
    assert_eq!((on_time.due, on_time.sent, on_time.failed), (1, 1, 0));

    let reply = h.transport.last_reply_to(10).unwrap();
    assert!(reply.text.contains("Good morning"));
    assert!(reply.text.contains("Oslo"));

    let late = run_tick(&h.state, utc(3, 8, 1)).await.unwrap();
    assert_eq!(late.sent, 0);
}

#[tokio::test]
async fn test_delivery_follows_user_timezone() {
    let (_, h) = create_test_app();
    // Oslo is UTC+2 in June
    subscriber(&h, 11, "Europe/Oslo", SubscriptionType::Daily).await;

    assert_eq!(run_tick(&h.state, utc(3, 8, 0)).await.unwrap().sent, 0);
    assert_eq!(run_tick(&h.state, utc(3, 6, 0)).await.unwrap().sent, 1);
}

#[tokio::test]
async fn test_weekly_only_on_sunday() {
    let (_, h) = create_test_app();
    subscriber(&h, 12, "UTC", SubscriptionType::Weekly).await;

    assert_eq!(run_tick(&h.state, utc(3, 8, 0)).await.unwrap().due, 0);
    assert_eq!(run_tick(&h.state, utc(2, 8, 0)).await.unwrap().sent, 1);
}

#[tokio::test]
async fn test_paused_subscription_not_evaluated() {
    let (_, h) = create_test_app();
    let mut sub = subscriber(&h, 13, "UTC", SubscriptionType::Daily).await;
    sub.is_active = false;
    h.store.upsert_subscription(&sub).await.unwrap();

    let summary = run_tick(&h.state, utc(3, 8, 0)).await.unwrap();
    assert_eq!((summary.evaluated, summary.sent), (0, 0));
}

#[tokio::test]
async fn test_alert_digest_sent_when_condition_met() {
    let (_, h) = create_test_app_with_weather(StubWeather::at(33.0));
    subscriber(&h, 14, "UTC", SubscriptionType::Alerts).await;
    // Default temperature alert fires above 30
    let alert = AlertConfig::new(14, AlertType::Temperature, NOW);
    h.store.upsert_alert(&alert).await.unwrap();

    let summary = run_tick(&h.state, utc(3, 8, 0)).await.unwrap();
    assert_eq!(summary.sent, 1);

    let reply = h.transport.last_reply_to(14).unwrap();
    assert!(reply.text.contains("Temperature > 30°C"), "{}", reply.text);

    let stored = h.store.get_alert(14, alert.id).await.unwrap().unwrap();
    assert_eq!(stored.last_triggered.as_deref(), Some("2024-06-03T08:00:00Z"));
}

#[tokio::test]
async fn test_alert_digest_skipped_when_nothing_fires() {
    let (_, h) = create_test_app_with_weather(StubWeather::at(20.0));
    subscriber(&h, 15, "UTC", SubscriptionType::Alerts).await;
    let alert = AlertConfig::new(15, AlertType::Temperature, NOW);
    h.store.upsert_alert(&alert).await.unwrap();

    let summary = run_tick(&h.state, utc(3, 8, 0)).await.unwrap();
    assert_eq!((summary.due, summary.sent), (1, 0));
    assert!(h.transport.sent().is_empty());

    let stored = h.store.get_alert(15, alert.id).await.unwrap().unwrap();
    assert!(stored.last_triggered.is_none());
}

#[tokio::test]
async fn test_extreme_only_in_extreme_weather() {
    let (_, mild) = create_test_app_with_weather(StubWeather::at(20.0));
    subscriber(&mild, 16, "UTC", SubscriptionType::Extreme).await;
    assert_eq!(run_tick(&mild.state, utc(3, 8, 0)).await.unwrap().sent, 0);

    let (_, hot) = create_test_app_with_weather(StubWeather::at(38.0));
    subscriber(&hot, 16, "UTC", SubscriptionType::Extreme).await;
    assert_eq!(run_tick(&hot.state, utc(3, 8, 0)).await.unwrap().sent, 1);
    let reply = hot.transport.last_reply_to(16).unwrap();
    assert!(reply.text.contains("Extreme heat"));
}

#[tokio::test]
async fn test_due_without_location_is_skipped() {
    let (_, h) = create_test_app();
    subscriber(&h, 17, "UTC", SubscriptionType::Daily).await;
    let mut user = h.store.get_user(17).await.unwrap().unwrap();
    user.location = None;
    h.store.upsert_user(&user).await.unwrap();

    let summary = run_tick(&h.state, utc(3, 8, 0)).await.unwrap();
    assert_eq!((summary.due, summary.sent, summary.failed), (1, 0, 0));
}

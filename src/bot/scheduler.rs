// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! "Fire now?" predicate for recurring notifications.
//!
//! # Clock injection
//! Takes the subscriber's local wall-clock time as a parameter instead of
//! reading the clock, so the tick handler converts once per user and tests
//! stay deterministic.

use crate::models::{Subscription, SubscriptionType};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// Day weekly subscriptions are delivered on.
pub const WEEKLY_DELIVERY_DAY: Weekday = Weekday::Sun;

/// Whether `subscription` is due at local time `now`.
///
/// Matching is exact at minute granularity: the caller must evaluate every
/// minute or the delivery for that day is missed. No catch-up is attempted.
pub fn should_notify(subscription: &Subscription, now: NaiveDateTime) -> bool {
    if !subscription.is_active {
        return false;
    }

    let time = subscription.time_of_day;
    if now.hour() != u32::from(time.hour()) || now.minute() != u32::from(time.minute()) {
        return false;
    }

    match subscription.kind {
        SubscriptionType::Weekly => now.weekday() == WEEKLY_DELIVERY_DAY,
        SubscriptionType::Daily | SubscriptionType::Alerts | SubscriptionType::Extreme => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;
    use chrono::NaiveDate;

    fn sub(kind: SubscriptionType, time: &str, active: bool) -> Subscription {
        let mut s = Subscription::new(1, kind, "2024-01-01T00:00:00Z");
        s.time_of_day = time.parse::<TimeOfDay>().unwrap();
        s.is_active = active;
        s
    }

    /// 2024-06-02 is a Sunday.
    fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_inactive_never_fires() {
        for kind in SubscriptionType::ALL {
            let s = sub(kind, "08:00", false);
            for day in 1..=7 {
                for hour in [0, 8, 23] {
                    assert!(!should_notify(&s, at(day, hour, 0, 0)));
                }
            }
        }
    }

    #[test]
    fn test_weekly_only_sunday_exact_minute() {
        let s = sub(SubscriptionType::Weekly, "08:00", true);
        assert!(should_notify(&s, at(2, 8, 0, 0)));
        assert!(!should_notify(&s, at(1, 8, 0, 0))); // Saturday
        assert!(!should_notify(&s, at(2, 8, 1, 0)));
    }

    #[test]
    fn test_seconds_are_ignored() {
        let s = sub(SubscriptionType::Weekly, "08:00", true);
        assert!(should_notify(&s, at(2, 8, 0, 59)));
    }

    #[test]
    fn test_daily_fires_every_day() {
        let s = sub(SubscriptionType::Daily, "21:30", true);
        for day in 1..=7 {
            assert!(should_notify(&s, at(day, 21, 30, 0)));
            assert!(!should_notify(&s, at(day, 21, 29, 0)));
            assert!(!should_notify(&s, at(day, 9, 30, 0)));
        }
    }

    #[test]
    fn test_alerts_and_extreme_behave_like_daily() {
        for kind in [SubscriptionType::Alerts, SubscriptionType::Extreme] {
            let s = sub(kind, "07:15", true);
            assert!(should_notify(&s, at(4, 7, 15, 0)));
            assert!(!should_notify(&s, at(4, 7, 16, 0)));
        }
    }
}

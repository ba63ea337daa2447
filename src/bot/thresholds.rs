// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Candidate threshold values for the alert picker.

use crate::models::AlertType;

/// Picker length bounds.
pub const MIN_OPTIONS: usize = 5;
pub const MAX_OPTIONS: usize = 7;

/// Offsets (in steps) around the current value.
const CENTER_OFFSETS: std::ops::RangeInclusive<i32> = -3..=3;

/// Smallest step of a relative range. Picker values are shown with two
/// decimals, so anything finer would collapse into duplicates.
const MIN_RELATIVE_STEP: f64 = 0.05;

/// Derived `(min, max, step)` for an alert domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ThresholdRange {
    /// Fixed range for the domain, or `[0.8×current, 1.2×current]` with five
    /// steps when the domain has no table entry.
    pub fn for_domain(domain: AlertType, current: f64) -> Self {
        match domain {
            AlertType::Temperature => Self::fixed(-20.0, 40.0, 5.0),
            AlertType::Humidity => Self::fixed(20.0, 90.0, 10.0),
            AlertType::Pressure => Self::fixed(960.0, 1040.0, 10.0),
            AlertType::WindSpeed => Self::fixed(5.0, 50.0, 5.0),
            AlertType::UvIndex => Self::fixed(1.0, 11.0, 1.0),
            AlertType::AirQuality => Self::fixed(50.0, 300.0, 50.0),
            AlertType::Precipitation => Self::relative(current),
        }
    }

    fn fixed(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    fn relative(current: f64) -> Self {
        let (a, b) = (0.8 * current, 1.2 * current);
        let (mut min, mut max) = if a <= b { (a, b) } else { (b, a) };
        // A zero current value would collapse the range.
        if max - min < f64::EPSILON {
            min = current - 1.0;
            max = current + 1.0;
        } else if max - min < MIN_RELATIVE_STEP * 5.0 {
            let half = MIN_RELATIVE_STEP * 2.5;
            min = current - half;
            max = current + half;
        }
        Self {
            min,
            max,
            step: (max - min) / 5.0,
        }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min - 1e-9 && value <= self.max + 1e-9
    }

    /// Round to two decimals without leaving the range.
    fn snap(&self, value: f64) -> f64 {
        let lo = ((self.min * 100.0) - 1e-6).ceil() / 100.0;
        let hi = ((self.max * 100.0) + 1e-6).floor() / 100.0;
        round2(value).max(lo).min(hi)
    }
}

/// Ordered, deduplicated candidate thresholds for a picker.
///
/// First tries `current + k*step` for `k` in `-3..=3`, keeping values inside
/// the range. If fewer than five survive, sweeps upward from `min` instead,
/// stopping at `max` or after seven values. The sweep does not necessarily
/// include `current`.
pub fn options(domain: AlertType, current: f64) -> Vec<f64> {
    let range = ThresholdRange::for_domain(domain, current);

    let mut values: Vec<f64> = CENTER_OFFSETS
        .map(|k| current + f64::from(k) * range.step)
        .filter(|v| range.contains(*v))
        .map(|v| range.snap(v))
        .collect();
    dedup_sorted(&mut values);

    if values.len() >= MIN_OPTIONS {
        return values;
    }

    let mut sweep = Vec::with_capacity(MAX_OPTIONS);
    let mut k = 0.0;
    while sweep.len() < MAX_OPTIONS {
        let v = range.min + k * range.step;
        if !range.contains(v) {
            break;
        }
        sweep.push(range.snap(v));
        k += 1.0;
    }
    dedup_sorted(&mut sweep);
    sweep
}

fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // Avoid "-0" labels.
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

fn dedup_sorted(values: &mut Vec<f64>) {
    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(values: &[f64], min: f64, max: f64) {
        assert!(
            (MIN_OPTIONS..=MAX_OPTIONS).contains(&values.len()),
            "length {} out of bounds: {:?}",
            values.len(),
            values
        );
        assert!(
            values.iter().all(|v| *v >= min - 1e-9 && *v <= max + 1e-9),
            "{:?}",
            values
        );
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{:?}", values);
    }

    #[test]
    fn test_temperature_centered() {
        let values = options(AlertType::Temperature, 25.0);
        assert!(values.contains(&25.0));
        assert_well_formed(&values, -20.0, 40.0);
        assert_eq!(values, vec![10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn test_temperature_near_upper_bound_falls_back_to_sweep() {
        let values = options(AlertType::Temperature, 39.0);
        assert_well_formed(&values, -20.0, 40.0);
        assert_eq!(values, vec![-20.0, -15.0, -10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_fallback_sweep_may_omit_current_value() {
        // Documented behavior: the absolute sweep starts at the range
        // minimum and does not reach a current value near the top.
        let values = options(AlertType::Temperature, 39.0);
        assert!(!values.contains(&39.0));
    }

    #[test]
    fn test_partial_center_kept_when_five_survive() {
        // 30 + {-3..3}*5 -> 15..45, 45 dropped: six values survive.
        let values = options(AlertType::Temperature, 30.0);
        assert_eq!(values, vec![15.0, 20.0, 25.0, 30.0, 35.0, 40.0]);
    }

    #[test]
    fn test_uv_at_lower_bound() {
        let values = options(AlertType::UvIndex, 1.0);
        assert_well_formed(&values, 1.0, 11.0);
        assert!(values.contains(&1.0));
    }

    #[test]
    fn test_air_quality_coarse_step() {
        // 300 + {-3..3}*50 -> 150..450, four in range: sweep from 50.
        let values = options(AlertType::AirQuality, 300.0);
        assert_well_formed(&values, 50.0, 300.0);
        assert_eq!(values, vec![50.0, 100.0, 150.0, 200.0, 250.0, 300.0]);
    }

    #[test]
    fn test_unknown_domain_uses_relative_range() {
        let values = options(AlertType::Precipitation, 10.0);
        assert_well_formed(&values, 8.0, 12.0);
        assert!(values.contains(&10.0));
    }

    #[test]
    fn test_unknown_domain_with_zero_current() {
        let values = options(AlertType::Precipitation, 0.0);
        assert_well_formed(&values, -1.0, 1.0);
    }

    #[test]
    fn test_small_relative_values_keep_five_distinct_options() {
        for current in [0.05, 0.01, 0.004, 0.09] {
            let range = ThresholdRange::for_domain(AlertType::Precipitation, current);
            let values = options(AlertType::Precipitation, current);
            assert_well_formed(&values, range.min, range.max);
        }
    }

    #[test]
    fn test_walking_down_the_picker_never_runs_dry() {
        let mut current = AlertType::Precipitation.default_condition().value;
        for _ in 0..100 {
            let range = ThresholdRange::for_domain(AlertType::Precipitation, current);
            let values = options(AlertType::Precipitation, current);
            assert_well_formed(&values, range.min, range.max);
            current = values[0];
        }
    }

    #[test]
    fn test_relative_range_with_negative_current() {
        let range = ThresholdRange::for_domain(AlertType::Precipitation, -10.0);
        assert!((range.min + 12.0).abs() < 1e-9);
        assert!((range.max + 8.0).abs() < 1e-9);
    }
}

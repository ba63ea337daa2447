// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! Typed weather records returned by the weather provider.

use serde::{Deserialize, Serialize};

/// Result of forward geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
}

/// Current conditions at a point. All values metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub uv_index: Option<f64>,
    /// Rain volume over the last hour (mm)
    pub rain_1h_mm: Option<f64>,
    /// Observation time (unix seconds)
    pub observed_at: i64,
}

/// One forecast step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time (unix seconds, UTC)
    pub at: i64,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    /// Probability of precipitation, 0..1
    pub precipitation_probability: f64,
}

/// Air pollution snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    /// Provider's own 1 (good) .. 5 (very poor) index
    pub index: u8,
    pub pm2_5: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
}

/// EPA PM2.5 breakpoints: (conc_lo, conc_hi, aqi_lo, aqi_hi).
const PM25_BREAKPOINTS: [(f64, f64, f64, f64); 7] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.1, 35.4, 51.0, 100.0),
    (35.5, 55.4, 101.0, 150.0),
    (55.5, 150.4, 151.0, 200.0),
    (150.5, 250.4, 201.0, 300.0),
    (250.5, 350.4, 301.0, 400.0),
    (350.5, 500.4, 401.0, 500.0),
];

impl AirQuality {
    /// US AQI derived from the PM2.5 concentration.
    ///
    /// Air-quality alert thresholds are expressed on this 0..500 scale.
    pub fn us_aqi(&self) -> f64 {
        let c = (self.pm2_5 * 10.0).floor() / 10.0;
        if c <= 0.0 {
            return 0.0;
        }
        for (c_lo, c_hi, i_lo, i_hi) in PM25_BREAKPOINTS {
            if c <= c_hi {
                let c = c.max(c_lo);
                return ((i_hi - i_lo) / (c_hi - c_lo) * (c - c_lo) + i_lo).round();
            }
        }
        500.0
    }
}

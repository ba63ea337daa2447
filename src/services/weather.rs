// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! OpenWeather API client.
//!
//! Handles:
//! - Forward and reverse geocoding
//! - Current conditions and 5-day/3-hour forecast
//! - Air pollution snapshot
//!
//! Calls are made once per request; there is no retry here.

use crate::error::AppError;
use crate::models::{AirQuality, CurrentWeather, ForecastEntry, GeoLocation};
use async_trait::async_trait;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Weather data source used by the bot flows.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Best match for a free-text place name, if any.
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>, AppError>;

    /// Place name for a coordinate pair, if any.
    async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<GeoLocation>, AppError>;

    async fn current(&self, lat: f64, lon: f64, lang: &str) -> Result<CurrentWeather, AppError>;

    async fn forecast(&self, lat: f64, lon: f64, lang: &str)
        -> Result<Vec<ForecastEntry>, AppError>;

    async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality, AppError>;
}

/// OpenWeather client.
#[derive(Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at another host (tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Generic GET with query params and JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Weather(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("OpenWeather rate limit hit (429)");
            }

            return Err(AppError::Weather(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Weather(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>, AppError> {
        let places: Vec<OwmPlace> = self
            .get_json(
                "/geo/1.0/direct",
                &[("q", query.to_string()), ("limit", "1".to_string())],
            )
            .await?;
        Ok(places.into_iter().next().map(OwmPlace::into_location))
    }

    async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<GeoLocation>, AppError> {
        let places: Vec<OwmPlace> = self
            .get_json(
                "/geo/1.0/reverse",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(places.into_iter().next().map(OwmPlace::into_location))
    }

    async fn current(&self, lat: f64, lon: f64, lang: &str) -> Result<CurrentWeather, AppError> {
        let raw: OwmCurrent = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("units", "metric".to_string()),
                    ("lang", lang.to_string()),
                ],
            )
            .await?;

        Ok(CurrentWeather {
            description: first_description(&raw.weather),
            temperature_c: raw.main.temp,
            feels_like_c: raw.main.feels_like,
            humidity_pct: raw.main.humidity,
            pressure_hpa: raw.main.pressure,
            wind_speed_mps: raw.wind.speed,
            uv_index: None,
            rain_1h_mm: raw.rain.and_then(|r| r.one_hour),
            observed_at: raw.dt,
        })
    }

    async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        lang: &str,
    ) -> Result<Vec<ForecastEntry>, AppError> {
        let raw: OwmForecast = self
            .get_json(
                "/data/2.5/forecast",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("units", "metric".to_string()),
                    ("lang", lang.to_string()),
                ],
            )
            .await?;

        Ok(raw
            .list
            .into_iter()
            .map(|step| ForecastEntry {
                at: step.dt,
                description: first_description(&step.weather),
                temperature_c: step.main.temp,
                humidity_pct: step.main.humidity,
                wind_speed_mps: step.wind.speed,
                precipitation_probability: step.pop.unwrap_or(0.0),
            })
            .collect())
    }

    async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality, AppError> {
        let raw: OwmAirPollution = self
            .get_json(
                "/data/2.5/air_pollution",
                &[("lat", lat.to_string()), ("lon", lon.to_string())],
            )
            .await?;

        let sample = raw
            .list
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Weather("empty air pollution response".to_string()))?;

        Ok(AirQuality {
            index: sample.main.aqi,
            pm2_5: sample.components.pm2_5,
            pm10: sample.components.pm10,
            o3: sample.components.o3,
            no2: sample.components.no2,
        })
    }
}

fn first_description(conditions: &[OwmCondition]) -> String {
    conditions
        .first()
        .map(|c| c.description.clone())
        .unwrap_or_default()
}

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OwmPlace {
    name: String,
    lat: f64,
    lon: f64,
    country: Option<String>,
    state: Option<String>,
}

impl OwmPlace {
    fn into_location(self) -> GeoLocation {
        let name = match self.state {
            Some(state) if state != self.name => format!("{}, {}", self.name, state),
            _ => self.name,
        };
        GeoLocation {
            name,
            lat: self.lat,
            lon: self.lon,
            country: self.country,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    weather: Vec<OwmCondition>,
    main: OwmMain,
    wind: OwmWind,
    rain: Option<OwmRain>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OwmForecastStep {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmCondition>,
    wind: OwmWind,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    list: Vec<OwmForecastStep>,
}

#[derive(Debug, Deserialize)]
struct OwmAqiMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwmComponents {
    #[serde(default)]
    pm2_5: f64,
    #[serde(default)]
    pm10: f64,
    #[serde(default)]
    o3: f64,
    #[serde(default)]
    no2: f64,
}

#[derive(Debug, Deserialize)]
struct OwmAirSample {
    main: OwmAqiMain,
    components: OwmComponents,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollution {
    list: Vec<OwmAirSample>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_name_includes_distinct_state() {
        let place = OwmPlace {
            name: "Springfield".to_string(),
            lat: 39.8,
            lon: -89.6,
            country: Some("US".to_string()),
            state: Some("Illinois".to_string()),
        };
        assert_eq!(place.into_location().name, "Springfield, Illinois");

        let place = OwmPlace {
            name: "Berlin".to_string(),
            lat: 52.5,
            lon: 13.4,
            country: Some("DE".to_string()),
            state: Some("Berlin".to_string()),
        };
        assert_eq!(place.into_location().name, "Berlin");
    }

    #[test]
    fn test_current_wire_format() {
        let json = r#"{
            "weather": [{"id": 500, "main": "Rain", "description": "light rain"}],
            "main": {"temp": 12.3, "feels_like": 11.0, "pressure": 1008, "humidity": 81},
            "wind": {"speed": 4.1, "deg": 200},
            "rain": {"1h": 0.4},
            "dt": 1717300000
        }"#;
        let raw: OwmCurrent = serde_json::from_str(json).unwrap();
        assert_eq!(first_description(&raw.weather), "light rain");
        assert_eq!(raw.main.pressure, 1008.0);
        assert_eq!(raw.rain.and_then(|r| r.one_hour), Some(0.4));
    }
}

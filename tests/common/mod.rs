// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

use async_trait::async_trait;
use serde_json::{json, Value};
use skybot::bot::reply::{Attachment, Reply};
use skybot::config::Config;
use skybot::db::{FirestoreDb, MemoryStore};
use skybot::error::AppError;
use skybot::models::{AirQuality, CurrentWeather, ForecastEntry, GeoLocation};
use skybot::routes::create_router;
use skybot::services::telegram::CallbackQuery;
use skybot::services::{ChatTransport, WeatherProvider};
use skybot::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Fixed weather for every coordinate, counting geocoder calls.
#[derive(Default)]
pub struct StubWeather {
    pub temperature_c: f64,
    geocode_calls: AtomicUsize,
    reverse_calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubWeather {
    pub fn at(temperature_c: f64) -> Self {
        Self {
            temperature_c,
            ..Default::default()
        }
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>, AppError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        if query.eq_ignore_ascii_case("nowhere") {
            return Ok(None);
        }
        Ok(Some(GeoLocation {
            name: query.to_string(),
            lat: 59.9139,
            lon: 10.7522,
            country: Some("NO".to_string()),
        }))
    }

    async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<GeoLocation>, AppError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(GeoLocation {
            name: "Oslo".to_string(),
            lat,
            lon,
            country: Some("NO".to_string()),
        }))
    }

    async fn current(&self, _lat: f64, _lon: f64, _lang: &str) -> Result<CurrentWeather, AppError> {
        Ok(CurrentWeather {
            description: "clear sky".to_string(),
            temperature_c: self.temperature_c,
            feels_like_c: self.temperature_c - 1.0,
            humidity_pct: 40.0,
            pressure_hpa: 1015.0,
            wind_speed_mps: 3.0,
            uv_index: None,
            rain_1h_mm: None,
            observed_at: 1717286400,
        })
    }

    async fn forecast(
        &self,
        _lat: f64,
        _lon: f64,
        _lang: &str,
    ) -> Result<Vec<ForecastEntry>, AppError> {
        Ok((0..8)
            .map(|i| ForecastEntry {
                at: 1717286400 + i * 10800,
                description: "clouds".to_string(),
                temperature_c: self.temperature_c + i as f64,
                humidity_pct: 50.0,
                wind_speed_mps: 2.0,
                precipitation_probability: 0.1,
            })
            .collect())
    }

    async fn air_quality(&self, _lat: f64, _lon: f64) -> Result<AirQuality, AppError> {
        Ok(AirQuality {
            index: 2,
            pm2_5: 8.0,
            pm10: 15.0,
            o3: 60.0,
            no2: 10.0,
        })
    }
}

/// Something the bot tried to send.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Sent {
    Message { chat_id: i64, reply: Reply },
    Edit { chat_id: i64, message_id: i64, reply: Reply },
    Document { chat_id: i64, attachment: Attachment },
}

#[allow(dead_code)]
impl Sent {
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Sent::Message { reply, .. } | Sent::Edit { reply, .. } => Some(reply),
            Sent::Document { .. } => None,
        }
    }

    pub fn chat_id(&self) -> i64 {
        match self {
            Sent::Message { chat_id, .. }
            | Sent::Edit { chat_id, .. }
            | Sent::Document { chat_id, .. } => *chat_id,
        }
    }
}

/// Transport that records instead of calling Telegram.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    /// Last text reply sent or edited into `chat_id`.
    pub fn last_reply_to(&self, chat_id: i64) -> Option<Reply> {
        self.sent()
            .into_iter()
            .rev()
            .filter(|s| s.chat_id() == chat_id)
            .find_map(|s| s.reply().cloned())
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(Sent::Message {
            chat_id,
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        reply: &Reply,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(Sent::Edit {
            chat_id,
            message_id,
            reply: reply.clone(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        _query: &CallbackQuery,
        _text: Option<&str>,
    ) -> Result<(), AppError> {
        Ok(())
    }

    async fn send_document(
        &self,
        chat_id: i64,
        attachment: &Attachment,
        _caption: &str,
    ) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(Sent::Document {
            chat_id,
            attachment: attachment.clone(),
        });
        Ok(())
    }
}

/// Handles to the fakes behind a test app.
#[allow(dead_code)]
pub struct TestHarness {
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub weather: Arc<StubWeather>,
    pub transport: Arc<RecordingTransport>,
}

/// Create a test app backed by the memory store and recording fakes.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, TestHarness) {
    create_test_app_with_weather(StubWeather::at(20.0))
}

#[allow(dead_code)]
pub fn create_test_app_with_weather(weather: StubWeather) -> (axum::Router, TestHarness) {
    let store = Arc::new(MemoryStore::new());
    let weather = Arc::new(weather);
    let transport = Arc::new(RecordingTransport::default());

    let state = Arc::new(AppState {
        config: Config::test_default(),
        store: store.clone(),
        weather: weather.clone(),
        transport: transport.clone(),
    });

    let harness = TestHarness {
        state: state.clone(),
        store,
        weather,
        transport,
    };
    (create_router(state), harness)
}

/// Sender as the Bot API describes it.
#[allow(dead_code)]
pub fn tg_user(user_id: i64) -> Value {
    json!({ "id": user_id, "is_bot": false, "first_name": format!("User{}", user_id) })
}

/// Private chat with `user_id`.
#[allow(dead_code)]
pub fn private_chat(user_id: i64) -> Value {
    json!({ "id": user_id, "type": "private", "first_name": format!("User{}", user_id) })
}

/// A message update from `user_id` in its private chat, with `content`
/// fields (`text`, `location`, `venue`, ...) merged in.
#[allow(dead_code)]
pub fn message_update(update_id: i64, user_id: i64, content: Value) -> Value {
    let mut message = json!({
        "message_id": update_id,
        "date": 1717286400,
        "from": tg_user(user_id),
        "chat": private_chat(user_id),
    });
    if let (Some(message), Some(content)) = (message.as_object_mut(), content.as_object()) {
        message.extend(content.clone());
    }
    json!({ "update_id": update_id, "message": message })
}

/// A text message update from `user_id` in its private chat.
#[allow(dead_code)]
pub fn text_update(update_id: i64, user_id: i64, text: &str) -> Value {
    message_update(update_id, user_id, json!({ "text": text }))
}

/// A GPS location shared by `user_id`.
#[allow(dead_code)]
pub fn location_update(update_id: i64, user_id: i64, lat: f64, lon: f64) -> Value {
    message_update(
        update_id,
        user_id,
        json!({ "location": { "latitude": lat, "longitude": lon } }),
    )
}

/// A named place picked by `user_id` in the client's location sheet.
#[allow(dead_code)]
pub fn venue_update(update_id: i64, user_id: i64, title: &str, lat: f64, lon: f64) -> Value {
    message_update(
        update_id,
        user_id,
        json!({
            "venue": {
                "location": { "latitude": lat, "longitude": lon },
                "title": title,
                "address": "Somewhere 1"
            }
        }),
    )
}

/// A button tap update from `user_id` on message 500.
#[allow(dead_code)]
pub fn callback_update(update_id: i64, user_id: i64, data: &str) -> Value {
    json!({
        "update_id": update_id,
        "callback_query": {
            "id": format!("cb{}", update_id),
            "from": tg_user(user_id),
            "message": {
                "message_id": 500,
                "date": 1717286400,
                "chat": private_chat(user_id),
                "text": "menu"
            },
            "chat_instance": format!("ci{}", user_id),
            "data": data
        }
    })
}

/// POST an update to the webhook with the configured secret.
#[allow(dead_code)]
pub fn webhook_request(update: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri("/webhook/telegram")
        .header("content-type", "application/json")
        .header("x-telegram-bot-api-secret-token", "test_webhook_secret")
        .body(axum::body::Body::from(update.to_string()))
        .unwrap()
}

/// Callback data of every button on `reply`.
#[allow(dead_code)]
pub fn buttons(reply: &Reply) -> Vec<String> {
    reply.callback_data().map(str::to_string).collect()
}

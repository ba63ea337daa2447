// SPDX-License-Identifier: MIT
// Copyright 2026 The skybot authors

//! HTTP client tests against a local mock server.

use serde_json::{json, Value};
use skybot::bot::reply::{Button, Reply};
use skybot::services::telegram::CallbackQuery;
use skybot::services::{ChatTransport, OpenWeatherClient, TelegramClient, WeatherProvider};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ═══════════════════════════════════════════════════════════════════════════
// OPENWEATHER
// ═══════════════════════════════════════════════════════════════════════════

fn weather_client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("k".to_string(), server.uri())
}

#[tokio::test]
async fn test_geocode_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .and(query_param("q", "Springfield"))
        .and(query_param("appid", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Springfield", "lat": 39.8, "lon": -89.6, "country": "US", "state": "Illinois" },
            { "name": "Springfield", "lat": 37.2, "lon": -93.3, "country": "US", "state": "Missouri" }
        ])))
        .mount(&server)
        .await;

    let place = weather_client(&server)
        .geocode("Springfield")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(place.name, "Springfield, Illinois");
    assert_eq!(place.country.as_deref(), Some("US"));
    assert!((place.lat - 39.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(weather_client(&server).geocode("zzz").await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_weather_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "description": "ясно" }],
            "main": { "temp": 21.5, "feels_like": 20.9, "pressure": 1012, "humidity": 48 },
            "wind": { "speed": 4.1 },
            "rain": { "1h": 0.3 },
            "dt": 1717286400
        })))
        .mount(&server)
        .await;

    let current = weather_client(&server)
        .current(55.75, 37.62, "ru")
        .await
        .unwrap();
    assert_eq!(current.description, "ясно");
    assert!((current.temperature_c - 21.5).abs() < 1e-9);
    assert_eq!(current.rain_1h_mm, Some(0.3));
    assert_eq!(current.observed_at, 1717286400);
}

#[tokio::test]
async fn test_air_quality_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{
                "main": { "aqi": 3 },
                "components": { "pm2_5": 30.1, "pm10": 40.0, "o3": 70.0, "no2": 12.0 }
            }]
        })))
        .mount(&server)
        .await;

    let air = weather_client(&server).air_quality(1.0, 2.0).await.unwrap();
    assert_eq!(air.index, 3);
    assert!((air.pm2_5 - 30.1).abs() < 1e-9);
}

#[tokio::test]
async fn test_weather_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .forecast(1.0, 2.0, "en")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("401"), "{}", err);
}

// ═══════════════════════════════════════════════════════════════════════════
// TELEGRAM
// ═══════════════════════════════════════════════════════════════════════════

fn telegram_client(server: &MockServer) -> TelegramClient {
    TelegramClient::with_api_url("test-token".to_string(), &server.uri()).unwrap()
}

/// Successful Bot API envelope around a sent message.
fn sent_message() -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 1,
            "date": 1717286400,
            "chat": { "id": 42, "type": "private", "first_name": "Ann" },
            "text": "ok"
        }
    })
}

#[tokio::test]
async fn test_send_message_with_keyboard() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": 42,
            "text": "Set your location to Oslo?",
            "reply_markup": {
                "inline_keyboard": [[
                    { "text": "Yes", "callback_data": "loc_confirm_t_Oslo" },
                    { "text": "No", "callback_data": "loc_ignore" }
                ]]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = Reply::text("Set your location to Oslo?").row(vec![
        Button::new("Yes", "loc", "confirm", &["t", "Oslo"]).unwrap(),
        Button::new("No", "loc", "ignore", &[]).unwrap(),
    ]);
    telegram_client(&server).send_message(42, &reply).await.unwrap();
}

#[tokio::test]
async fn test_edit_not_modified_is_recognised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/editMessageText"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message is not modified: specified new message content and reply markup are exactly the same"
        })))
        .mount(&server)
        .await;

    let err = telegram_client(&server)
        .edit_message(42, 7, &Reply::text("same"))
        .await
        .unwrap_err();
    assert!(err.is_not_modified());
}

#[tokio::test]
async fn test_blocked_by_user_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .mount(&server)
        .await;

    let err = telegram_client(&server)
        .send_message(42, &Reply::text("hi"))
        .await
        .unwrap_err();
    assert!(!err.is_not_modified());
    assert!(err.to_string().contains("blocked"));
}

#[tokio::test]
async fn test_send_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendDocument"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = Reply::text("").attach("export.json", b"{}".to_vec());
    let attachment = reply.attachment.as_ref().unwrap();
    telegram_client(&server)
        .send_document(42, attachment, "export.json")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_answer_callback_with_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/answerCallbackQuery"))
        .and(body_partial_json(json!({ "callback_query_id": "cb1", "text": "Saved" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })))
        .expect(1)
        .mount(&server)
        .await;

    let query: CallbackQuery = serde_json::from_value(json!({
        "id": "cb1",
        "from": { "id": 42, "is_bot": false, "first_name": "Ann" },
        "chat_instance": "1",
        "data": "menu_main"
    }))
    .unwrap();
    telegram_client(&server)
        .answer_callback(&query, Some("Saved"))
        .await
        .unwrap();
}

#[test]
fn test_invalid_api_url_rejected() {
    assert!(TelegramClient::with_api_url("t".to_string(), "not a url").is_err());
}

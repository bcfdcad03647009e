//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::{collections::HashMap, sync::Arc};

use application::{
    ForecastUpdateService, SevereWeatherDetector,
    error::ApplicationError,
    ports::{CityStorePort, ForecastPort},
};
use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::Utc;
use domain::{
    CityInfo, CityName, CitySubscription, ForecastEntry, ForecastSnapshot, UserId,
    WeatherDescriptor,
};
use infrastructure::{AppConfig, DatabaseConfig, SqliteCityStore, create_pool};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::{Value, json};
use tokio::sync::RwLock;

/// Forecast provider answering from a fixed table
struct FakeForecasts {
    forecasts: RwLock<HashMap<String, Result<ForecastSnapshot, (u16, String)>>>,
    available: bool,
}

impl FakeForecasts {
    fn new() -> Self {
        Self {
            forecasts: RwLock::new(HashMap::new()),
            available: true,
        }
    }

    fn unavailable() -> Self {
        Self {
            forecasts: RwLock::new(HashMap::new()),
            available: false,
        }
    }

    async fn set(&self, city: &str, result: Result<ForecastSnapshot, (u16, String)>) {
        self.forecasts.write().await.insert(city.to_string(), result);
    }
}

#[async_trait]
impl ForecastPort for FakeForecasts {
    async fn fetch_forecast(&self, city: &CityName) -> Result<ForecastSnapshot, ApplicationError> {
        match self.forecasts.read().await.get(city.as_str()) {
            Some(Ok(snapshot)) => Ok(snapshot.clone()),
            Some(Err((status, body))) => Err(ApplicationError::fetch(*status, body.clone())),
            None => Err(ApplicationError::fetch(
                404,
                r#"{"cod":"404","message":"city not found"}"#,
            )),
        }
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

/// Store whose every operation fails
struct BrokenStore;

#[async_trait]
impl CityStorePort for BrokenStore {
    async fn list_cities(&self, _user_id: &UserId) -> Result<Vec<CityName>, ApplicationError> {
        Err(ApplicationError::Store("database is locked".into()))
    }

    async fn save_snapshot(
        &self,
        _user_id: &UserId,
        _city: &CityName,
        _snapshot: &ForecastSnapshot,
    ) -> Result<CitySubscription, ApplicationError> {
        Err(ApplicationError::Store("database is locked".into()))
    }

    async fn get_subscription(
        &self,
        _user_id: &UserId,
        _city: &CityName,
    ) -> Result<Option<CitySubscription>, ApplicationError> {
        Err(ApplicationError::Store("database is locked".into()))
    }

    async fn is_healthy(&self) -> bool {
        false
    }
}

fn entry(timestamp: i64, description: &str) -> ForecastEntry {
    ForecastEntry {
        timestamp,
        temperature: 27.0,
        feels_like: 29.0,
        temp_min: 26.0,
        temp_max: 28.0,
        pressure: 1009,
        humidity: 80,
        wind_speed: 5.0,
        wind_direction: 140,
        wind_gust: None,
        cloud_cover: 90,
        visibility: Some(8000),
        precipitation_probability: 0.9,
        rain_3h: Some(10.0),
        snow_3h: None,
        conditions: vec![WeatherDescriptor {
            id: 502,
            main: "Rain".to_string(),
            description: description.to_string(),
            icon: "10d".to_string(),
        }],
    }
}

/// A snapshot with one entry now and one a day later
fn snapshot(city: &str, today_description: &str) -> ForecastSnapshot {
    let now = Utc::now().timestamp();
    ForecastSnapshot {
        city: CityInfo {
            id: Some(1),
            name: city.to_string(),
            country: "BR".to_string(),
            coordinates: None,
            utc_offset_secs: 0,
            population: None,
            sunrise: None,
            sunset: None,
        },
        entries: vec![
            entry(now, today_description),
            entry(now + 86_400, "chuva forte"),
        ],
    }
}

fn memory_store() -> Arc<SqliteCityStore> {
    let pool = create_pool(&DatabaseConfig::at_path(":memory:")).expect("Failed to create pool");
    Arc::new(SqliteCityStore::new(Arc::new(pool)))
}

fn create_state(forecasts: Arc<FakeForecasts>, store: Arc<dyn CityStorePort>) -> AppState {
    let service = ForecastUpdateService::new(
        forecasts,
        store,
        SevereWeatherDetector::with_defaults().expect("Default keywords are valid"),
    );
    AppState {
        update_service: Arc::new(service),
        config: Arc::new(AppConfig::default()),
    }
}

fn create_test_server() -> (TestServer, Arc<FakeForecasts>, Arc<SqliteCityStore>) {
    let forecasts = Arc::new(FakeForecasts::new());
    let store = memory_store();
    let state = create_state(Arc::clone(&forecasts), Arc::clone(&store) as Arc<dyn CityStorePort>);
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    (server, forecasts, store)
}

fn create_broken_test_server() -> TestServer {
    let state = create_state(Arc::new(FakeForecasts::unavailable()), Arc::new(BrokenStore));
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn root_returns_banner() {
    let (server, _, _) = create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "Servidor Backend está rodando!");
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (server, _, _) = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn readiness_endpoint_returns_ready_when_healthy() {
    let (server, _, _) = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["store"]["healthy"], true);
    assert_eq!(body["weather"]["healthy"], true);
}

#[tokio::test]
async fn readiness_endpoint_returns_unavailable_when_unhealthy() {
    let server = create_broken_test_server();

    let response = server.get("/ready").await;

    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert_eq!(body["ready"], false);
    assert_eq!(body["store"]["healthy"], false);
}

// ============ Request ID Tests ============

#[tokio::test]
async fn response_carries_generated_request_id() {
    let (server, _, _) = create_test_server();

    let response = server.get("/health").await;

    let id = response
        .headers()
        .get("x-request-id")
        .expect("Request id header missing");
    assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn caller_request_id_is_echoed() {
    let (server, _, _) = create_test_server();

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("mobile-sync-42"),
        )
        .await;

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "mobile-sync-42"
    );
}

// ============ Verify City Tests ============

#[tokio::test]
async fn verify_city_returns_and_saves_forecast() {
    let (server, forecasts, store) = create_test_server();
    forecasts
        .set("Recife", Ok(snapshot("Recife", "nublado")))
        .await;

    let response = server
        .post("/verify/city/Recife")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["exists"], true);
    assert_eq!(body["data"]["city"]["name"], "Recife");
    assert_eq!(body["data"]["entries"].as_array().unwrap().len(), 2);

    let cities = store
        .list_cities(&UserId::parse("user-1").unwrap())
        .await
        .unwrap();
    assert_eq!(cities, vec![CityName::parse("Recife").unwrap()]);
}

#[tokio::test]
async fn verify_city_decodes_path_segment() {
    let (server, forecasts, _) = create_test_server();
    forecasts
        .set("São Paulo", Ok(snapshot("São Paulo", "nublado")))
        .await;

    let response = server
        .post("/verify/city/S%C3%A3o%20Paulo")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["city"]["name"], "São Paulo");
}

#[tokio::test]
async fn verify_unknown_city_passes_through_upstream_404() {
    let (server, _, store) = create_test_server();

    let response = server
        .post("/verify/city/Atlantida")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["exists"], false);
    assert_eq!(body["error"]["message"], "city not found");

    let cities = store
        .list_cities(&UserId::parse("user-1").unwrap())
        .await
        .unwrap();
    assert!(cities.is_empty());
}

#[tokio::test]
async fn verify_city_passes_through_upstream_401() {
    let (server, forecasts, _) = create_test_server();
    forecasts
        .set(
            "Recife",
            Err((401, r#"{"cod":401,"message":"Invalid API key"}"#.to_string())),
        )
        .await;

    let response = server
        .post("/verify/city/Recife")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid API key");
}

#[tokio::test]
async fn verify_city_without_user_is_bad_request() {
    let (server, _, _) = create_test_server();

    let response = server.post("/verify/city/Recife").json(&json!({})).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["exists"], false);
    assert_eq!(
        body["error"],
        "Parâmetros inválidos. userId e city são obrigatórios."
    );
}

#[tokio::test]
async fn verify_city_without_body_is_bad_request() {
    let (server, _, _) = create_test_server();

    let response = server.post("/verify/city/Recife").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn verify_blank_city_is_bad_request() {
    let (server, _, _) = create_test_server();

    let response = server
        .post("/verify/city/%20%20")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn verify_city_store_failure_is_internal_error() {
    let forecasts = Arc::new(FakeForecasts::new());
    forecasts
        .set("Recife", Ok(snapshot("Recife", "nublado")))
        .await;
    let state = create_state(forecasts, Arc::new(BrokenStore));
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server
        .post("/verify/city/Recife")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["exists"], false);
    assert_eq!(body["error"], "Erro interno no servidor");
}

// ============ Notification Tests ============

#[tokio::test]
async fn notification_without_cities_returns_empty_alerts() {
    let (server, _, _) = create_test_server();

    let response = server
        .post("/verify/notification")
        .json(&json!({ "userId": "new-user" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Nenhuma cidade registrada para este usuário.");
    assert!(body["alerts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn notification_returns_alerts_for_today() {
    let (server, forecasts, _) = create_test_server();
    forecasts
        .set("Recife", Ok(snapshot("Recife", "chuva forte")))
        .await;
    forecasts
        .set("Natal", Ok(snapshot("Natal", "céu limpo")))
        .await;

    for city in ["Recife", "Natal"] {
        server
            .post(&format!("/verify/city/{city}"))
            .json(&json!({ "userId": "user-1" }))
            .await
            .assert_status_ok();
    }

    let response = server
        .post("/verify/notification")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Atualização e verificação concluídas.");

    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["cityName"], "Recife");
    assert_eq!(alerts[0]["alert"], "Previsão de chuva forte hoje.");
    assert_eq!(alerts[0]["details"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn notification_skips_city_whose_fetch_fails() {
    let (server, forecasts, _) = create_test_server();
    forecasts
        .set("Recife", Ok(snapshot("Recife", "chuva forte")))
        .await;
    forecasts
        .set("Belém", Ok(snapshot("Belém", "tempestade")))
        .await;

    for city in ["Recife", "Bel%C3%A9m"] {
        server
            .post(&format!("/verify/city/{city}"))
            .json(&json!({ "userId": "user-1" }))
            .await
            .assert_status_ok();
    }

    forecasts
        .set("Belém", Err((503, "unavailable".to_string())))
        .await;

    let response = server
        .post("/verify/notification")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["cityName"], "Recife");
}

#[tokio::test]
async fn notification_without_user_is_bad_request() {
    let (server, _, _) = create_test_server();

    let response = server.post("/verify/notification").json(&json!({})).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Parâmetro inválido. userId é obrigatório.");
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn notification_store_failure_is_internal_error() {
    let server = create_broken_test_server();

    let response = server
        .post("/verify/notification")
        .json(&json!({ "userId": "user-1" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Erro interno no servidor");
    assert_eq!(body["code"], "internal_error");
}

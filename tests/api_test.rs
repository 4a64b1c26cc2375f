//! HTTP API Integration Tests
//!
//! インメモリリポジトリを使ってHTTPエンドポイント全体を検証する

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

use sensorhub::adapter::repositories::in_memory_reading_repository::InMemoryReadingRepository;
use sensorhub::domain::entities::sensor_reading::{SensorReading, StoredReading};
use sensorhub::domain::repositories::reading_repository::ReadingRepository;
use sensorhub::driver::http::AppState;
use sensorhub::driver::server::serve;

/// テスト用サーバーを空きポートで起動し、ベースURLを返す
async fn spawn_app(repository: Arc<dyn ReadingRepository>, default_limit: u32) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(repository, default_limit);

    tokio::spawn(serve(listener, state, std::future::pending()));

    format!("http://{}", addr)
}

async fn spawn_in_memory() -> (String, Arc<InMemoryReadingRepository>) {
    let repository = Arc::new(InMemoryReadingRepository::new());
    let base_url = spawn_app(repository.clone(), 100).await;
    (base_url, repository)
}

fn environmental_payload(device_id: &str, timestamp: i64) -> Value {
    json!({
        "deviceId": device_id,
        "timestamp": timestamp,
        "values": {
            "solarRadiationMax": 820, "solarRadiationMin": 0, "solarRadiationAvg": 410,
            "uvIndexMax": 8.1, "uvIndexMin": 0.0, "uvIndexAvg": 3.4,
            "temperatureMax": 29.5, "temperatureMin": 17.2, "temperatureAvg": 23.0,
            "humidityMax": 88.0, "humidityMin": 41.0, "humidityAvg": 63.5
        }
    })
}

fn traffic_payload(device_id: &str, timestamp: i64) -> Value {
    json!({
        "deviceId": device_id,
        "timestamp": timestamp,
        "values": {"peaton": 4, "bicicleta": 2, "carro": 30, "moto": 7, "bus": 1, "camion": 3}
    })
}

fn weather_payload(device_id: &str, timestamp: i64) -> Value {
    json!({
        "deviceId": device_id,
        "timestamp": timestamp,
        "values": {"rainTicks": 0.5, "windSpeedMax": 14, "windSpeedMin": 2, "windSpeedAvg": 7, "windDirectionAvg": 225}
    })
}

fn air_quality_payload(device_id: &str, timestamp: i64) -> Value {
    json!({
        "deviceId": device_id,
        "timestamp": timestamp,
        "values": {
            "massPM2_5Max": 15.2, "massPM2_5Min": 4.1, "massPM2_5Avg": 8.3,
            "massPM10_0Max": 25.0, "massPM10_0Min": 7.5, "massPM10_0Avg": 13.9,
            "noiseMax": 72.0, "noiseMin": 38.5, "noiseAvg": 51.2
        }
    })
}

#[tokio::test]
async fn test_root_reports_status() {
    let (base_url, _) = spawn_in_memory().await;

    let response = reqwest::get(format!("{}/", base_url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn test_environmental_ingest_then_query_round_trips_timestamp() {
    let (base_url, _) = spawn_in_memory().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/environmental-data/", base_url))
        .json(&environmental_payload("env-42", 1_700_000_000_000))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let ack: Value = response.json().await.unwrap();
    assert_eq!(ack, json!({"status": "success", "deviceId": "env-42"}));

    let response = client
        .get(format!("{}/data/env-42", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Value> = response.json().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["timestamp"], 1_700_000_000_000_i64);
    assert_eq!(items[0]["deviceId"], "env-42");
    assert_eq!(items[0]["data_type"], "environmental");
    assert_eq!(items[0]["values"]["humidityAvg"], 63.5);
    assert!(items[0]["_id"].is_string());
}

#[tokio::test]
async fn test_every_category_is_tagged() {
    let (base_url, repository) = spawn_in_memory().await;
    let client = reqwest::Client::new();

    let cases = [
        ("traffic-data", traffic_payload("multi", 1), "traffic"),
        ("environmental-data", environmental_payload("multi", 2), "environmental"),
        ("weather-data", weather_payload("multi", 3), "weather"),
        ("airquality-data", air_quality_payload("multi", 4), "air_quality"),
    ];

    for (path, payload, _) in &cases {
        let response = client
            .post(format!("{}/{}/", base_url, path))
            .json(payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "POST /{}/", path);
    }
    assert_eq!(repository.len(), 4);

    let items: Vec<Value> = client
        .get(format!("{}/data/multi", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // 新しい順なので逆順に並ぶ
    let tags: Vec<&str> = items.iter().map(|i| i["data_type"].as_str().unwrap()).collect();
    let expected: Vec<&str> = cases.iter().rev().map(|(_, _, tag)| *tag).collect();
    assert_eq!(tags, expected);
}

#[tokio::test]
async fn test_ingest_without_trailing_slash() {
    let (base_url, repository) = spawn_in_memory().await;

    let response = reqwest::Client::new()
        .post(format!("{}/weather-data", base_url))
        .json(&weather_payload("wx-9", 10))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(repository.len(), 1);
}

#[tokio::test]
async fn test_shape_mismatch_is_rejected() {
    let (base_url, repository) = spawn_in_memory().await;
    let client = reqwest::Client::new();

    let mut missing_field = traffic_payload("cam-1", 1);
    missing_field["values"].as_object_mut().unwrap().remove("camion");

    let mut wrong_type = traffic_payload("cam-1", 1);
    wrong_type["timestamp"] = json!("yesterday");

    for payload in [missing_field, wrong_type, json!({"deviceId": "cam-1"})] {
        let response = client
            .post(format!("{}/traffic-data/", base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].is_string());
    }

    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (base_url, repository) = spawn_in_memory().await;

    let response = reqwest::Client::new()
        .post(format!("{}/traffic-data/", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_unrepresentable_timestamp_is_rejected() {
    let (base_url, repository) = spawn_in_memory().await;

    let response = reqwest::Client::new()
        .post(format!("{}/traffic-data/", base_url))
        .json(&traffic_payload("cam-1", i64::MAX))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn test_query_unknown_device_is_not_found() {
    let (base_url, _) = spawn_in_memory().await;

    let response = reqwest::get(format!("{}/data/ghost", base_url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Device not found");
}

#[tokio::test]
async fn test_query_limit_and_descending_order() {
    let (base_url, _) = spawn_in_memory().await;
    let client = reqwest::Client::new();

    for timestamp in [1_000, 5_000, 3_000, 4_000, 2_000] {
        let response = client
            .post(format!("{}/traffic-data/", base_url))
            .json(&traffic_payload("cam-7", timestamp))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let items: Vec<Value> = client
        .get(format!("{}/data/cam-7?limit=3", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let timestamps: Vec<i64> = items.iter().map(|i| i["timestamp"].as_i64().unwrap()).collect();
    assert_eq!(timestamps, vec![5_000, 4_000, 3_000]);
}

#[tokio::test]
async fn test_query_uses_configured_default_limit() {
    let repository = Arc::new(InMemoryReadingRepository::new());
    let base_url = spawn_app(repository, 2).await;
    let client = reqwest::Client::new();

    for timestamp in 1..=4 {
        client
            .post(format!("{}/weather-data/", base_url))
            .json(&weather_payload("wx-1", timestamp))
            .send()
            .await
            .unwrap();
    }

    let items: Vec<Value> = client
        .get(format!("{}/data/wx-1", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn test_query_invalid_limit_is_rejected() {
    let (base_url, _) = spawn_in_memory().await;

    for query in ["limit=0", "limit=-1", "limit=many"] {
        let response = reqwest::get(format!("{}/data/cam-1?{}", base_url, query))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", query);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (base_url, _) = spawn_in_memory().await;

    let response = reqwest::get(format!("{}/humidity-data/", base_url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_reports_detail() {
    let (base_url, _) = spawn_in_memory().await;

    let response = reqwest::get(format!("{}/traffic-data/", base_url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["detail"], "Method Not Allowed");
}

#[tokio::test]
async fn test_non_utf8_device_id_reports_detail() {
    let (base_url, _) = spawn_in_memory().await;

    let response = reqwest::get(format!("{}/data/%FF", base_url)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("UTF-8"));
}

/// 常に失敗するストア
struct BrokenRepository;

#[async_trait]
impl ReadingRepository for BrokenRepository {
    async fn insert(&self, _reading: &SensorReading) -> Result<String> {
        anyhow::bail!("store unavailable")
    }

    async fn find_recent(&self, _device_id: &str, _limit: u32) -> Result<Vec<StoredReading>> {
        anyhow::bail!("store unavailable")
    }

    async fn ping(&self) -> Result<()> {
        anyhow::bail!("store unavailable")
    }
}

#[tokio::test]
async fn test_storage_failures_are_internal_errors() {
    let base_url = spawn_app(Arc::new(BrokenRepository), 100).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/traffic-data/", base_url))
        .json(&traffic_payload("cam-1", 1))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("store unavailable"));

    let response = client
        .get(format!("{}/data/cam-1", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

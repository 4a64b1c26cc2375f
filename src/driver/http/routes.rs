//! HTTP Routes
//!
//! Router construction and request handlers

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::error::ApiError;
use crate::application::dto::responses::{IngestAck, ReadingView, ServiceInfo};
use crate::application::use_cases::ingest_reading::IngestReadingUseCase;
use crate::application::use_cases::query_readings::QueryReadingsUseCase;
use crate::domain::entities::sensor_data::{
    AirQualityValues, CategoryValues, EnvironmentalValues, SensorData, TrafficValues,
    WeatherValues,
};
use crate::domain::repositories::reading_repository::ReadingRepository;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    ingest: Arc<IngestReadingUseCase<dyn ReadingRepository>>,
    query: Arc<QueryReadingsUseCase<dyn ReadingRepository>>,
    default_query_limit: u32,
}

impl AppState {
    pub fn new(repository: Arc<dyn ReadingRepository>, default_query_limit: u32) -> Self {
        Self {
            ingest: Arc::new(IngestReadingUseCase::new(repository.clone())),
            query: Arc::new(QueryReadingsUseCase::new(repository)),
            default_query_limit,
        }
    }
}

/// Build the application router
///
/// Ingest routes answer with and without the trailing slash.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(root_handler))
        .route("/data/:device_id", get(device_data_handler));

    let router = with_ingest_route::<TrafficValues>(router);
    let router = with_ingest_route::<EnvironmentalValues>(router);
    let router = with_ingest_route::<WeatherValues>(router);
    let router = with_ingest_route::<AirQualityValues>(router);

    router
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn with_ingest_route<V: CategoryValues>(router: Router<AppState>) -> Router<AppState> {
    let path = V::CATEGORY.ingest_path();
    router
        .route(path, post(ingest_handler::<V>))
        .route(path.trim_end_matches('/'), post(ingest_handler::<V>))
}

/// GET /
async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo::running())
}

/// POST /{category}-data/
async fn ingest_handler<V: CategoryValues>(
    State(state): State<AppState>,
    payload: Result<Json<SensorData<V>>, JsonRejection>,
) -> Result<(StatusCode, Json<IngestAck>), ApiError> {
    let Json(payload) = payload?;
    let ack = state.ingest.execute(payload).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

#[derive(Debug, Deserialize)]
struct DeviceDataParams {
    limit: Option<i64>,
}

/// GET /data/{device_id}?limit=N
async fn device_data_handler(
    State(state): State<AppState>,
    device_id: Result<Path<String>, PathRejection>,
    params: Result<Query<DeviceDataParams>, QueryRejection>,
) -> Result<Json<Vec<ReadingView>>, ApiError> {
    let Path(device_id) = device_id?;
    let Query(params) = params?;
    let limit = params
        .limit
        .unwrap_or_else(|| i64::from(state.default_query_limit));

    let readings = state.query.execute(&device_id, limit).await?;
    Ok(Json(readings))
}

async fn not_found_handler() -> ApiError {
    ApiError::not_found("Not Found")
}

async fn method_not_allowed_handler() -> ApiError {
    ApiError::method_not_allowed()
}

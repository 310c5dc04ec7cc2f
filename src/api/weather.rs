use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, AppState, CityQuery};
use crate::models::SearchRecord;
use crate::services::WeatherError;

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        match err {
            WeatherError::MissingParameter => Self::missing_city(),
            WeatherError::Upstream { status, message } => Self::Upstream { status, message },
            WeatherError::Database(msg) => Self::DatabaseError(msg),
            WeatherError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// Current conditions for a city, straight from the provider.
///
/// # Endpoint
/// `GET /api/weather?city=<name>`
///
/// Successful lookups are recorded in search history.
pub async fn get_current_weather(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let payload = state
        .weather_service()
        .current_weather(query.city.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(payload))
}

/// `GET /api/weather/forecast?city=<name>`
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let payload = state
        .weather_service()
        .forecast(query.city.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(payload))
}

/// `GET /api/weather/history`
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SearchRecord>>, ApiError> {
    let history = state.weather_service().history().await?;
    Ok(Json(history))
}

pub async fn root() -> &'static str {
    "Server running"
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::domain::Store;
use crate::error::ApiError;
use crate::routes::AppState;
use crate::services::StorePayload;

use super::json_object;

/// POST /api/v1/stores - create a store. Bearer token required.
pub async fn create_store(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Store> {
    state.auth.authorize(&headers)?;

    let map = json_object(body)?;
    if map.is_empty() {
        return Err(ApiError::invalid_request("Request body cannot be empty"));
    }

    let payload: StorePayload = serde_json::from_value(Value::Object(map))
        .map_err(|e| ApiError::invalid_request(format!("Malformed store payload: {}", e)))?;

    let store = state.service.create_store(payload).await?;
    Ok(ApiResponse::created(store))
}

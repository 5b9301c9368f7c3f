use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::domain::Store;
use crate::error::ApiError;
use crate::routes::AppState;
use crate::services::StorePayload;

use super::{json_object, match_id_segment, parse_id_param};

/// PUT /api/v1/stores/:id - full replace. Bearer token required; every field
/// is overwritten, so the payload is validated as a complete store.
pub async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Store> {
    match_id_segment(&id)?;
    state.auth.authorize(&headers)?;

    let id = parse_id_param(&id)?;
    let map = json_object(body)?;

    let payload: StorePayload = serde_json::from_value(Value::Object(map))
        .map_err(|e| ApiError::invalid_request(format!("Malformed store payload: {}", e)))?;

    let store = state.service.update_store(id, payload).await?;
    Ok(ApiResponse::success(store))
}

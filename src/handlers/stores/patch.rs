use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::Value;

use crate::api::{ApiResponse, ApiResult};
use crate::domain::Store;
use crate::error::ApiError;
use crate::routes::AppState;
use crate::services::StorePatch;

use super::{json_object, match_id_segment, parse_id_param};

/// PATCH /api/v1/stores/:id - partial update. Bearer token required; only
/// the supplied fields are validated and applied.
pub async fn patch_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Store> {
    match_id_segment(&id)?;
    state.auth.authorize(&headers)?;

    let id = parse_id_param(&id)?;
    let map = json_object(body)?;
    if map.is_empty() {
        return Err(ApiError::invalid_request("Request body cannot be empty"));
    }

    let patch: StorePatch = serde_json::from_value(Value::Object(map))
        .map_err(|e| ApiError::invalid_request(format!("Malformed store payload: {}", e)))?;

    let store = state.service.patch_store(id, patch).await?;
    Ok(ApiResponse::success(store))
}

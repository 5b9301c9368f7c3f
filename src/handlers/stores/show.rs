use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::domain::Store;
use crate::routes::AppState;

use super::parse_id_param;

/// GET /api/v1/stores/:id - fetch a single store. Public; no auth gate.
pub async fn show_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Store> {
    let id = parse_id_param(&id)?;
    let store = state.service.get_store(id).await?;
    Ok(ApiResponse::success(store))
}

use axum::extract::{Path, State};
use axum::http::HeaderMap;

use crate::api::{ApiResponse, ApiResult};
use crate::routes::AppState;

use super::{match_id_segment, parse_id_param};

/// DELETE /api/v1/stores/:id - remove a store. Bearer token required.
/// Success is an empty 204; an absent id fails not-found at the service.
pub async fn delete_store(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<()> {
    match_id_segment(&id)?;
    state.auth.authorize(&headers)?;

    let id = parse_id_param(&id)?;
    state.service.delete_store(id).await?;
    Ok(ApiResponse::no_content())
}

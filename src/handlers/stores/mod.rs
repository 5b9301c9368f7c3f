mod create;
mod delete;
mod list;
mod patch;
mod show;
mod update;

pub use create::create_store;
pub use delete::delete_store;
pub use list::list_stores;
pub use patch::patch_store;
pub use show::show_store;
pub use update::update_store;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Routing-level constraint on the `{id}` segment: decimal digits only. Any
/// other token is a 404, decided before the auth gate or controller logic.
pub(crate) fn match_id_segment(raw: &str) -> Result<(), ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::not_found("Route not found"));
    }
    Ok(())
}

/// Controller-level id extraction. A digit-only token that is still not a
/// usable positive id (zero, or too large for i64) is a 400.
pub(crate) fn parse_id_param(raw: &str) -> Result<i64, ApiError> {
    match_id_segment(raw)?;
    let id: i64 = raw.parse().map_err(|_| ApiError::invalid_id("Invalid store ID"))?;
    if id <= 0 {
        return Err(ApiError::invalid_id("Invalid store ID"));
    }
    Ok(id)
}

/// Transport-level body checks shared by the mutating handlers: the body
/// must parse as JSON and be an object.
pub(crate) fn json_object(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Map<String, Value>, ApiError> {
    let Json(value) = body.map_err(|_| ApiError::invalid_json("Invalid JSON payload"))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::invalid_request("Request body must be a JSON object")),
    }
}

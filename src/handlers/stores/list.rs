use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::database::filter::SortDirection;
use crate::routes::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
    pub country: Option<String>,
    pub is_active: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// GET /api/v1/stores - list stores with optional exact-match filters and a
/// single sort key. Public; no auth gate.
pub async fn list_stores(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Value> {
    let mut filters = Vec::new();
    if let Some(city) = query.city {
        filters.push(("city".to_string(), Value::String(city)));
    }
    if let Some(country) = query.country {
        filters.push(("country".to_string(), Value::String(country)));
    }
    if let Some(raw) = query.is_active {
        filters.push(("is_active".to_string(), Value::Bool(coerce_bool(&raw))));
    }

    let mut sort = Vec::new();
    if let Some(field) = query.sort {
        let direction = query
            .direction
            .as_deref()
            .map(SortDirection::parse)
            .unwrap_or(SortDirection::Asc);
        sort.push((field, direction));
    }

    let items = state.service.list_stores(filters, sort).await?;

    // Snapshot, not real pagination: the whole result set is one page.
    let count = items.len();
    Ok(ApiResponse::success(json!({
        "items": items,
        "pagination": {
            "total": count,
            "per_page": count,
            "current_page": 1,
            "last_page": 1,
        },
    })))
}

/// Truthy strings coerce to true, everything else to false.
fn coerce_bool(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes")
}

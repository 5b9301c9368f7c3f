use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::envelope;
use crate::api::ApiResponse;
use crate::auth::AuthGate;
use crate::database::manager;
use crate::error::ApiError;
use crate::handlers::stores;
use crate::services::StoreService;

/// Everything the handlers need, wired by constructor injection at startup.
#[derive(Clone)]
pub struct AppState {
    pub service: StoreService,
    pub auth: AuthGate,
    pub pool: PgPool,
}

/// The full route table. Unknown paths fall back to 404; known paths with an
/// unsupported method fall back to 405. Neither reaches a handler or the
/// auth gate.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/stores",
            get(stores::list_stores)
                .post(stores::create_store)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/stores/:id",
            get(stores::show_store)
                .put(stores::update_store)
                .patch(stores::patch_store)
                .delete(stores::delete_store)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}

/// GET /health - liveness plus a database ping.
async fn health(State(state): State<AppState>) -> axum::response::Response {
    match manager::health_check(&state.pool).await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "database": "ok",
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            let body = envelope::error_body("SERVICE_UNAVAILABLE", "database unavailable", None);
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

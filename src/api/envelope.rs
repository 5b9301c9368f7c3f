use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Wrapper that renders any serializable payload in the uniform success
/// envelope: `{status: "success", data, meta: {timestamp, request_id}}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data, status_code: None }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { data, status_code: Some(status_code) }
    }

    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }
}

impl ApiResponse<()> {
    pub fn no_content() -> Self {
        Self::with_status((), StatusCode::NO_CONTENT)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        if status == StatusCode::NO_CONTENT {
            return status.into_response();
        }

        let data = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("failed to serialize response data: {}", e);
                let body = error_body("INTERNAL_ERROR", "Failed to format response", None);
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        (status, Json(success_body(data))).into_response()
    }
}

/// Response metadata: ISO-8601 timestamp plus a fresh opaque request id.
fn meta() -> Value {
    json!({
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        "request_id": Uuid::new_v4().to_string(),
    })
}

pub fn success_body(data: Value) -> Value {
    json!({
        "status": "success",
        "data": data,
        "meta": meta(),
    })
}

pub fn error_body(code: &str, message: &str, details: Option<Value>) -> Value {
    let mut error = json!({
        "code": code,
        "message": message,
    });
    if let Some(details) = details {
        error["details"] = details;
    }
    json!({
        "status": "error",
        "error": error,
        "meta": meta(),
    })
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::error;

pub const MSG_PEOPLE_HEADER: &str = "people id absent or invalid";
pub const MSG_BAD_REQUEST: &str = "bad request";
pub const MSG_NOT_FOUND: &str = "resource not found";
pub const MSG_DUPLICATE: &str = "resource already exists";
pub const MSG_INTERNAL: &str = "internal error";

/// Error response rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, MSG_BAD_REQUEST)
    }

    pub fn precondition_failed() -> Self {
        Self::new(StatusCode::PRECONDITION_FAILED, MSG_PEOPLE_HEADER)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"message": self.message}))).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, MSG_NOT_FOUND),
            ServiceError::DuplicateValue(_) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, MSG_DUPLICATE),
            ServiceError::Model(_) => Self::bad_request(),
            other => {
                error!(error = %other, "draft store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
            }
        }
    }
}

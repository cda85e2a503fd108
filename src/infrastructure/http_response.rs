// HTTP response utilities for pipeline errors
use crate::domain::error::AdviceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Wraps an `AdviceError` so every flow maps failures the same way.
#[derive(Debug)]
pub struct ApiError(pub AdviceError);

impl From<AdviceError> for ApiError {
    fn from(err: AdviceError) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &AdviceError) -> StatusCode {
    match err {
        AdviceError::DataSource(_) => StatusCode::SERVICE_UNAVAILABLE,
        AdviceError::Schema(_) | AdviceError::InsufficientData(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AdviceError::EmptyQuestion | AdviceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        AdviceError::GenerationService(_) => StatusCode::BAD_GATEWAY,
        AdviceError::MissingContext { .. } | AdviceError::Configuration(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_internal() {
            tracing::error!(error = %err, "Internal error while handling request");
        } else {
            tracing::warn!(error = %err, "Request failed");
        }

        let body = ErrorBody {
            error: err.kind(),
            message: err.user_message(),
        };
        (status_for(&err), Json(body)).into_response()
    }
}

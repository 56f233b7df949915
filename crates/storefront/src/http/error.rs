use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::product_actor::ProductError;

/// Everything a handler can fail with. Bodies are a JSON string holding the message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authorized, no user")]
    Unauthorized,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Product(#[from] ProductError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedPayload(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, Json(self.to_string())).into_response()
            }
            ApiError::MalformedPayload { .. } => {
                (StatusCode::BAD_REQUEST, Json(self.to_string())).into_response()
            }
            ApiError::Product(e) => e.into_response(),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let status = match self {
            ProductError::NotFound(_) => StatusCode::NOT_FOUND,
            ProductError::Conflict(_) => StatusCode::CONFLICT,
            ProductError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ProductError::Forbidden(_) => StatusCode::FORBIDDEN,
            ProductError::Store(_) => {
                error!(error = %self, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(self.to_string())).into_response()
    }
}

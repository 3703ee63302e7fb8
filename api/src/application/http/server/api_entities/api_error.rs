use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doctorvision_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "E_EXTERNAL_SERVICE"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let message = match &self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(detail, "internal server error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ApiErrorResponse {
                code: code.to_string(),
                status: status.as_u16(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ImageReadError(_) => ApiError::BadRequest(err.to_string()),
            CoreError::ExternalServiceError(_) => ApiError::BadGateway(err.to_string()),
            CoreError::LogWriteError(_) | CoreError::InternalServerError => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body(response: Response) -> ApiErrorResponse {
        let bytes = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_external_service_error_maps_to_bad_gateway() {
        let response =
            ApiError::from(CoreError::ExternalServiceError("timeout".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body(response).await;
        assert_eq!(body.code, "E_EXTERNAL_SERVICE");
        assert_eq!(body.message, "External service error: timeout");
    }

    #[tokio::test]
    async fn test_image_read_error_maps_to_bad_request() {
        let response =
            ApiError::from(CoreError::ImageReadError("missing.png".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = ApiError::InternalServerError("disk full".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body(response).await;
        assert_eq!(body.status, 500);
        assert_eq!(body.message, "Internal server error");
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::dto::ErrorResponse;
use crate::readings::ServiceError;

/// Boundary between `ServiceError` and HTTP: validation failures become 400,
/// everything else 500, both wrapped in the `{status, message}` envelope.
#[derive(Debug)]
pub struct AppError(pub ServiceError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            ServiceError::Validation(e) => {
                warn!(error = %e, "Rejected request");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ServiceError::Operational(e) => {
                let message = format!("{e:#}");
                error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl<E: Into<ServiceError>> From<E> for AppError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use serde_json::Value;

    use super::*;
    use crate::readings::payload::ValidationError;

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request() {
        let resp = AppError::from(ValidationError::MissingField("ldr")).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Missing required field: ldr");
    }

    #[tokio::test]
    async fn operational_maps_to_internal_error_with_full_chain() {
        let err = anyhow!("disk full").context("failed to insert reading");
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "failed to insert reading: disk full");
    }
}

use crate::domain::error::ReconcileError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in the adapters
/// layer. The payment provider is the only caller; non-2xx tells it to
/// redeliver on its own schedule.
pub struct ApiError(pub ReconcileError);

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            ReconcileError::Signature => (
                StatusCode::FORBIDDEN,
                "invalid_signature",
                "invalid signature".to_string(),
            ),
            ReconcileError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            ReconcileError::NotFound(order_id) => (
                StatusCode::NOT_FOUND,
                "order_not_found",
                format!("no ticket record for order {order_id}"),
            ),
            ReconcileError::Upstream(err) => {
                tracing::error!("provider status api error: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "provider_unavailable",
                    "provider status check failed".to_string(),
                )
            }
            ReconcileError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            ReconcileError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

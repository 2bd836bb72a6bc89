use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{
            error::ReconcileError, notification::OrderNotification, signature,
            store::NotificationLog, ticket::ReconcileOutcome,
        },
    },
    axum::{
        Json,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    chrono::Utc,
};

/// Inbound notification endpoint. The raw body is appended to the
/// notification log at receipt, before any processing, so every exit route —
/// success, each error class, even a request-level timeout cancelling the
/// rest of this future — leaves its forensic entry. A log failure is warned
/// and never allowed to affect the processing outcome.
#[tracing::instrument(
    name = "notification",
    skip_all,
    fields(order_id = tracing::field::Empty)
)]
pub async fn notification_handler(State(state): State<AppState>, body: String) -> Response {
    let received_at = Utc::now();

    if let Err(e) = state.audit.append(received_at, &body).await {
        tracing::warn!(error = %e, "notification log append failed");
    }

    match handle_notification(&state, &body).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "payment notification handled",
                "status": outcome.as_str(),
            })),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn handle_notification(
    state: &AppState,
    body: &str,
) -> Result<ReconcileOutcome, ReconcileError> {
    let note: OrderNotification = serde_json::from_str(body)
        .map_err(|e| ReconcileError::Validation(format!("malformed notification body: {e}")))?;

    tracing::Span::current().record("order_id", tracing::field::display(&note.order_id));

    // Sole authentication boundary of this endpoint. On mismatch nothing in
    // the body is trusted and no store is touched.
    let verified = signature::verify(
        &note.order_id,
        note.status_code(),
        note.gross_amount(),
        &state.server_key,
        note.signature_key(),
    );
    if !verified {
        tracing::warn!("notification signature mismatch");
        return Err(ReconcileError::Signature);
    }

    state.reconciler.process(&note).await
}

/// Liveness check the provider dashboard pings; not part of the
/// reconciliation contract.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "notification endpoint is up",
        "timestamp": Utc::now().to_rfc3339(),
        "method": "GET",
    }))
}

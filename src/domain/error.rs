use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Signature digest did not match `signature_key`.
    #[error("invalid notification signature")]
    Signature,

    #[error("validation: {0}")]
    Validation(String),

    /// Non-paid status for an order that was never created.
    #[error("order not found: {0}")]
    NotFound(String),

    /// Provider status API unreachable or non-success.
    #[error("provider api: {0}")]
    Upstream(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

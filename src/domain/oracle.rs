use {
    super::{error::ReconcileError, id::OrderId},
    std::{future::Future, pin::Pin},
};

/// Authoritative answer from the provider's status API. The notification body
/// is only a poke to re-check; this is the status that drives transitions.
#[derive(Debug, Clone)]
pub struct OracleStatus {
    pub transaction_status: String,
    /// Full provider payload, kept for audit detail.
    pub payload: serde_json::Value,
}

pub trait StatusOracle: Send + Sync {
    fn fetch_status(
        &self,
        order_id: &OrderId,
    ) -> Pin<Box<dyn Future<Output = Result<OracleStatus, ReconcileError>> + Send + '_>>;
}

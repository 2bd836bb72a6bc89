use {
    super::{
        error::ReconcileError,
        id::OrderId,
        ticket::{ReconcileCommand, ReconcileOutcome},
    },
    chrono::{DateTime, Utc},
    std::{future::Future, pin::Pin},
};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ReconcileError>> + Send + 'a>>;

/// Write path to ticket/order records. `apply` must be atomic per order id:
/// concurrent notifications for the same order serialize, and the record ends
/// in the state of whichever oracle status was observed last.
pub trait TicketStore: Send + Sync {
    fn apply(&self, cmd: ReconcileCommand) -> BoxFuture<'_, ReconcileOutcome>;
}

/// Append-only notification log. Written once per inbound notification
/// regardless of processing outcome; never read back by this subsystem.
/// Takes the request text as delivered so the replay record is byte-exact.
pub trait NotificationLog: Send + Sync {
    fn append(&self, received_at: DateTime<Utc>, raw_body: &str) -> BoxFuture<'_, ()>;
}

/// Returns previously reserved tickets to available inventory. Must be
/// idempotent: releasing an already-released order is a no-op.
pub trait InventoryRelease: Send + Sync {
    fn release(&self, order_id: &OrderId) -> BoxFuture<'_, ()>;
}

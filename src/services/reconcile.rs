use {
    crate::domain::{
        error::ReconcileError,
        id::OrderId,
        notification::OrderNotification,
        oracle::StatusOracle,
        status::{CanonicalStatus, triggers_release},
        store::{InventoryRelease, TicketStore},
        ticket::{NewTicket, ReconcileCommand, ReconcileOutcome},
    },
    std::sync::Arc,
};

/// Create-or-update state machine for ticket/order records. Owns the write
/// path; handlers never touch the store directly.
pub struct Reconciler {
    store: Arc<dyn TicketStore>,
    oracle: Arc<dyn StatusOracle>,
    inventory: Arc<dyn InventoryRelease>,
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn TicketStore>,
        oracle: Arc<dyn StatusOracle>,
        inventory: Arc<dyn InventoryRelease>,
    ) -> Self {
        Self {
            store,
            oracle,
            inventory,
        }
    }

    /// Reconcile one signature-verified notification. The inbound body is
    /// treated as a poke only: the status applied comes from the provider's
    /// status API, re-fetched here.
    pub async fn process(
        &self,
        note: &OrderNotification,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let order_id = OrderId::new(note.order_id.clone())?;

        let oracle = self.oracle.fetch_status(&order_id).await?;
        let canonical = CanonicalStatus::from_provider(&oracle.transaction_status);

        tracing::debug!(
            order_id = %order_id,
            provider_status = %oracle.transaction_status,
            canonical = %canonical,
            "oracle status resolved"
        );

        // Creation payload is only eligible on a paid resolution; whether it
        // is used depends on the record being absent, which only the store
        // knows.
        let create = if canonical.is_paid() {
            NewTicket::from_notification(note)
        } else {
            None
        };

        let cmd = ReconcileCommand {
            order_id: order_id.clone(),
            canonical: canonical.clone(),
            raw_status: oracle.transaction_status.clone(),
            create,
        };

        let outcome = match self.store.apply(cmd).await? {
            ReconcileOutcome::NoRecord if canonical.is_paid() => {
                // First paid notification for an unseen order, but the body
                // lacked customer_name/event_id, so nothing could be created.
                return Err(ReconcileError::Validation(
                    "cannot create ticket: customer_name and event_id are required".into(),
                ));
            }
            ReconcileOutcome::NoRecord => {
                // Never purchased through the normal flow and not yet
                // eligible for webhook-driven creation.
                return Err(ReconcileError::NotFound(order_id.into_inner()));
            }
            outcome => outcome,
        };

        tracing::info!(
            order_id = %order_id,
            canonical = %canonical,
            outcome = outcome.as_str(),
            "ticket reconciled"
        );

        // Fires on every successfully reconciled notification carrying a
        // release status, changed or not — the release op is idempotent.
        // Best-effort: failure is warned, never escalated.
        if triggers_release(&oracle.transaction_status) {
            self.release_inventory(&order_id).await;
        }

        Ok(outcome)
    }

    async fn release_inventory(&self, order_id: &OrderId) {
        if let Err(e) = self.inventory.release(order_id).await {
            tracing::warn!(order_id = %order_id, error = %e, "inventory release failed");
        }
    }
}

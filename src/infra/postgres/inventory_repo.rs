use {
    crate::domain::{error::ReconcileError, id::OrderId, store::InventoryRelease},
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
};

/// Returns a webhook-reserved quantity to the event's available count.
/// A marker row per order id makes the release idempotent: the second
/// release for the same order is a committed no-op.
pub struct PgInventoryRelease {
    pool: PgPool,
}

impl PgInventoryRelease {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn release_inner(&self, order_id: &OrderId) -> Result<(), ReconcileError> {
        let mut tx = self.pool.begin().await?;

        let inserted: Option<bool> = sqlx::query_scalar(
            r#"
            INSERT INTO inventory_releases (order_id)
            VALUES ($1)
            ON CONFLICT (order_id) DO NOTHING
            RETURNING true
            "#,
        )
        .bind(order_id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        if inserted.is_none() {
            // Already released for this order.
            tx.commit().await?;
            return Ok(());
        }

        // No ticket row (or no matching event) means nothing was reserved
        // through this subsystem; the marker alone is enough.
        let updated = sqlx::query(
            r#"
            UPDATE events
            SET tickets_available = tickets_available + t.quantity
            FROM tickets t
            WHERE t.order_id = $1 AND events.id = t.event_id
            "#,
        )
        .bind(order_id.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            order_id = %order_id,
            events_updated = updated.rows_affected(),
            "inventory released"
        );
        Ok(())
    }
}

impl InventoryRelease for PgInventoryRelease {
    fn release(
        &self,
        order_id: &OrderId,
    ) -> Pin<Box<dyn Future<Output = Result<(), ReconcileError>> + Send + '_>> {
        let order_id = order_id.clone();
        Box::pin(async move { self.release_inner(&order_id).await })
    }
}

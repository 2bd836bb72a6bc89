use {
    crate::domain::{
        error::ReconcileError,
        status::CanonicalStatus,
        store::TicketStore,
        ticket::{ReconcileCommand, ReconcileOutcome, TicketOrigin},
    },
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
};

/// Postgres-backed ticket store. Order id is the primary key and every
/// `apply` runs inside one transaction under a per-order advisory lock, so
/// concurrent notifications for the same order serialize and the last
/// observed oracle state wins deterministically.
pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn apply_inner(&self, cmd: ReconcileCommand) -> Result<ReconcileOutcome, ReconcileError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await?;

        // Serialize all processing for this order id. Works even when the
        // row doesn't exist yet, so lazy creation can't race itself.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(cmd.order_id.as_str())
            .execute(&mut *tx)
            .await?;

        let stored: Option<String> =
            sqlx::query_scalar("SELECT status FROM tickets WHERE order_id = $1")
                .bind(cmd.order_id.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let outcome = match stored {
            None => match &cmd.create {
                Some(new) => {
                    sqlx::query(
                        r#"
                        INSERT INTO tickets
                            (order_id, customer_name, event_id, event_name, quantity,
                             total_price, buyer_id, venue, status, provider_status, origin)
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                        "#,
                    )
                    .bind(cmd.order_id.as_str())
                    .bind(&new.customer_name)
                    .bind(&new.event_id)
                    .bind(&new.event_name)
                    .bind(new.quantity)
                    .bind(new.total_price.rupiah())
                    .bind(&new.buyer_id)
                    .bind(&new.venue)
                    .bind(cmd.canonical.as_str())
                    .bind(&cmd.raw_status)
                    .bind(TicketOrigin::Webhook.as_str())
                    .execute(&mut *tx)
                    .await?;
                    ReconcileOutcome::Created
                }
                None => ReconcileOutcome::NoRecord,
            },
            Some(stored) if stored == cmd.canonical.as_str() => {
                // Same resolved status — idempotent no-op, no write.
                ReconcileOutcome::Unchanged
            }
            Some(stored) => {
                sqlx::query(
                    r#"
                    UPDATE tickets
                    SET status = $1, provider_status = $2, updated_at = now()
                    WHERE order_id = $3
                    "#,
                )
                .bind(cmd.canonical.as_str())
                .bind(&cmd.raw_status)
                .bind(cmd.order_id.as_str())
                .execute(&mut *tx)
                .await?;
                ReconcileOutcome::Updated {
                    from: CanonicalStatus::from(stored.as_str()),
                }
            }
        };

        tx.commit().await?;
        Ok(outcome)
    }
}

impl TicketStore for PgTicketStore {
    fn apply(
        &self,
        cmd: ReconcileCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ReconcileOutcome, ReconcileError>> + Send + '_>> {
        Box::pin(async move { self.apply_inner(cmd).await })
    }
}

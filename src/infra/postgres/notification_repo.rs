use {
    crate::domain::{error::ReconcileError, store::NotificationLog},
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

/// Append-only notification log: the ground-truth replay record. Rows are
/// never updated or deleted by this subsystem.
pub struct PgNotificationLog {
    pool: PgPool,
}

impl PgNotificationLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn append_inner(
        &self,
        received_at: DateTime<Utc>,
        raw_body: &str,
    ) -> Result<(), ReconcileError> {
        // The raw column is the byte-exact replay record; the jsonb copy is
        // for querying and stays null when the body wasn't valid JSON.
        let body: Option<serde_json::Value> = serde_json::from_str(raw_body).ok();
        sqlx::query("INSERT INTO notifications (id, received_at, raw, body) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::now_v7())
            .bind(received_at)
            .bind(raw_body)
            .bind(body)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl NotificationLog for PgNotificationLog {
    fn append(
        &self,
        received_at: DateTime<Utc>,
        raw_body: &str,
    ) -> Pin<Box<dyn Future<Output = Result<(), ReconcileError>> + Send + '_>> {
        let raw_body = raw_body.to_string();
        Box::pin(async move { self.append_inner(received_at, &raw_body).await })
    }
}

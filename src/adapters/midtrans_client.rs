use {
    crate::domain::{
        error::ReconcileError,
        id::OrderId,
        oracle::{OracleStatus, StatusOracle},
    },
    base64::{Engine, engine::general_purpose::STANDARD},
    std::{future::Future, pin::Pin, time::Duration},
};

/// Provider environment. Selects which base URL the status oracle hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    pub fn from_str_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Sandbox,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api.sandbox.midtrans.com",
            Self::Production => "https://api.midtrans.com",
        }
    }
}

/// HTTPS client for the provider's authoritative transaction-status API.
/// The inbound notification is never the source of status truth; every
/// reconcile re-fetches through here.
pub struct MidtransOracle {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl MidtransOracle {
    pub fn new(server_key: &str, environment: Environment) -> Self {
        Self::with_base_url(server_key, environment.base_url())
    }

    /// Test seam: point the oracle at an arbitrary base URL.
    pub fn with_base_url(server_key: &str, base_url: impl Into<String>) -> Self {
        // HTTP Basic with the server key as username and empty password.
        let auth_header = format!("Basic {}", STANDARD.encode(format!("{server_key}:")));
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            auth_header,
        }
    }

    async fn fetch_inner(&self, order_id: &OrderId) -> Result<OracleStatus, ReconcileError> {
        let url = format!("{}/v2/{}/status", self.base_url, order_id.as_str());

        let resp = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ReconcileError::Upstream(format!("status request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ReconcileError::Upstream(format!(
                "status endpoint returned {} for order {order_id}",
                resp.status()
            )));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ReconcileError::Upstream(format!("unreadable status body: {e}")))?;

        let transaction_status = payload
            .get("transaction_status")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ReconcileError::Upstream(format!(
                    "status payload for order {order_id} lacks transaction_status"
                ))
            })?
            .to_string();

        Ok(OracleStatus {
            transaction_status,
            payload,
        })
    }
}

impl StatusOracle for MidtransOracle {
    fn fetch_status(
        &self,
        order_id: &OrderId,
    ) -> Pin<Box<dyn Future<Output = Result<OracleStatus, ReconcileError>> + Send + '_>> {
        let order_id = order_id.clone();
        Box::pin(async move { self.fetch_inner(&order_id).await })
    }
}

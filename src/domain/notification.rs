use serde::{Deserialize, Deserializer};

/// Inbound webhook body. Untrusted until the signature checks out and the
/// status is re-confirmed against the provider API; the optional fields are
/// only consulted when the reconciler creates a webhook-originated record.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderNotification {
    pub order_id: String,
    /// Kept as delivered (string or number) — it participates in the
    /// signature digest byte-for-byte.
    #[serde(default, deserialize_with = "string_or_number")]
    pub status_code: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub gross_amount: Option<String>,
    #[serde(default)]
    pub signature_key: Option<String>,

    // Ticket-creation payload (webhook-originated purchases).
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_price: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

impl OrderNotification {
    pub fn status_code(&self) -> &str {
        self.status_code.as_deref().unwrap_or("")
    }

    pub fn gross_amount(&self) -> &str {
        self.gross_amount.as_deref().unwrap_or("")
    }

    pub fn signature_key(&self) -> &str {
        self.signature_key.as_deref().unwrap_or("")
    }
}

/// Accept JSON string or number, normalized to its textual form.
fn string_or_number<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Accept a positive integer as number or numeric string; anything else
/// counts as absent so the reconciler's default of 1 applies.
fn lenient_quantity<'de, D>(de: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(de)?;
    let qty = match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(qty
        .filter(|q| *q > 0)
        .and_then(|q| i32::try_from(q).ok()))
}

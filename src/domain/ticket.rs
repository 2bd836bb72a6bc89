use {
    super::{
        id::OrderId, money::Amount, notification::OrderNotification, status::CanonicalStatus,
    },
    serde::Serialize,
    std::fmt,
};

/// Buyer id recorded when the notification carries none.
pub const UNKNOWN_BUYER: &str = "unknown";

/// Who created the record: the user-facing purchase flow, or this subsystem
/// upon the first `paid` notification for an unseen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketOrigin {
    Purchase,
    Webhook,
}

impl TicketOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Webhook => "webhook",
        }
    }
}

impl fmt::Display for TicketOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for TicketOrigin {
    type Error = super::error::ReconcileError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "webhook" => Ok(Self::Webhook),
            other => Err(super::error::ReconcileError::Validation(format!(
                "unknown ticket origin: {other}"
            ))),
        }
    }
}

/// Creation payload for a webhook-originated record.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub customer_name: String,
    pub event_id: String,
    pub event_name: Option<String>,
    pub quantity: i32,
    pub total_price: Amount,
    pub buyer_id: String,
    pub venue: Option<String>,
}

impl NewTicket {
    /// Build from a verified notification. Returns `None` when the minimum
    /// creation fields (`customer_name`, `event_id`) are missing — the caller
    /// turns that into a validation failure if creation turns out to be
    /// needed.
    pub fn from_notification(note: &OrderNotification) -> Option<Self> {
        let customer_name = note
            .customer_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?
            .to_string();
        let event_id = note
            .event_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?
            .to_string();

        let total_price = note
            .total_price
            .as_deref()
            .and_then(|raw| Amount::parse(raw).ok())
            .or_else(|| Amount::parse(note.gross_amount()).ok())
            .unwrap_or(Amount::zero());

        Some(Self {
            customer_name,
            event_id,
            event_name: note.event_name.clone(),
            quantity: note.quantity.unwrap_or(1),
            total_price,
            buyer_id: note
                .user_id
                .clone()
                .unwrap_or_else(|| UNKNOWN_BUYER.to_string()),
            venue: note.venue.clone(),
        })
    }
}

/// One reconcile request against the ticket store: apply `canonical` to the
/// record for `order_id`, creating it from `create` if absent and eligible.
#[derive(Debug, Clone)]
pub struct ReconcileCommand {
    pub order_id: OrderId,
    pub canonical: CanonicalStatus,
    pub raw_status: String,
    pub create: Option<NewTicket>,
}

/// What the store actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Webhook-originated record created with the mapped status.
    Created,
    /// Status advanced from the previous canonical value.
    Updated { from: CanonicalStatus },
    /// Same resolved status as stored — idempotent no-op.
    Unchanged,
    /// No record and no eligible creation — nothing written.
    NoRecord,
}

impl ReconcileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated { .. } => "updated",
            Self::Unchanged => "unchanged",
            Self::NoRecord => "no_record",
        }
    }
}

use {
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Canonical ticket-lifecycle status. Derived only from the provider's
/// authoritative status API, never from the notification body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
    Paid,
    Pending,
    Cancelled,
    /// Provider status we don't know yet — carried verbatim so new provider
    /// statuses flow through without a deploy.
    Other(String),
}

impl CanonicalStatus {
    /// Total mapping over provider transaction statuses.
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "settlement" | "capture" => Self::Paid,
            "pending" => Self::Pending,
            "expire" | "cancel" | "deny" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid)
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for CanonicalStatus {
    fn from(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            "pending" => Self::Pending,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Raw provider statuses that return reserved tickets to inventory.
/// Checked against the oracle's unmapped status, not the canonical one.
pub fn triggers_release(raw_status: &str) -> bool {
    matches!(raw_status, "pending" | "expire" | "cancel" | "deny" | "error")
}

use {
    super::error::ReconcileError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Whole-rupiah amount. The provider formats amounts as `"100000.00"` even
/// though IDR has no minor unit, so parsing keeps the integer part only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    pub fn new(rupiah: i64) -> Result<Self, ReconcileError> {
        if rupiah < 0 {
            return Err(ReconcileError::Validation(format!(
                "amount cannot be negative, got: {rupiah}"
            )));
        }
        Ok(Self(rupiah))
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn rupiah(&self) -> i64 {
        self.0
    }

    /// Parse `"100000.00"`, `"100000"` or a bare JSON number.
    pub fn parse(raw: &str) -> Result<Self, ReconcileError> {
        let integer_part = raw.split('.').next().unwrap_or(raw);
        let rupiah: i64 = integer_part.parse().map_err(|_| {
            ReconcileError::Validation(format!("unparseable amount: {raw}"))
        })?;
        Self::new(rupiah)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

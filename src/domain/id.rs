use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::ReconcileError;

/// Merchant-assigned order identifier (`ORD-xxx` by convention, but any
/// non-empty token the provider will echo back is accepted).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Result<Self, ReconcileError> {
        let id = id.into();
        if id.is_empty() || id.len() > 64 {
            return Err(ReconcileError::Validation(format!(
                "order id must be 1..=64 chars, got {} chars",
                id.len()
            )));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ReconcileError::Validation(
                "order id must not contain whitespace".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

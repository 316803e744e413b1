//! Ownership: which operator runs a device and which provider sells it.

use serde::{Deserialize, Serialize};

/// Operator/provider pair. Both absent means the device is unowned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ownership {
    pub operator: Option<String>,
    pub provider: Option<String>,
}

impl Ownership {
    /// Ownership assigned to an operator and a provider.
    #[must_use]
    pub fn new(operator: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            operator: Some(operator.into()),
            provider: Some(provider.into()),
        }
    }

    /// The sentinel for "no operator, no provider".
    #[must_use]
    pub fn unowned() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_unowned(&self) -> bool {
        self.operator.is_none() && self.provider.is_none()
    }

    #[must_use]
    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }
}

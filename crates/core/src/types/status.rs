//! Order status and payment outcome enums.

use serde::{Deserialize, Serialize};

/// Order payment status.
///
/// Orders are created in `Pending` and move to exactly one terminal state via
/// an explicit finalize action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Payment in progress.
    #[default]
    Pending,
    /// Payment completed.
    Success,
    /// Payment cancelled or failed.
    Cancel,
}

impl OrderStatus {
    /// Whether this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Cancel)
    }

    /// The status as its stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            "cancel" => Ok(Self::Cancel),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Outcome of a finalize action.
///
/// The payment provider callback can only resolve an order one of two ways;
/// keeping this separate from [`OrderStatus`] makes "finalize to pending"
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Success,
    Cancel,
}

impl PaymentOutcome {
    /// The order status this outcome resolves to.
    #[must_use]
    pub const fn as_status(self) -> OrderStatus {
        match self {
            Self::Success => OrderStatus::Success,
            Self::Cancel => OrderStatus::Cancel,
        }
    }
}

impl std::fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_status().as_str())
    }
}

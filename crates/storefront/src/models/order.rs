//! Order model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use machikado_core::{OrderId, OrderStatus, ProductId, Yen};

/// One purchased line item.
///
/// The amount is snapshotted from the product's price at creation time and
/// never recomputed, so later price edits leave existing orders untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub amount: Yen,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

//! Session-backed shopping cart.
//!
//! The cart itself is a plain `key -> quantity` map held in the visitor's
//! session; these functions mutate it and resolve it against the catalog.
//! Viewing never mutates the cart.

use serde::Serialize;

use machikado_core::Yen;

use crate::db::{CatalogStore, RepositoryError};
use crate::models::{CartMap, Product};

/// A fixed line item that is not in the catalog (the "secret menu" entry
/// reachable by key only).
#[derive(Debug, Clone, Copy)]
pub struct AdHocLineItem {
    /// Cart key this line is stored under.
    pub key: &'static str,
    pub name: &'static str,
    pub unit_price: Yen,
}

/// Known ad-hoc line items, looked up before the catalog.
const AD_HOC_LINE_ITEMS: &[AdHocLineItem] = &[AdHocLineItem {
    key: "999",
    name: "【特別】店長の焼肉おまかせセット(4人前)",
    unit_price: Yen::new(5000),
}];

/// Look up an ad-hoc line item by cart key.
#[must_use]
pub fn ad_hoc_line_item(key: &str) -> Option<&'static AdHocLineItem> {
    AD_HOC_LINE_ITEMS.iter().find(|item| item.key == key)
}

/// Increment the quantity for a cart key by 1 (insert at 1 when absent).
///
/// No upper bound is enforced.
pub fn add_item(cart: &mut CartMap, key: &str) {
    *cart.entry(key.to_owned()).or_insert(0) += 1;
}

/// Delete a cart entry entirely (not a decrement). No-op when absent.
pub fn remove_item(cart: &mut CartMap, key: &str) -> bool {
    cart.remove(key).is_some()
}

/// One resolved cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartLine {
    /// A line backed by a catalog product.
    Catalog {
        product: Product,
        quantity: u32,
        subtotal: Yen,
    },
    /// A fixed line item with no catalog backing.
    AdHoc {
        name: String,
        unit_price: Yen,
        quantity: u32,
        subtotal: Yen,
    },
}

impl CartLine {
    /// The line subtotal.
    #[must_use]
    pub const fn subtotal(&self) -> Yen {
        match self {
            Self::Catalog { subtotal, .. } | Self::AdHoc { subtotal, .. } => *subtotal,
        }
    }
}

/// Resolved cart contents.
#[derive(Debug, Clone, Serialize)]
pub struct CartContents {
    pub lines: Vec<CartLine>,
    pub total: Yen,
}

/// Resolve the cart against the catalog and total it.
///
/// A key that resolves to neither an ad-hoc line nor a live catalog product
/// (a stale reference to a deleted product, or garbage) is silently skipped -
/// it contributes no line and no total.
///
/// # Errors
///
/// Returns [`RepositoryError`] only for store failures; missing products are
/// not an error.
pub async fn view_cart(
    catalog: &dyn CatalogStore,
    cart: &CartMap,
) -> Result<CartContents, RepositoryError> {
    // HashMap iteration order is arbitrary; sort keys for a stable display.
    let mut entries: Vec<(&String, &u32)> = cart.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut lines = Vec::with_capacity(entries.len());
    let mut total = Yen::ZERO;

    for (key, &quantity) in entries {
        if let Some(item) = ad_hoc_line_item(key) {
            let subtotal = item.unit_price.times(quantity);
            total += subtotal;
            lines.push(CartLine::AdHoc {
                name: item.name.to_string(),
                unit_price: item.unit_price,
                quantity,
                subtotal,
            });
            continue;
        }

        let Ok(product_id) = key.parse::<i32>() else {
            continue;
        };
        let Some(product) = catalog.product(product_id.into()).await? else {
            continue;
        };

        let subtotal = product.effective_price().times(quantity);
        total += subtotal;
        lines.push(CartLine::Catalog {
            product,
            quantity,
            subtotal,
        });
    }

    Ok(CartContents { lines, total })
}

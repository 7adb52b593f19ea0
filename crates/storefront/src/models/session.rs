//! Session-scoped state.
//!
//! The cart and the bundle-checkout batch live in the visitor's session bag,
//! never in the catalog database. Both are plain serializable values so any
//! `tower-sessions` store can hold them.

use std::collections::HashMap;

/// The visitor's cart: line-item key (product id as a string, or an ad-hoc
/// key) mapped to quantity.
pub type CartMap = HashMap<String, u32>;

/// Session keys for storefront state.
pub mod keys {
    /// Key for the visitor's cart map.
    pub const CART: &str = "cart";

    /// Key for the order ids created together by a bundle checkout.
    ///
    /// Consumed (popped) by the first batch finalize so a repeat call finds
    /// nothing to do.
    pub const SET_ORDER_IDS: &str = "checkout_set_order_ids";
}

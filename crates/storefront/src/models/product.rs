//! Product model.

use serde::{Deserialize, Serialize};

use machikado_core::{Category, ProductId, ShopId, Yen};

/// A product sold by one of the district's shops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Regular price.
    pub price: Yen,
    pub shop_id: Option<ShopId>,
    pub category: Category,
    /// Flagged for the sale listing.
    pub is_sale: bool,
    /// Sale price; expected (but not enforced) to be present when `is_sale`.
    pub sale_price: Option<Yen>,
}

impl Product {
    /// The price a buyer actually pays right now.
    ///
    /// Falls back to the regular price when the sale flag is set without a
    /// sale price.
    #[must_use]
    pub fn effective_price(&self) -> Yen {
        if self.is_sale
            && let Some(sale_price) = self.sale_price
        {
            return sale_price;
        }
        self.price
    }
}

/// Data for inserting a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Yen,
    #[serde(default)]
    pub shop_id: Option<ShopId>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub sale_price: Option<Yen>,
}

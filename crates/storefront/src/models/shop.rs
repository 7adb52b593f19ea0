//! Shop model.

use serde::{Deserialize, Serialize};

use machikado_core::{Category, ShopId, StreetId};

/// A storefront on one of the district's streets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub street_id: StreetId,
    /// Shop name; unique within its street.
    pub name: String,
    pub category: Category,
    pub description: String,
    /// External contact link (the shop's LINE page).
    pub line_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Data for inserting a shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShop {
    pub street_id: StreetId,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub line_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

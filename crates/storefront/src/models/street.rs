//! Street (shopping-district lane) model.

use serde::{Deserialize, Serialize};

use machikado_core::StreetId;

/// A named lane of the shopping district. Shops belong to exactly one street.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Street {
    pub id: StreetId,
    pub name: String,
    /// Unique URL slug.
    pub slug: String,
}

/// Data for inserting a street.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStreet {
    pub name: String,
    pub slug: String,
}

//! Curated product set (meal bundle) model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use machikado_core::{ProductId, SetId, Yen, slugify};

/// A curated group of products presented and sold together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSet {
    pub id: SetId,
    pub name: String,
    /// Unique URL slug, derived from the name when not given explicitly.
    pub slug: String,
    /// The set's own configured price (may differ from the sum of members).
    pub price: Yen,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProductSet {
    pub name: String,
    /// Explicit slug; derived from the name when absent.
    #[serde(default)]
    pub slug: Option<String>,
    pub price: Yen,
    #[serde(default)]
    pub description: String,
    /// Member products (many-to-many).
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl NewProductSet {
    /// The slug this set will be stored under.
    #[must_use]
    pub fn resolved_slug(&self) -> String {
        self.slug
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_from_name() {
        let set = NewProductSet {
            name: "Weekend BBQ Set".to_string(),
            slug: None,
            price: Yen::new(1800),
            description: String::new(),
            product_ids: vec![],
            is_active: true,
        };
        assert_eq!(set.resolved_slug(), "weekend-bbq-set");
    }

    #[test]
    fn test_explicit_slug_preserved() {
        let set = NewProductSet {
            name: "Weekend BBQ Set".to_string(),
            slug: Some("bbq-2024".to_string()),
            price: Yen::new(1800),
            description: String::new(),
            product_ids: vec![],
            is_active: true,
        };
        assert_eq!(set.resolved_slug(), "bbq-2024");
    }
}

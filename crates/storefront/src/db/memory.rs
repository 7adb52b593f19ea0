//! In-memory store implementation.
//!
//! Backs unit and in-process HTTP tests, and mirrors the ordering and
//! constraint semantics of the `PostgreSQL` implementation: slug uniqueness
//! conflicts, and referential protection of products referenced by orders.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use machikado_core::{
    Category, EventId, OrderId, OrderStatus, PaymentOutcome, ProductId, SetId, ShopId, StreetId,
    Yen,
};

use super::{CatalogStore, FinalizeResult, OrderStore, RepositoryError};
use crate::models::{
    Event, NewEvent, NewProduct, NewProductSet, NewShop, NewStreet, Order, Product, ProductSet,
    Shop, Street,
};

#[derive(Default)]
struct Inner {
    streets: Vec<Street>,
    shops: Vec<Shop>,
    products: Vec<Product>,
    sets: Vec<ProductSet>,
    set_members: Vec<(SetId, ProductId)>,
    events: Vec<Event>,
    orders: Vec<Order>,
    next_id: i32,
}

impl Inner {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory catalog and order store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, RepositoryError> {
        self.inner
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_streets(&self) -> Result<Vec<Street>, RepositoryError> {
        let inner = self.lock()?;
        let mut streets = inner.streets.clone();
        streets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(streets)
    }

    async fn street_by_slug(&self, slug: &str) -> Result<Option<Street>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.streets.iter().find(|s| s.slug == slug).cloned())
    }

    async fn list_shops(&self, category: Option<Category>) -> Result<Vec<Shop>, RepositoryError> {
        let inner = self.lock()?;
        let mut shops: Vec<Shop> = inner
            .shops
            .iter()
            .filter(|s| category.is_none_or(|c| s.category == c))
            .cloned()
            .collect();
        shops.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(shops)
    }

    async fn shop(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.shops.iter().find(|s| s.id == id).cloned())
    }

    async fn shops_by_street(&self, street_id: StreetId) -> Result<Vec<Shop>, RepositoryError> {
        let inner = self.lock()?;
        let mut shops: Vec<Shop> = inner
            .shops
            .iter()
            .filter(|s| s.street_id == street_id)
            .cloned()
            .collect();
        shops.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(shops)
    }

    async fn shop_by_name(&self, name: &str) -> Result<Option<Shop>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.shops.iter().find(|s| s.name == name).cloned())
    }

    async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let inner = self.lock()?;
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn products_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepositoryError> {
        let inner = self.lock()?;
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| p.shop_id == Some(shop_id))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn sale_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let inner = self.lock()?;
        let mut products: Vec<Product> =
            inner.products.iter().filter(|p| p.is_sale).cloned().collect();
        products.sort_by_key(|p| std::cmp::Reverse(p.id));
        Ok(products)
    }

    async fn list_sets(&self) -> Result<Vec<ProductSet>, RepositoryError> {
        let inner = self.lock()?;
        let mut sets: Vec<ProductSet> =
            inner.sets.iter().filter(|s| s.is_active).cloned().collect();
        sets.sort_by_key(|s| std::cmp::Reverse(s.created_at));
        Ok(sets)
    }

    async fn set_by_slug(&self, slug: &str) -> Result<Option<ProductSet>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .sets
            .iter()
            .find(|s| s.slug == slug && s.is_active)
            .cloned())
    }

    async fn set_products(&self, set_id: SetId) -> Result<Vec<Product>, RepositoryError> {
        let inner = self.lock()?;
        let member_ids: Vec<ProductId> = inner
            .set_members
            .iter()
            .filter(|(sid, _)| *sid == set_id)
            .map(|(_, pid)| *pid)
            .collect();
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| member_ids.contains(&p.id))
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn list_events(&self) -> Result<Vec<Event>, RepositoryError> {
        let inner = self.lock()?;
        let mut events: Vec<Event> =
            inner.events.iter().filter(|e| e.is_active).cloned().collect();
        events.sort_by_key(|e| e.id);
        Ok(events)
    }

    async fn event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner
            .events
            .iter()
            .find(|e| e.slug == slug && e.is_active)
            .cloned())
    }

    async fn create_street(&self, street: NewStreet) -> Result<Street, RepositoryError> {
        let mut inner = self.lock()?;
        if inner.streets.iter().any(|s| s.slug == street.slug) {
            return Err(RepositoryError::Conflict("street slug already exists".to_string()));
        }
        let id = StreetId::new(inner.next_id());
        let street = Street {
            id,
            name: street.name,
            slug: street.slug,
        };
        inner.streets.push(street.clone());
        Ok(street)
    }

    async fn create_shop(&self, shop: NewShop) -> Result<Shop, RepositoryError> {
        let mut inner = self.lock()?;
        if inner
            .shops
            .iter()
            .any(|s| s.street_id == shop.street_id && s.name == shop.name)
        {
            return Err(RepositoryError::Conflict(
                "shop name already exists on this street".to_string(),
            ));
        }
        let id = ShopId::new(inner.next_id());
        let shop = Shop {
            id,
            street_id: shop.street_id,
            name: shop.name,
            category: shop.category,
            description: shop.description,
            line_url: shop.line_url,
            latitude: shop.latitude,
            longitude: shop.longitude,
        };
        inner.shops.push(shop.clone());
        Ok(shop)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let mut inner = self.lock()?;
        let id = ProductId::new(inner.next_id());
        let product = Product {
            id,
            name: product.name,
            price: product.price,
            shop_id: product.shop_id,
            category: product.category,
            is_sale: product.is_sale,
            sale_price: product.sale_price,
        };
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn create_set(&self, set: NewProductSet) -> Result<ProductSet, RepositoryError> {
        let slug = set.resolved_slug();
        let mut inner = self.lock()?;
        if inner.sets.iter().any(|s| s.slug == slug) {
            return Err(RepositoryError::Conflict("set slug already exists".to_string()));
        }
        let id = SetId::new(inner.next_id());
        let stored = ProductSet {
            id,
            name: set.name,
            slug,
            price: set.price,
            description: set.description,
            is_active: set.is_active,
            created_at: Utc::now(),
        };
        inner.sets.push(stored.clone());
        for product_id in set.product_ids {
            inner.set_members.push((id, product_id));
        }
        Ok(stored)
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, RepositoryError> {
        let slug = event.resolved_slug();
        let mut inner = self.lock()?;
        if inner.events.iter().any(|e| e.slug == slug) {
            return Err(RepositoryError::Conflict("event slug already exists".to_string()));
        }
        let id = EventId::new(inner.next_id());
        let stored = Event {
            id,
            title: event.title,
            slug,
            category: event.category,
            is_regular: event.is_regular,
            schedule_text: event.schedule_text,
            start_date: event.start_date,
            end_date: event.end_date,
            summary: event.summary,
            body: event.body,
            location: event.location,
            announce_from: event.announce_from,
            announce_until: event.announce_until,
            is_featured: event.is_featured,
            is_active: event.is_active,
            created_at: Utc::now(),
        };
        inner.events.push(stored.clone());
        Ok(stored)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.products.iter().any(|p| p.id == id) {
            return Err(RepositoryError::NotFound);
        }
        if inner.orders.iter().any(|o| o.product_id == id) {
            return Err(RepositoryError::Conflict(
                "product is referenced by orders".to_string(),
            ));
        }
        inner.products.retain(|p| p.id != id);
        inner.set_members.retain(|(_, pid)| *pid != id);
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create(&self, product_id: ProductId, amount: Yen) -> Result<Order, RepositoryError> {
        let mut inner = self.lock()?;
        if !inner.products.iter().any(|p| p.id == product_id) {
            return Err(RepositoryError::NotFound);
        }
        let id = OrderId::new(inner.next_id());
        let order = Order {
            id,
            product_id,
            amount,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let inner = self.lock()?;
        Ok(inner.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let inner = self.lock()?;
        let mut orders = inner.orders.clone();
        orders.sort_by_key(|o| std::cmp::Reverse((o.created_at, o.id)));
        Ok(orders)
    }

    async fn finalize(
        &self,
        id: OrderId,
        outcome: PaymentOutcome,
    ) -> Result<FinalizeResult, RepositoryError> {
        let mut inner = self.lock()?;
        let order = inner
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if order.status.is_terminal() {
            return Ok(FinalizeResult {
                order: order.clone(),
                already_finalized: true,
            });
        }
        order.status = outcome.as_status();
        Ok(FinalizeResult {
            order: order.clone(),
            already_finalized: false,
        })
    }

    async fn finalize_batch(
        &self,
        ids: &[OrderId],
        outcome: PaymentOutcome,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut inner = self.lock()?;
        let mut updated = Vec::new();
        for order in &mut inner.orders {
            if ids.contains(&order.id) {
                order.status = outcome.as_status();
                updated.push(order.clone());
            }
        }
        updated.sort_by_key(|o| o.id);
        Ok(updated)
    }
}

//! `PostgreSQL` store implementations.
//!
//! Queries are runtime-bound (`sqlx::query` + `Row::try_get`) rather than
//! macro-checked, so the workspace builds without a live database. Row
//! mapping failures surface as [`RepositoryError::DataCorruption`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use machikado_core::{
    Category, EventCategory, EventId, OrderId, OrderStatus, PaymentOutcome, ProductId, SetId,
    ShopId, StreetId, Yen,
};

use super::{CatalogStore, FinalizeResult, OrderStore, RepositoryError};
use crate::models::{
    Event, NewEvent, NewProduct, NewProductSet, NewShop, NewStreet, Order, Product, ProductSet,
    Shop, Street,
};

/// Catalog queries over `PostgreSQL`.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    /// Create a new catalog store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Order ledger over `PostgreSQL`.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Create a new order store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// Row mapping
// =============================================================================

fn map_street(row: &PgRow) -> Result<Street, RepositoryError> {
    Ok(Street {
        id: StreetId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
    })
}

fn parse_category(tag: &str) -> Result<Category, RepositoryError> {
    tag.parse().map_err(RepositoryError::DataCorruption)
}

fn parse_event_category(tag: &str) -> Result<EventCategory, RepositoryError> {
    tag.parse().map_err(RepositoryError::DataCorruption)
}

fn map_shop(row: &PgRow) -> Result<Shop, RepositoryError> {
    let category: String = row.try_get("category")?;
    Ok(Shop {
        id: ShopId::new(row.try_get("id")?),
        street_id: StreetId::new(row.try_get("street_id")?),
        name: row.try_get("name")?,
        category: parse_category(&category)?,
        description: row.try_get("description")?,
        line_url: row.try_get("line_url")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
    })
}

fn map_product(row: &PgRow) -> Result<Product, RepositoryError> {
    let category: String = row.try_get("category")?;
    let shop_id: Option<i32> = row.try_get("shop_id")?;
    let sale_price: Option<i64> = row.try_get("sale_price")?;
    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        price: Yen::new(row.try_get("price")?),
        shop_id: shop_id.map(ShopId::new),
        category: parse_category(&category)?,
        is_sale: row.try_get("is_sale")?,
        sale_price: sale_price.map(Yen::new),
    })
}

fn map_set(row: &PgRow) -> Result<ProductSet, RepositoryError> {
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    Ok(ProductSet {
        id: SetId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        slug: row.try_get("slug")?,
        price: Yen::new(row.try_get("price")?),
        description: row.try_get("description")?,
        is_active: row.try_get("is_active")?,
        created_at,
    })
}

fn map_event(row: &PgRow) -> Result<Event, RepositoryError> {
    let category: String = row.try_get("category")?;
    let start_date: Option<NaiveDate> = row.try_get("start_date")?;
    let end_date: Option<NaiveDate> = row.try_get("end_date")?;
    let announce_from: Option<NaiveDate> = row.try_get("announce_from")?;
    let announce_until: Option<NaiveDate> = row.try_get("announce_until")?;
    Ok(Event {
        id: EventId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        category: parse_event_category(&category)?,
        is_regular: row.try_get("is_regular")?,
        schedule_text: row.try_get("schedule_text")?,
        start_date,
        end_date,
        summary: row.try_get("summary")?,
        body: row.try_get("body")?,
        location: row.try_get("location")?,
        announce_from,
        announce_until,
        is_featured: row.try_get("is_featured")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_order(row: &PgRow) -> Result<Order, RepositoryError> {
    let status: String = row.try_get("status")?;
    let status: OrderStatus = status.parse().map_err(RepositoryError::DataCorruption)?;
    Ok(Order {
        id: OrderId::new(row.try_get("id")?),
        product_id: ProductId::new(row.try_get("product_id")?),
        amount: Yen::new(row.try_get("amount")?),
        status,
        created_at: row.try_get("created_at")?,
    })
}

fn map_unique_violation(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}

const STREET_COLUMNS: &str = "id, name, slug";
const SHOP_COLUMNS: &str =
    "id, street_id, name, category, description, line_url, latitude, longitude";
const PRODUCT_COLUMNS: &str = "id, name, price, shop_id, category, is_sale, sale_price";
const SET_COLUMNS: &str = "id, name, slug, price, description, is_active, created_at";
const EVENT_COLUMNS: &str = "id, title, slug, category, is_regular, schedule_text, start_date, \
     end_date, summary, body, location, announce_from, announce_until, is_featured, is_active, \
     created_at";
const ORDER_COLUMNS: &str = "id, product_id, amount, status, created_at";

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_streets(&self) -> Result<Vec<Street>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {STREET_COLUMNS} FROM street ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_street).collect()
    }

    async fn street_by_slug(&self, slug: &str) -> Result<Option<Street>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {STREET_COLUMNS} FROM street WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_street).transpose()
    }

    async fn list_shops(&self, category: Option<Category>) -> Result<Vec<Shop>, RepositoryError> {
        let rows = match category {
            Some(category) => {
                sqlx::query(&format!(
                    "SELECT {SHOP_COLUMNS} FROM shop WHERE category = $1 ORDER BY name"
                ))
                .bind(category.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {SHOP_COLUMNS} FROM shop ORDER BY name"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(map_shop).collect()
    }

    async fn shop(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {SHOP_COLUMNS} FROM shop WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_shop).transpose()
    }

    async fn shops_by_street(&self, street_id: StreetId) -> Result<Vec<Shop>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {SHOP_COLUMNS} FROM shop WHERE street_id = $1 ORDER BY name"
        ))
        .bind(street_id.as_i32())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_shop).collect()
    }

    async fn shop_by_name(&self, name: &str) -> Result<Option<Shop>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SHOP_COLUMNS} FROM shop WHERE name = $1 ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_shop).transpose()
    }

    async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = match category {
            Some(category) => {
                sqlx::query(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM product WHERE category = $1 ORDER BY id"
                ))
                .bind(category.as_str())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {PRODUCT_COLUMNS} FROM product ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        rows.iter().map(map_product).collect()
    }

    async fn product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_product).transpose()
    }

    async fn products_by_shop(&self, shop_id: ShopId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE shop_id = $1 ORDER BY name"
        ))
        .bind(shop_id.as_i32())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_product).collect()
    }

    async fn sale_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE is_sale ORDER BY id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_product).collect()
    }

    async fn list_sets(&self) -> Result<Vec<ProductSet>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {SET_COLUMNS} FROM product_set WHERE is_active ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_set).collect()
    }

    async fn set_by_slug(&self, slug: &str) -> Result<Option<ProductSet>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SET_COLUMNS} FROM product_set WHERE slug = $1 AND is_active"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_set).transpose()
    }

    async fn set_products(&self, set_id: SetId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT p.id, p.name, p.price, p.shop_id, p.category, p.is_sale, p.sale_price
             FROM product p
             JOIN product_set_member m ON m.product_id = p.id
             WHERE m.set_id = $1
             ORDER BY p.id"
        ))
        .bind(set_id.as_i32())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_product).collect()
    }

    async fn list_events(&self) -> Result<Vec<Event>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM event WHERE is_active ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_event).collect()
    }

    async fn event_by_slug(&self, slug: &str) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM event WHERE slug = $1 AND is_active"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(map_event).transpose()
    }

    async fn create_street(&self, street: NewStreet) -> Result<Street, RepositoryError> {
        let row = sqlx::query(&format!(
            "INSERT INTO street (name, slug) VALUES ($1, $2) RETURNING {STREET_COLUMNS}"
        ))
        .bind(&street.name)
        .bind(&street.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "street slug already exists"))?;
        map_street(&row)
    }

    async fn create_shop(&self, shop: NewShop) -> Result<Shop, RepositoryError> {
        let row = sqlx::query(&format!(
            "INSERT INTO shop (street_id, name, category, description, line_url, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SHOP_COLUMNS}"
        ))
        .bind(shop.street_id.as_i32())
        .bind(&shop.name)
        .bind(shop.category.as_str())
        .bind(&shop.description)
        .bind(&shop.line_url)
        .bind(shop.latitude)
        .bind(shop.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "shop name already exists on this street"))?;
        map_shop(&row)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query(&format!(
            "INSERT INTO product (name, price, shop_id, category, is_sale, sale_price)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&product.name)
        .bind(product.price.as_i64())
        .bind(product.shop_id.map(|id| id.as_i32()))
        .bind(product.category.as_str())
        .bind(product.is_sale)
        .bind(product.sale_price.map(|p| p.as_i64()))
        .fetch_one(&self.pool)
        .await?;
        map_product(&row)
    }

    async fn create_set(&self, set: NewProductSet) -> Result<ProductSet, RepositoryError> {
        let slug = set.resolved_slug();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "INSERT INTO product_set (name, slug, price, description, is_active)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SET_COLUMNS}"
        ))
        .bind(&set.name)
        .bind(&slug)
        .bind(set.price.as_i64())
        .bind(&set.description)
        .bind(set.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "set slug already exists"))?;
        let stored = map_set(&row)?;

        for product_id in &set.product_ids {
            sqlx::query("INSERT INTO product_set_member (set_id, product_id) VALUES ($1, $2)")
                .bind(stored.id.as_i32())
                .bind(product_id.as_i32())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(stored)
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, RepositoryError> {
        let slug = event.resolved_slug();
        let row = sqlx::query(&format!(
            "INSERT INTO event (title, slug, category, is_regular, schedule_text, start_date,
                                end_date, summary, body, location, announce_from, announce_until,
                                is_featured, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.title)
        .bind(&slug)
        .bind(event.category.as_str())
        .bind(event.is_regular)
        .bind(&event.schedule_text)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.summary)
        .bind(&event.body)
        .bind(&event.location)
        .bind(event.announce_from)
        .bind(event.announce_until)
        .bind(event.is_featured)
        .bind(event.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "event slug already exists"))?;
        map_event(&row)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "product is referenced by orders".to_string(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn create(&self, product_id: ProductId, amount: Yen) -> Result<Order, RepositoryError> {
        let row = sqlx::query(&format!(
            "INSERT INTO orders (product_id, amount, status)
             VALUES ($1, $2, $3)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(product_id.as_i32())
        .bind(amount.as_i64())
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;
        map_order(&row)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(map_order).transpose()
    }

    async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(map_order).collect()
    }

    async fn finalize(
        &self,
        id: OrderId,
        outcome: PaymentOutcome,
    ) -> Result<FinalizeResult, RepositoryError> {
        // Only a pending order transitions; a terminal one is returned as-is.
        let updated = sqlx::query(&format!(
            "UPDATE orders SET status = $1 WHERE id = $2 AND status = $3
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(outcome.as_status().as_str())
        .bind(id.as_i32())
        .bind(OrderStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = updated {
            return Ok(FinalizeResult {
                order: map_order(&row)?,
                already_finalized: false,
            });
        }

        let order = self.get(id).await?.ok_or(RepositoryError::NotFound)?;
        Ok(FinalizeResult {
            order,
            already_finalized: true,
        })
    }

    async fn finalize_batch(
        &self,
        ids: &[OrderId],
        outcome: PaymentOutcome,
    ) -> Result<Vec<Order>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(OrderId::as_i32).collect();
        let rows = sqlx::query(&format!(
            "UPDATE orders SET status = $1 WHERE id = ANY($2)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(outcome.as_status().as_str())
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await?;
        let mut orders = rows
            .iter()
            .map(map_order)
            .collect::<Result<Vec<_>, _>>()?;
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }
}

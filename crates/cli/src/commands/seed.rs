//! Catalog seeding command.
//!
//! Seeds the district's sample data: two streets, the consult-preset shops,
//! a handful of products and sets, and a mix of regular and spot events.
//! Intended for fresh databases; seeding twice will hit slug conflicts.

use chrono::{Duration, Local};

use machikado_core::{Category, EventCategory, ProductId, ShopId, Yen};
use machikado_storefront::db::{CatalogStore, PgCatalogStore};
use machikado_storefront::models::{NewEvent, NewProduct, NewProductSet, NewShop, NewStreet};

use super::{CommandError, connect};

/// Seed the catalog with sample data.
///
/// # Errors
///
/// Returns an error when the database is unreachable or an insert fails
/// (e.g. re-seeding an already seeded catalog).
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Connecting to storefront database...");
    let pool = connect().await?;
    let catalog = PgCatalogStore::new(pool);

    tracing::info!("Seeding streets and shops...");
    let chuo = catalog
        .create_street(NewStreet {
            name: "中央通り".to_string(),
            slug: "chuo".to_string(),
        })
        .await?;
    let hondori = catalog
        .create_street(NewStreet {
            name: "本通り".to_string(),
            slug: "hondori".to_string(),
        })
        .await?;

    let uotatsu = seed_shop(&catalog, chuo.id, "魚辰", Category::Fish).await?;
    let marufuku = seed_shop(&catalog, chuo.id, "肉のマルフク", Category::Meat).await?;
    let yaoume = seed_shop(&catalog, chuo.id, "八百梅", Category::Vegetable).await?;
    seed_shop(&catalog, hondori.id, "下ごしらえ工房ことこと", Category::Other).await?;
    let hanamura = seed_shop(&catalog, hondori.id, "惣菜の花むら", Category::Meat).await?;
    seed_shop(&catalog, hondori.id, "果実屋ジュース", Category::Vegetable).await?;

    tracing::info!("Seeding products...");
    let sanma = seed_product(&catalog, uotatsu, "秋刀魚", 300, Category::Fish, false, None).await?;
    seed_product(&catalog, uotatsu, "本まぐろ切り落とし", 980, Category::Fish, true, Some(780))
        .await?;
    let karubi =
        seed_product(&catalog, marufuku, "牛カルビ", 1200, Category::Meat, false, None).await?;
    let butakoma =
        seed_product(&catalog, marufuku, "豚こま", 400, Category::Meat, true, Some(300)).await?;
    let daikon =
        seed_product(&catalog, yaoume, "大根", 200, Category::Vegetable, true, Some(150)).await?;
    let ninjin =
        seed_product(&catalog, yaoume, "にんじん", 120, Category::Vegetable, false, None).await?;
    let korokke =
        seed_product(&catalog, hanamura, "手作りコロッケ", 90, Category::Meat, false, None).await?;

    tracing::info!("Seeding sets...");
    catalog
        .create_set(NewProductSet {
            name: "週末の晩ごはんセット".to_string(),
            slug: Some("weekend-dinner".to_string()),
            price: Yen::new(1500),
            description: "魚と野菜でバランスよく。".to_string(),
            product_ids: vec![sanma, daikon, ninjin],
            is_active: true,
        })
        .await?;
    catalog
        .create_set(NewProductSet {
            name: "おうち焼肉セット".to_string(),
            slug: Some("yakiniku".to_string()),
            price: Yen::new(1800),
            description: "切るだけ、焼くだけ。".to_string(),
            product_ids: vec![karubi, butakoma, korokke],
            is_active: true,
        })
        .await?;

    tracing::info!("Seeding events...");
    let today = Local::now().date_naive();
    catalog
        .create_event(NewEvent {
            title: "朝市".to_string(),
            slug: Some("asaichi".to_string()),
            category: EventCategory::Food,
            is_regular: true,
            schedule_text: "毎週土曜 7:00〜".to_string(),
            start_date: None,
            end_date: None,
            summary: "各店の朝どれが並びます。".to_string(),
            body: String::new(),
            location: "中央通り".to_string(),
            announce_from: None,
            announce_until: None,
            is_featured: true,
            is_active: true,
        })
        .await?;
    catalog
        .create_event(NewEvent {
            title: "ナイト屋台".to_string(),
            slug: Some("night-stalls".to_string()),
            category: EventCategory::Night,
            is_regular: false,
            schedule_text: String::new(),
            start_date: Some(today + Duration::days(7)),
            end_date: Some(today + Duration::days(9)),
            summary: "夜の商店街で一杯。".to_string(),
            body: String::new(),
            location: "中央広場".to_string(),
            announce_from: Some(today - Duration::days(7)),
            announce_until: None,
            is_featured: false,
            is_active: true,
        })
        .await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_shop(
    catalog: &PgCatalogStore,
    street_id: machikado_core::StreetId,
    name: &str,
    category: Category,
) -> Result<ShopId, CommandError> {
    let shop = catalog
        .create_shop(NewShop {
            street_id,
            name: name.to_string(),
            category,
            description: String::new(),
            line_url: None,
            latitude: None,
            longitude: None,
        })
        .await?;
    Ok(shop.id)
}

async fn seed_product(
    catalog: &PgCatalogStore,
    shop_id: ShopId,
    name: &str,
    price: i64,
    category: Category,
    is_sale: bool,
    sale_price: Option<i64>,
) -> Result<ProductId, CommandError> {
    let product = catalog
        .create_product(NewProduct {
            name: name.to_string(),
            price: Yen::new(price),
            shop_id: Some(shop_id),
            category,
            is_sale,
            sale_price: sale_price.map(Yen::new),
        })
        .await?;
    Ok(product.id)
}

//! Consult presets and message composition.
//!
//! A small closed set of consultation scenarios, each routed to a specific
//! shop by exact name lookup. The composed message is the sole output of
//! this component; sending it over a messaging channel is an external
//! collaborator's job.

use serde::{Deserialize, Serialize};

use crate::db::{CatalogStore, RepositoryError};
use crate::models::Shop;

/// A fixed consultation scenario.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConsultPreset {
    /// Stable key used in links (`?preset=bbq`).
    pub key: &'static str,
    pub title: &'static str,
    /// What the mapped shop is good at, shown in the composed message.
    pub skills: &'static str,
    /// Target shop, resolved by exact name.
    pub shop_name: &'static str,
    /// Fill-in-the-blank prompts appended to the message.
    pub questions: &'static [&'static str],
}

/// The consult presets, in display order.
pub const PRESETS: &[ConsultPreset] = &[
    ConsultPreset {
        key: "sashimi",
        title: "刺身盛り、予算で作れます",
        skills: "人数・予算・苦手を言うだけで、旬の魚でお造りを組みます。",
        shop_name: "魚辰",
        questions: &["人数", "予算", "苦手な魚・アレルギー", "受け取り希望時間"],
    },
    ConsultPreset {
        key: "bbq",
        title: "BBQ用に、肉と野菜まとめて",
        skills: "焼きやすい厚さに切って、人数分をまとめてご用意します。",
        shop_name: "肉のマルフク",
        questions: &["人数", "予算", "焼き場の有無", "受け取り希望時間"],
    },
    ConsultPreset {
        key: "sasagaki",
        title: "ささがき、必要な分だけ",
        skills: "用途と量を言うだけ。太さも料理に合わせます。",
        shop_name: "八百梅",
        questions: &["用途（きんぴら・汁物など）", "量", "受け取り希望時間"],
    },
    ConsultPreset {
        key: "prep",
        title: "下ごしらえ、おまかせで",
        skills: "皮むき・カット・下茹でまで済ませてお渡しします。",
        shop_name: "下ごしらえ工房ことこと",
        questions: &["作る料理", "人数", "アレルギー", "受け取り希望時間"],
    },
    ConsultPreset {
        key: "okazu",
        title: "今夜のおかず、提案して",
        skills: "好みと予算を言えば、プロが今夜の一品を提案します。",
        shop_name: "惣菜の花むら",
        questions: &["好み（和・洋・中）", "予算", "苦手なもの", "受け取り希望時間"],
    },
    ConsultPreset {
        key: "smoothie",
        title: "果物、飲みごろで選びます",
        skills: "スムージー向けの熟れ具合で果物を見立てます。",
        shop_name: "果実屋ジュース",
        questions: &["作りたい量", "甘さの好み", "受け取り希望時間"],
    },
];

/// Generic prompts for a direct shop consultation (no preset).
pub const GENERAL_QUESTIONS: &[&str] = &["相談したいこと", "数量や予算", "受け取り希望時間"];

/// Look up a preset by key.
#[must_use]
pub fn preset(key: &str) -> Option<&'static ConsultPreset> {
    PRESETS.iter().find(|p| p.key == key)
}

/// Optional context carried into the composed message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultContext {
    /// Product name the visitor was looking at.
    pub product: Option<String>,
    pub quantity: Option<u32>,
    /// Set (bundle) name.
    pub set: Option<String>,
    /// Existing order id.
    pub order: Option<i32>,
    /// Free-text note.
    pub note: Option<String>,
}

/// Resolve a preset key to its target shop.
///
/// Returns `None` (not an error) when the key is unmapped or the named shop
/// is absent from the catalog; callers fall through to the generic preset
/// listing.
///
/// # Errors
///
/// Store failures only.
pub async fn resolve_preset_shop(
    catalog: &dyn CatalogStore,
    key: &str,
) -> Result<Option<(&'static ConsultPreset, Shop)>, RepositoryError> {
    let Some(preset) = preset(key) else {
        return Ok(None);
    };
    let Some(shop) = catalog.shop_by_name(preset.shop_name).await? else {
        return Ok(None);
    };
    Ok(Some((preset, shop)))
}

/// Compose the consultation message for a shop.
///
/// Greeting, the preset's skills section (when a preset applies), any
/// supplied context lines, then the fill-in prompts.
#[must_use]
pub fn compose_message(
    shop_name: &str,
    preset: Option<&ConsultPreset>,
    context: &ConsultContext,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("{shop_name}さん、こんにちは。"));
    lines.push(String::new());

    if let Some(preset) = preset {
        lines.push(format!("【{}】の相談です。", preset.title));
        lines.push(preset.skills.to_string());
        lines.push(String::new());
    } else {
        lines.push("お店への相談です。".to_string());
        lines.push(String::new());
    }

    let mut has_context = false;
    if let Some(product) = context.product.as_deref() {
        match context.quantity {
            Some(quantity) => lines.push(format!("商品: {product} × {quantity}")),
            None => lines.push(format!("商品: {product}")),
        }
        has_context = true;
    }
    if let Some(set) = context.set.as_deref() {
        lines.push(format!("セット: {set}"));
        has_context = true;
    }
    if let Some(order) = context.order {
        lines.push(format!("注文番号: #{order}"));
        has_context = true;
    }
    if let Some(note) = context.note.as_deref()
        && !note.trim().is_empty()
    {
        lines.push(format!("メモ: {}", note.trim()));
        has_context = true;
    }
    if has_context {
        lines.push(String::new());
    }

    lines.push("教えてください:".to_string());
    let questions = preset.map_or(GENERAL_QUESTIONS, |p| p.questions);
    for question in questions {
        lines.push(format!("・{question}: "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use machikado_core::{Category, StreetId};

    use crate::db::MemoryStore;
    use crate::models::{NewShop, NewStreet};

    async fn seed_street(store: &MemoryStore) -> StreetId {
        store
            .create_street(NewStreet {
                name: "中央通り".to_string(),
                slug: "chuo".to_string(),
            })
            .await
            .expect("street")
            .id
    }

    async fn seed_shop(store: &MemoryStore, street_id: StreetId, name: &str) {
        store
            .create_shop(NewShop {
                street_id,
                name: name.to_string(),
                category: Category::Other,
                description: String::new(),
                line_url: None,
                latitude: None,
                longitude: None,
            })
            .await
            .expect("shop");
    }

    #[tokio::test]
    async fn test_bbq_preset_resolves_to_mapped_shop() {
        let store = MemoryStore::new();
        let street_id = seed_street(&store).await;
        seed_shop(&store, street_id, "肉のマルフク").await;

        let resolved = resolve_preset_shop(&store, "bbq").await.expect("resolve");
        let (preset, shop) = resolved.expect("must resolve");
        assert_eq!(preset.key, "bbq");
        assert_eq!(shop.name, "肉のマルフク");
    }

    #[tokio::test]
    async fn test_unmapped_key_falls_through() {
        let store = MemoryStore::new();
        let resolved = resolve_preset_shop(&store, "karaoke").await.expect("resolve");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_mapped_key_with_absent_shop_falls_through() {
        let store = MemoryStore::new();
        // Catalog has no shops at all.
        let resolved = resolve_preset_shop(&store, "bbq").await.expect("resolve");
        assert!(resolved.is_none());
    }

    #[test]
    fn test_compose_message_with_preset_and_context() {
        let preset = preset("sashimi").expect("preset");
        let context = ConsultContext {
            product: Some("本まぐろ".to_string()),
            quantity: Some(2),
            set: None,
            order: Some(31),
            note: Some("  19時ごろ受け取りたいです ".to_string()),
        };

        let message = compose_message("魚辰", Some(preset), &context);

        assert!(message.starts_with("魚辰さん、こんにちは。"));
        assert!(message.contains("【刺身盛り、予算で作れます】の相談です。"));
        assert!(message.contains("商品: 本まぐろ × 2"));
        assert!(message.contains("注文番号: #31"));
        assert!(message.contains("メモ: 19時ごろ受け取りたいです"));
        assert!(message.contains("・予算: "));
    }

    #[test]
    fn test_compose_message_without_preset_uses_general_questions() {
        let message = compose_message("八百梅", None, &ConsultContext::default());
        assert!(message.contains("お店への相談です。"));
        assert!(message.contains("・相談したいこと: "));
        assert!(!message.contains("商品:"));
    }

    #[test]
    fn test_every_preset_key_is_unique_and_mapped() {
        let mut keys: Vec<&str> = PRESETS.iter().map(|p| p.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), PRESETS.len());

        for p in PRESETS {
            assert!(!p.shop_name.is_empty());
            assert!(!p.questions.is_empty());
        }
    }
}

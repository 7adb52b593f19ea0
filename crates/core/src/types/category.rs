//! Category tags for shops, products, and events.

use serde::{Deserialize, Serialize};

/// Category tag shared by shops and their products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// 野菜・果物
    Vegetable,
    /// お肉・惣菜
    Meat,
    /// お魚
    Fish,
    /// パン・ケーキ・菓子
    Bread,
    /// 乾物・お茶
    Dry,
    /// その他
    #[default]
    Other,
}

impl Category {
    /// The tag as its stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetable => "vegetable",
            Self::Meat => "meat",
            Self::Fish => "fish",
            Self::Bread => "bread",
            Self::Dry => "dry",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vegetable" => Ok(Self::Vegetable),
            "meat" => Ok(Self::Meat),
            "fish" => Ok(Self::Fish),
            "bread" => Ok(Self::Bread),
            "dry" => Ok(Self::Dry),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Category tag for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// 食
    Food,
    /// 体験
    Experience,
    /// 子ども
    Kids,
    /// 特売
    Sale,
    /// 季節
    #[default]
    Season,
    /// ナイト屋台
    Night,
    /// 試食リレー
    Tasting,
    /// レトロ歓迎
    Retro,
    /// 雨の日
    Rainy,
    /// その他
    Other,
}

impl EventCategory {
    /// The tag as its stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Experience => "experience",
            Self::Kids => "kids",
            Self::Sale => "sale",
            Self::Season => "season",
            Self::Night => "night",
            Self::Tasting => "tasting",
            Self::Retro => "retro",
            Self::Rainy => "rainy",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(Self::Food),
            "experience" => Ok(Self::Experience),
            "kids" => Ok(Self::Kids),
            "sale" => Ok(Self::Sale),
            "season" => Ok(Self::Season),
            "night" => Ok(Self::Night),
            "tasting" => Ok(Self::Tasting),
            "retro" => Ok(Self::Retro),
            "rainy" => Ok(Self::Rainy),
            "other" => Ok(Self::Other),
            _ => Err(format!("invalid event category: {s}")),
        }
    }
}

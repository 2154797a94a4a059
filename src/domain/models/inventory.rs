use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three shop categories. Item ids are globally unique across all three
/// by construction of the static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Clothing,
    Accessories,
    Backgrounds,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [
        ItemCategory::Clothing,
        ItemCategory::Accessories,
        ItemCategory::Backgrounds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Clothing => "Clothing & hats",
            ItemCategory::Accessories => "Accessories",
            ItemCategory::Backgrounds => "Backgrounds",
        }
    }
}

/// Per-kid record of owned and equipped shop items.
///
/// Invariant: `equipped[category]` is either absent or a member of the owned
/// list for that category. Purchases auto-equip, so the invariant is upheld
/// by the shop service, not re-checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub clothing: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub backgrounds: Vec<String>,
    #[serde(default)]
    pub equipped: HashMap<ItemCategory, String>,
}

impl Inventory {
    pub fn owned(&self, category: ItemCategory) -> &[String] {
        match category {
            ItemCategory::Clothing => &self.clothing,
            ItemCategory::Accessories => &self.accessories,
            ItemCategory::Backgrounds => &self.backgrounds,
        }
    }

    pub fn owned_mut(&mut self, category: ItemCategory) -> &mut Vec<String> {
        match category {
            ItemCategory::Clothing => &mut self.clothing,
            ItemCategory::Accessories => &mut self.accessories,
            ItemCategory::Backgrounds => &mut self.backgrounds,
        }
    }

    pub fn owns(&self, category: ItemCategory, item_id: &str) -> bool {
        self.owned(category).iter().any(|id| id == item_id)
    }

    pub fn equipped_in(&self, category: ItemCategory) -> Option<&str> {
        self.equipped.get(&category).map(String::as_str)
    }
}

//! Static shop catalog.
//!
//! The catalog is read-only and not persisted; inventories reference items
//! by id. Backgrounds carry a CSS-style gradient hint for presentation.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::inventory::ItemCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub price: u32,
    pub description: &'static str,
    pub gradient: Option<&'static str>,
}

pub static CLOTHING: &[ShopItem] = &[
    ShopItem {
        id: "hat1",
        name: "Cool Hat",
        emoji: "🎩",
        price: 15,
        description: "A stylish hat for your hardworking kiddo.",
        gradient: None,
    },
    ShopItem {
        id: "hat2",
        name: "Party Hat",
        emoji: "🎉",
        price: 12,
        description: "Celebrate chore victories in style.",
        gradient: None,
    },
    ShopItem {
        id: "glasses",
        name: "Sunglasses",
        emoji: "🕶️",
        price: 10,
        description: "Stay cool while doing chores.",
        gradient: None,
    },
    ShopItem {
        id: "crown",
        name: "Royal Crown",
        emoji: "👑",
        price: 25,
        description: "A royal reward for top performers.",
        gradient: None,
    },
    ShopItem {
        id: "bow",
        name: "Cute Bow",
        emoji: "🎀",
        price: 8,
        description: "Adorable accessory for your pet.",
        gradient: None,
    },
];

pub static ACCESSORIES: &[ShopItem] = &[
    ShopItem {
        id: "ball",
        name: "Play Ball",
        emoji: "⚽",
        price: 5,
        description: "Keep your pet active and happy.",
        gradient: None,
    },
    ShopItem {
        id: "bone",
        name: "Treat Bone",
        emoji: "🦴",
        price: 7,
        description: "A tasty treat for loyal pets.",
        gradient: None,
    },
    ShopItem {
        id: "toy",
        name: "Toy Mouse",
        emoji: "🐭",
        price: 6,
        description: "Perfect for playful kitties.",
        gradient: None,
    },
    ShopItem {
        id: "star",
        name: "Star Badge",
        emoji: "⭐",
        price: 20,
        description: "Show off chore mastery.",
        gradient: None,
    },
];

pub static BACKGROUNDS: &[ShopItem] = &[
    ShopItem {
        id: "bg1",
        name: "Garden",
        emoji: "🌳",
        price: 30,
        description: "A lush green getaway.",
        gradient: Some("from-green-300 to-green-500"),
    },
    ShopItem {
        id: "bg2",
        name: "Beach",
        emoji: "🏖️",
        price: 30,
        description: "Sunny vibes for sunny chores.",
        gradient: Some("from-yellow-300 to-blue-400"),
    },
    ShopItem {
        id: "bg3",
        name: "Space",
        emoji: "🚀",
        price: 40,
        description: "Launch into adventure.",
        gradient: Some("from-purple-900 to-blue-900"),
    },
    ShopItem {
        id: "bg4",
        name: "Castle",
        emoji: "🏰",
        price: 50,
        description: "Fit for chore royalty.",
        gradient: Some("from-gray-400 to-purple-600"),
    },
];

/// Category filter options shown by the rewards page.
pub static REWARD_CATEGORIES: &[(&str, &str)] = &[
    ("all", "All categories"),
    ("clothing", "Clothing & hats"),
    ("accessories", "Accessories"),
    ("backgrounds", "Backgrounds"),
];

/// Index from item id to its category and item, built once on first use.
static ITEM_INDEX: Lazy<HashMap<&'static str, (ItemCategory, &'static ShopItem)>> =
    Lazy::new(|| {
        let mut index = HashMap::new();
        for (category, items) in [
            (ItemCategory::Clothing, CLOTHING),
            (ItemCategory::Accessories, ACCESSORIES),
            (ItemCategory::Backgrounds, BACKGROUNDS),
        ] {
            for item in items {
                let previous = index.insert(item.id, (category, item));
                debug_assert!(previous.is_none(), "duplicate catalog id {}", item.id);
            }
        }
        index
    });

/// All items in a category.
pub fn items(category: ItemCategory) -> &'static [ShopItem] {
    match category {
        ItemCategory::Clothing => CLOTHING,
        ItemCategory::Accessories => ACCESSORIES,
        ItemCategory::Backgrounds => BACKGROUNDS,
    }
}

/// Look up an item by id within one category.
pub fn find(category: ItemCategory, item_id: &str) -> Option<&'static ShopItem> {
    ITEM_INDEX
        .get(item_id)
        .filter(|(item_category, _)| *item_category == category)
        .map(|(_, item)| *item)
}

/// Look up an item by id across all categories.
pub fn find_any(item_id: &str) -> Option<(ItemCategory, &'static ShopItem)> {
    ITEM_INDEX.get(item_id).map(|(category, item)| (*category, *item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_unique_across_categories() {
        let total = CLOTHING.len() + ACCESSORIES.len() + BACKGROUNDS.len();
        assert_eq!(ITEM_INDEX.len(), total);
    }

    #[test]
    fn test_find_respects_category() {
        assert!(find(ItemCategory::Clothing, "hat1").is_some());
        assert!(find(ItemCategory::Accessories, "hat1").is_none());
        assert!(find(ItemCategory::Backgrounds, "bg3").is_some());
    }

    #[test]
    fn test_prices_are_positive() {
        for category in ItemCategory::ALL {
            for item in items(category) {
                assert!(item.price > 0, "item {} has zero price", item.id);
            }
        }
    }

    #[test]
    fn test_only_backgrounds_have_gradients() {
        assert!(BACKGROUNDS.iter().all(|item| item.gradient.is_some()));
        assert!(CLOTHING.iter().all(|item| item.gradient.is_none()));
        assert!(ACCESSORIES.iter().all(|item| item.gradient.is_none()));
    }
}

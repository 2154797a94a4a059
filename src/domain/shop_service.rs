//! Shop purchases and equipping cosmetic items.

use log::info;
use std::sync::Arc;

use crate::domain::household::HouseholdStore;
use crate::domain::models::catalog;
use crate::domain::models::ItemCategory;
use crate::error::EngineError;
use crate::storage::Document;

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub item_id: String,
    pub category: ItemCategory,
    pub price: u32,
    pub coins: u32,
}

/// Service for the cosmetic item shop.
#[derive(Clone)]
pub struct ShopService {
    store: Arc<HouseholdStore>,
}

impl ShopService {
    pub fn new(store: Arc<HouseholdStore>) -> Self {
        Self { store }
    }

    /// Buy a catalog item for a kid. The purchase auto-equips the item in
    /// its category; that is the product rule, not an accident.
    pub fn buy_item(
        &self,
        kid_id: &str,
        item_id: &str,
        category: ItemCategory,
    ) -> Result<Purchase, EngineError> {
        let item = catalog::find(category, item_id)
            .ok_or_else(|| EngineError::not_found("item", item_id))?;

        let purchase = self
            .store
            .mutate(&[Document::Inventories, Document::Kids], |h| {
                h.kid(kid_id)?;
                {
                    let inventory = h.inventories.entry(kid_id.to_string()).or_default();
                    if inventory.owns(category, item_id) {
                        return Err(EngineError::AlreadyOwned { item_id: item_id.to_string() });
                    }
                    inventory.owned_mut(category).push(item_id.to_string());
                    inventory.equipped.insert(category, item_id.to_string());
                }
                let coins = h.spend(kid_id, item.price)?;
                Ok(Purchase {
                    item_id: item_id.to_string(),
                    category,
                    price: item.price,
                    coins,
                })
            })?;

        info!(
            "Kid {} bought '{}' for {} coins ({} left)",
            kid_id, item.name, purchase.price, purchase.coins
        );
        Ok(purchase)
    }

    /// Equip an owned item. Idempotent; no coin effect.
    pub fn equip_item(
        &self,
        kid_id: &str,
        item_id: &str,
        category: ItemCategory,
    ) -> Result<(), EngineError> {
        self.store.mutate(&[Document::Inventories], |h| {
            h.kid(kid_id)?;
            let inventory = h.inventories.entry(kid_id.to_string()).or_default();
            if !inventory.owns(category, item_id) {
                return Err(EngineError::NotOwned { item_id: item_id.to_string() });
            }
            inventory.equipped.insert(category, item_id.to_string());
            Ok(())
        })?;

        info!("Kid {} equipped '{}'", kid_id, item_id);
        Ok(())
    }
}

//! Kid administration.
//!
//! Creating a kid fans out to all five per-kid documents and deleting one
//! cascades across them; both run as a single mutation whose writes are
//! ordered and compensated by the store, so the key-sets of the per-kid maps
//! stay synchronized with the kid list.

use log::info;
use std::sync::Arc;

use crate::domain::commands::kid::{
    DeleteKidCommand, DeleteKidResult, SaveKidCommand, SaveKidResult,
};
use crate::domain::household::HouseholdStore;
use crate::domain::models::{Inventory, Kid, PetState};
use crate::error::EngineError;
use crate::storage::Document;

const KID_CREATION_DOCUMENTS: [Document; 5] = [
    Document::Kids,
    Document::DailyProgress,
    Document::PetStates,
    Document::Inventories,
    Document::KidPets,
];

/// Service for managing kids in the household.
#[derive(Clone)]
pub struct KidService {
    store: Arc<HouseholdStore>,
}

impl KidService {
    pub fn new(store: Arc<HouseholdStore>) -> Self {
        Self { store }
    }

    /// Create a new kid or edit an existing one's profile. Creation seeds
    /// empty daily progress, default pet state, an empty inventory, and an
    /// empty owned-pets list; editing leaves economy state alone.
    pub fn save_kid(&self, command: SaveKidCommand) -> Result<SaveKidResult, EngineError> {
        self.validate(&command)?;
        let name = command.name.trim().to_string();

        let result = match command.id {
            Some(kid_id) => self.store.mutate(&[Document::Kids], |h| {
                let kid = h.kid_mut(&kid_id)?;
                kid.name = name.clone();
                kid.age = command.age;
                kid.updated_at = chrono::Utc::now();
                Ok(SaveKidResult { kid: kid.clone(), created: false })
            })?,
            None => self.store.mutate(&KID_CREATION_DOCUMENTS, |h| {
                let kid = Kid::new(name.clone(), command.age);
                h.daily_progress.insert(kid.id.clone(), Vec::new());
                h.pet_states.insert(kid.id.clone(), PetState::default());
                h.inventories.insert(kid.id.clone(), Inventory::default());
                h.kid_pets.insert(kid.id.clone(), Vec::new());
                h.kids.push(kid.clone());
                Ok(SaveKidResult { kid, created: true })
            })?,
        };

        info!(
            "{} kid '{}' ({})",
            if result.created { "Created" } else { "Updated" },
            result.kid.name,
            result.kid.id
        );
        Ok(result)
    }

    /// Delete a kid, cascading to their progress, pet state, inventory, and
    /// owned pets.
    pub fn delete_kid(&self, command: DeleteKidCommand) -> Result<DeleteKidResult, EngineError> {
        let kid_id = command.kid_id;
        let name = self.store.mutate(&KID_CREATION_DOCUMENTS, |h| {
            let position = h
                .kids
                .iter()
                .position(|kid| kid.id == kid_id)
                .ok_or_else(|| EngineError::not_found("kid", kid_id.clone()))?;
            let removed = h.kids.remove(position);
            h.daily_progress.remove(&kid_id);
            h.pet_states.remove(&kid_id);
            h.inventories.remove(&kid_id);
            h.kid_pets.remove(&kid_id);
            Ok(removed.name)
        })?;

        info!("Deleted kid '{}' ({})", name, kid_id);
        Ok(DeleteKidResult {
            success_message: format!("Kid '{}' deleted successfully", name),
        })
    }

    fn validate(&self, command: &SaveKidCommand) -> Result<(), EngineError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(EngineError::Validation("kid name cannot be empty".to_string()));
        }
        if name.len() > 100 {
            return Err(EngineError::Validation(
                "kid name cannot exceed 100 characters".to_string(),
            ));
        }
        Ok(())
    }
}

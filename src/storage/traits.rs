//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different
//! document stores to be used interchangeably by the domain layer.
//!
//! The household's state lives in six logical documents, each written as a
//! whole (document-level overwrite, last writer wins). There are no
//! cross-document transactions; multi-document operations order their writes
//! and compensate on partial failure in the domain layer.

use anyhow::Result;
use std::collections::HashMap;

use crate::domain::models::{Chore, Inventory, Kid, OwnedPet, PetState};

/// The six logical documents of a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    Kids,
    Chores,
    DailyProgress,
    PetStates,
    Inventories,
    KidPets,
}

impl Document {
    pub const ALL: [Document; 6] = [
        Document::Kids,
        Document::Chores,
        Document::DailyProgress,
        Document::PetStates,
        Document::Inventories,
        Document::KidPets,
    ];

    /// Logical document name, also used as the storage key or file stem.
    pub fn name(self) -> &'static str {
        match self {
            Document::Kids => "kids",
            Document::Chores => "chores",
            Document::DailyProgress => "dailyProgress",
            Document::PetStates => "petStates",
            Document::Inventories => "inventories",
            Document::KidPets => "kidPets",
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait defining the interface for household document storage.
///
/// `load_*` returns `Ok(None)` when the document has never been written,
/// which the engine uses to decide whether to seed the default household.
/// All operations are synchronous; callers serialize writes themselves.
pub trait HouseholdStorage: Send + Sync {
    fn load_kids(&self) -> Result<Option<Vec<Kid>>>;
    fn save_kids(&self, kids: &[Kid]) -> Result<()>;

    fn load_chores(&self) -> Result<Option<Vec<Chore>>>;
    fn save_chores(&self, chores: &[Chore]) -> Result<()>;

    fn load_daily_progress(&self) -> Result<Option<HashMap<String, Vec<String>>>>;
    fn save_daily_progress(&self, progress: &HashMap<String, Vec<String>>) -> Result<()>;

    fn load_pet_states(&self) -> Result<Option<HashMap<String, PetState>>>;
    fn save_pet_states(&self, states: &HashMap<String, PetState>) -> Result<()>;

    fn load_inventories(&self) -> Result<Option<HashMap<String, Inventory>>>;
    fn save_inventories(&self, inventories: &HashMap<String, Inventory>) -> Result<()>;

    fn load_kid_pets(&self) -> Result<Option<HashMap<String, Vec<OwnedPet>>>>;
    fn save_kid_pets(&self, pets: &HashMap<String, Vec<OwnedPet>>) -> Result<()>;
}

//! In-memory document store.
//!
//! Keeps each document as a `serde_json::Value` so the serialized shape is
//! exercised the same way the file store exercises it. Used by tests and by
//! embedders that do not want durable storage.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{Document, HouseholdStorage};
use crate::domain::models::{Chore, Inventory, Kid, OwnedPet, PetState};

#[derive(Default)]
pub struct MemoryHouseholdStorage {
    documents: Mutex<HashMap<&'static str, serde_json::Value>>,
}

impl MemoryHouseholdStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T: DeserializeOwned>(&self, document: Document) -> Result<Option<T>> {
        let documents = self.documents.lock().expect("memory storage lock poisoned");
        match documents.get(document.name()) {
            Some(value) => {
                let data = serde_json::from_value(value.clone())
                    .with_context(|| format!("decoding document {}", document))?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, document: Document, data: &T) -> Result<()> {
        let value = serde_json::to_value(data)
            .with_context(|| format!("encoding document {}", document))?;
        let mut documents = self.documents.lock().expect("memory storage lock poisoned");
        documents.insert(document.name(), value);
        Ok(())
    }
}

impl HouseholdStorage for MemoryHouseholdStorage {
    fn load_kids(&self) -> Result<Option<Vec<Kid>>> {
        self.read(Document::Kids)
    }

    fn save_kids(&self, kids: &[Kid]) -> Result<()> {
        self.write(Document::Kids, &kids)
    }

    fn load_chores(&self) -> Result<Option<Vec<Chore>>> {
        self.read(Document::Chores)
    }

    fn save_chores(&self, chores: &[Chore]) -> Result<()> {
        self.write(Document::Chores, &chores)
    }

    fn load_daily_progress(&self) -> Result<Option<HashMap<String, Vec<String>>>> {
        self.read(Document::DailyProgress)
    }

    fn save_daily_progress(&self, progress: &HashMap<String, Vec<String>>) -> Result<()> {
        self.write(Document::DailyProgress, progress)
    }

    fn load_pet_states(&self) -> Result<Option<HashMap<String, PetState>>> {
        self.read(Document::PetStates)
    }

    fn save_pet_states(&self, states: &HashMap<String, PetState>) -> Result<()> {
        self.write(Document::PetStates, states)
    }

    fn load_inventories(&self) -> Result<Option<HashMap<String, Inventory>>> {
        self.read(Document::Inventories)
    }

    fn save_inventories(&self, inventories: &HashMap<String, Inventory>) -> Result<()> {
        self.write(Document::Inventories, inventories)
    }

    fn load_kid_pets(&self) -> Result<Option<HashMap<String, Vec<OwnedPet>>>> {
        self.read(Document::KidPets)
    }

    fn save_kid_pets(&self, pets: &HashMap<String, Vec<OwnedPet>>) -> Result<()> {
        self.write(Document::KidPets, pets)
    }
}

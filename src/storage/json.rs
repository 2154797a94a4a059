//! JSON-file document store.
//!
//! One file per logical document under a base directory, each holding a
//! `{"data": ...}` envelope. Writes go through a temp file and rename so a
//! crash never leaves a half-written document behind.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use super::traits::{Document, HouseholdStorage};
use crate::domain::models::{Chore, Inventory, Kid, OwnedPet, PetState};

/// Envelope matching the on-the-wire document shape.
#[derive(Debug, Serialize, Deserialize)]
struct DocumentEnvelope<T> {
    data: T,
}

/// File-backed household storage rooted at a base directory.
pub struct JsonHouseholdStorage {
    base_directory: PathBuf,
}

impl JsonHouseholdStorage {
    pub fn new(base_directory: impl Into<PathBuf>) -> Result<Self> {
        let base_directory = base_directory.into();
        fs::create_dir_all(&base_directory)
            .with_context(|| format!("creating storage directory {:?}", base_directory))?;
        info!("Opened JSON household storage at {:?}", base_directory);
        Ok(JsonHouseholdStorage { base_directory })
    }

    pub fn base_directory(&self) -> &PathBuf {
        &self.base_directory
    }

    fn document_path(&self, document: Document) -> PathBuf {
        self.base_directory.join(format!("{}.json", document.name()))
    }

    fn read_document<T: DeserializeOwned>(&self, document: Document) -> Result<Option<T>> {
        let path = self.document_path(document);
        if !path.exists() {
            debug!("Document {} does not exist yet", document);
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading document {:?}", path))?;
        let envelope: DocumentEnvelope<T> = serde_json::from_str(&content)
            .with_context(|| format!("parsing document {:?}", path))?;
        Ok(Some(envelope.data))
    }

    fn write_document<T: Serialize>(&self, document: Document, data: &T) -> Result<()> {
        let path = self.document_path(document);
        let envelope = DocumentEnvelope { data };
        let content = serde_json::to_string_pretty(&envelope)
            .with_context(|| format!("serializing document {}", document))?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("writing document {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("committing document {:?}", path))?;

        debug!("Wrote document {}", document);
        Ok(())
    }
}

impl HouseholdStorage for JsonHouseholdStorage {
    fn load_kids(&self) -> Result<Option<Vec<Kid>>> {
        self.read_document(Document::Kids)
    }

    fn save_kids(&self, kids: &[Kid]) -> Result<()> {
        self.write_document(Document::Kids, &kids)
    }

    fn load_chores(&self) -> Result<Option<Vec<Chore>>> {
        self.read_document(Document::Chores)
    }

    fn save_chores(&self, chores: &[Chore]) -> Result<()> {
        self.write_document(Document::Chores, &chores)
    }

    fn load_daily_progress(&self) -> Result<Option<HashMap<String, Vec<String>>>> {
        self.read_document(Document::DailyProgress)
    }

    fn save_daily_progress(&self, progress: &HashMap<String, Vec<String>>) -> Result<()> {
        self.write_document(Document::DailyProgress, progress)
    }

    fn load_pet_states(&self) -> Result<Option<HashMap<String, PetState>>> {
        self.read_document(Document::PetStates)
    }

    fn save_pet_states(&self, states: &HashMap<String, PetState>) -> Result<()> {
        self.write_document(Document::PetStates, states)
    }

    fn load_inventories(&self) -> Result<Option<HashMap<String, Inventory>>> {
        self.read_document(Document::Inventories)
    }

    fn save_inventories(&self, inventories: &HashMap<String, Inventory>) -> Result<()> {
        self.write_document(Document::Inventories, inventories)
    }

    fn load_kid_pets(&self) -> Result<Option<HashMap<String, Vec<OwnedPet>>>> {
        self.read_document(Document::KidPets)
    }

    fn save_kid_pets(&self, pets: &HashMap<String, Vec<OwnedPet>>) -> Result<()> {
        self.write_document(Document::KidPets, pets)
    }
}

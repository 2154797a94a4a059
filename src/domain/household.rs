//! Shared household state and the store that owns it.
//!
//! [`Household`] is the single source of truth for the six collections. The
//! coin primitives `earn` and `spend` live here so "coins never go negative"
//! is enforced in exactly one place.
//!
//! [`HouseholdStore`] serializes every mutation through one write lock
//! (read-modify-write under the lock, so two in-process callers can never
//! clobber each other), persists the affected documents in order, and rolls
//! the in-memory snapshot back if any write fails. Writes already committed
//! before the failure are compensated with a re-write of the restored state.
//! Cross-process writers still race at document granularity; that limitation
//! comes with the last-writer-wins storage model.

use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::models::{Chore, Inventory, Kid, OwnedPet, PetState};
use crate::error::EngineError;
use crate::storage::{Document, HouseholdStorage};

/// All household state, mirrored one-to-one onto the six persisted documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Household {
    pub kids: Vec<Kid>,
    pub chores: Vec<Chore>,
    pub daily_progress: HashMap<String, Vec<String>>,
    pub pet_states: HashMap<String, PetState>,
    pub inventories: HashMap<String, Inventory>,
    pub kid_pets: HashMap<String, Vec<OwnedPet>>,
}

impl Household {
    pub fn kid(&self, kid_id: &str) -> Result<&Kid, EngineError> {
        self.kids
            .iter()
            .find(|kid| kid.id == kid_id)
            .ok_or_else(|| EngineError::not_found("kid", kid_id))
    }

    pub fn kid_mut(&mut self, kid_id: &str) -> Result<&mut Kid, EngineError> {
        self.kids
            .iter_mut()
            .find(|kid| kid.id == kid_id)
            .ok_or_else(|| EngineError::not_found("kid", kid_id))
    }

    pub fn chore(&self, chore_id: &str) -> Result<&Chore, EngineError> {
        self.chores
            .iter()
            .find(|chore| chore.id == chore_id)
            .ok_or_else(|| EngineError::not_found("chore", chore_id))
    }

    /// Chores applicable to the given kid (all-kids chores plus the kid's own).
    pub fn relevant_chores(&self, kid_id: &str) -> Vec<&Chore> {
        self.chores
            .iter()
            .filter(|chore| chore.applies_to(kid_id))
            .collect()
    }

    /// Completed chore ids for the kid, empty if none recorded yet.
    pub fn completed_chores(&self, kid_id: &str) -> &[String] {
        self.daily_progress
            .get(kid_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The kid's currently active pet, derived from the owned-pets list.
    pub fn active_pet(&self, kid_id: &str) -> Option<&OwnedPet> {
        let kid = self.kids.iter().find(|kid| kid.id == kid_id)?;
        let pet_id = kid.active_pet.as_deref()?;
        self.kid_pets
            .get(kid_id)?
            .iter()
            .find(|pet| pet.id == pet_id)
    }

    /// Credit (or, for negative deltas, debit) coins, clamping the balance
    /// to the `0..=u32::MAX` range. Returns the new balance.
    pub fn earn(&mut self, kid_id: &str, delta: i64) -> Result<u32, EngineError> {
        let kid = self.kid_mut(kid_id)?;
        let next = (kid.coins as i64 + delta).clamp(0, u32::MAX as i64);
        kid.coins = next as u32;
        kid.updated_at = chrono::Utc::now();
        Ok(kid.coins)
    }

    /// Deduct coins, declining with `InsufficientFunds` when the balance does
    /// not cover the amount. Returns the new balance.
    pub fn spend(&mut self, kid_id: &str, amount: u32) -> Result<u32, EngineError> {
        let kid = self.kid_mut(kid_id)?;
        if kid.coins < amount {
            return Err(EngineError::InsufficientFunds {
                needed: amount,
                available: kid.coins,
            });
        }
        kid.coins -= amount;
        kid.updated_at = chrono::Utc::now();
        Ok(kid.coins)
    }
}

/// An externally pushed document snapshot, e.g. from another device writing
/// the same household.
#[derive(Debug, Clone)]
pub enum RemoteUpdate {
    Kids(Vec<Kid>),
    Chores(Vec<Chore>),
    DailyProgress(HashMap<String, Vec<String>>),
    PetStates(HashMap<String, PetState>),
    Inventories(HashMap<String, Inventory>),
    KidPets(HashMap<String, Vec<OwnedPet>>),
}

impl RemoteUpdate {
    pub fn document(&self) -> Document {
        match self {
            RemoteUpdate::Kids(_) => Document::Kids,
            RemoteUpdate::Chores(_) => Document::Chores,
            RemoteUpdate::DailyProgress(_) => Document::DailyProgress,
            RemoteUpdate::PetStates(_) => Document::PetStates,
            RemoteUpdate::Inventories(_) => Document::Inventories,
            RemoteUpdate::KidPets(_) => Document::KidPets,
        }
    }
}

type Observer = Arc<dyn Fn(&[Document]) + Send + Sync>;

/// Owns the in-memory household snapshot and its persistence.
pub struct HouseholdStore {
    storage: Arc<dyn HouseholdStorage>,
    state: RwLock<Household>,
    observers: Mutex<Vec<(u64, Observer)>>,
    next_observer_id: AtomicU64,
}

impl HouseholdStore {
    /// Load the household from storage, seeding the default household the
    /// first time (no `kids` document yet).
    pub fn open(storage: Arc<dyn HouseholdStorage>) -> anyhow::Result<Self> {
        let state = match storage.load_kids()? {
            Some(kids) => {
                debug!("Loaded household with {} kids", kids.len());
                Household {
                    kids,
                    chores: storage.load_chores()?.unwrap_or_default(),
                    daily_progress: storage.load_daily_progress()?.unwrap_or_default(),
                    pet_states: storage.load_pet_states()?.unwrap_or_default(),
                    inventories: storage.load_inventories()?.unwrap_or_default(),
                    kid_pets: storage.load_kid_pets()?.unwrap_or_default(),
                }
            }
            None => {
                info!("No household found, seeding defaults");
                let household = default_household();
                persist_all(storage.as_ref(), &household)?;
                household
            }
        };

        Ok(HouseholdStore {
            storage,
            state: RwLock::new(state),
            observers: Mutex::new(Vec::new()),
            next_observer_id: AtomicU64::new(1),
        })
    }

    /// A clone of the current household state.
    pub fn snapshot(&self) -> Household {
        self.state.read().expect("household state lock poisoned").clone()
    }

    /// Register an observer called with the set of changed documents after
    /// every committed mutation. Returns a handle for `unsubscribe`.
    ///
    /// Callbacks run outside both the state lock and the registry lock, so
    /// an observer may issue follow-up mutations or subscribe/unsubscribe;
    /// a mutation committed from inside a callback notifies again.
    pub fn subscribe(
        &self,
        observer: impl Fn(&[Document]) + Send + Sync + 'static,
    ) -> u64 {
        let id = self.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .expect("observer lock poisoned")
            .push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, observer_id: u64) {
        self.observers
            .lock()
            .expect("observer lock poisoned")
            .retain(|(id, _)| *id != observer_id);
    }

    fn notify(&self, documents: &[Document]) {
        // Snapshot the registry so callbacks run without holding the lock.
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .expect("observer lock poisoned")
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(documents);
        }
    }

    /// Ingest a document snapshot pushed by an external writer. The snapshot
    /// replaces the in-memory copy wholesale (last writer wins) and observers
    /// are notified; nothing is written back.
    pub fn apply_remote(&self, update: RemoteUpdate) {
        let document = update.document();
        {
            let mut state = self.state.write().expect("household state lock poisoned");
            match update {
                RemoteUpdate::Kids(kids) => state.kids = kids,
                RemoteUpdate::Chores(chores) => state.chores = chores,
                RemoteUpdate::DailyProgress(progress) => state.daily_progress = progress,
                RemoteUpdate::PetStates(states) => state.pet_states = states,
                RemoteUpdate::Inventories(inventories) => state.inventories = inventories,
                RemoteUpdate::KidPets(pets) => state.kid_pets = pets,
            }
        }
        debug!("Applied remote snapshot of {}", document);
        self.notify(&[document]);
    }

    /// Run a mutation against the household and persist the affected
    /// documents in the given order.
    ///
    /// The operation runs on a scratch copy, so a declined operation (any
    /// `Err` from `op`) leaves both memory and storage untouched. On a write
    /// failure the optimistic in-memory update is rolled back and documents
    /// written before the failure are compensated by re-writing the restored
    /// state.
    pub(crate) fn mutate<T>(
        &self,
        documents: &[Document],
        op: impl FnOnce(&mut Household) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        {
            let mut state = self.state.write().expect("household state lock poisoned");
            let mut next = state.clone();
            let value = op(&mut next)?;

            let prior = std::mem::replace(&mut *state, next);
            let mut written: Vec<Document> = Vec::new();
            for &document in documents {
                if let Err(error) = persist_one(self.storage.as_ref(), &state, document) {
                    warn!("Write of {} failed, rolling back: {:#}", document, error);
                    *state = prior;
                    for &committed in &written {
                        if let Err(undo_error) =
                            persist_one(self.storage.as_ref(), &state, committed)
                        {
                            warn!(
                                "Compensating write of {} failed, document left stale: {:#}",
                                committed, undo_error
                            );
                        }
                    }
                    return Err(EngineError::Persistence(error));
                }
                written.push(document);
            }

            drop(state);
            self.notify(documents);
            Ok(value)
        }
    }
}

fn persist_one(
    storage: &dyn HouseholdStorage,
    state: &Household,
    document: Document,
) -> anyhow::Result<()> {
    match document {
        Document::Kids => storage.save_kids(&state.kids),
        Document::Chores => storage.save_chores(&state.chores),
        Document::DailyProgress => storage.save_daily_progress(&state.daily_progress),
        Document::PetStates => storage.save_pet_states(&state.pet_states),
        Document::Inventories => storage.save_inventories(&state.inventories),
        Document::KidPets => storage.save_kid_pets(&state.kid_pets),
    }
}

fn persist_all(storage: &dyn HouseholdStorage, state: &Household) -> anyhow::Result<()> {
    for document in Document::ALL {
        persist_one(storage, state, document)?;
    }
    Ok(())
}

/// Starting balance for the seeded kids.
const DEFAULT_STARTING_COINS: u32 = 20;

/// The household every fresh install starts with: three kids and five
/// everyday chores.
fn default_household() -> Household {
    let kids = vec![
        Kid::with_starting_coins("Nash", 13, DEFAULT_STARTING_COINS),
        Kid::with_starting_coins("Isla", 10, DEFAULT_STARTING_COINS),
        Kid::with_starting_coins("Archer", 8, DEFAULT_STARTING_COINS),
    ];
    let chores = vec![
        Chore::new("Empty Dishwasher", 2, "🍽️"),
        Chore::new("Make Bed", 1, "🛏️"),
        Chore::new("Put Clothes Away", 1, "👕"),
        Chore::new("Take Out Trash", 2, "🗑️"),
        Chore::new("Feed Pet", 1, "🐕"),
    ];

    let mut household = Household {
        kids,
        chores,
        ..Household::default()
    };
    for kid in &household.kids {
        household.daily_progress.insert(kid.id.clone(), Vec::new());
        household.pet_states.insert(kid.id.clone(), PetState::default());
        household.inventories.insert(kid.id.clone(), Inventory::default());
        household.kid_pets.insert(kid.id.clone(), Vec::new());
    }
    household
}

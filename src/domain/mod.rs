//! Domain layer: household state, the services that mutate it, and the
//! [`Engine`] facade that composes them over a single shared store.

pub mod admin_service;
pub mod chore_service;
pub mod coin_service;
pub mod commands;
pub mod game_service;
pub mod household;
pub mod kid_service;
pub mod models;
pub mod pet_service;
pub mod shop_service;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

use crate::storage::{Document, HouseholdStorage};
use household::{Household, HouseholdStore, RemoteUpdate};

pub use admin_service::AdminService;
pub use chore_service::{ChoreService, ChoreToggle};
pub use coin_service::CoinService;
pub use game_service::{CoinSide, FlipOutcome, GameService};
pub use kid_service::KidService;
pub use pet_service::{Evolution, PetService};
pub use shop_service::{Purchase, ShopService};

/// The composed economy engine.
///
/// Owns one [`HouseholdStore`] and wires every service to it, so all
/// mutations share the same lock, the same persistence ordering, and the
/// same observer list. Presentation layers hold one `Engine` and call
/// through its service accessors.
pub struct Engine {
    store: Arc<HouseholdStore>,
    coins: CoinService,
    chores: ChoreService,
    shop: ShopService,
    pets: PetService,
    games: GameService,
    kids: KidService,
    admin: AdminService,
}

impl Engine {
    /// Open an engine over the given storage, seeding the default household
    /// if the storage is empty. Random outcomes (egg hatching, coin flips)
    /// use an OS-seeded generator.
    pub fn open(storage: Arc<dyn HouseholdStorage>) -> anyhow::Result<Self> {
        Self::with_rng(storage, StdRng::from_entropy())
    }

    /// Like [`Engine::open`] but with a caller-supplied generator, so tests
    /// and replays can pin random outcomes with a seed.
    pub fn with_rng(storage: Arc<dyn HouseholdStorage>, rng: StdRng) -> anyhow::Result<Self> {
        let store = Arc::new(HouseholdStore::open(storage)?);
        let rng = Arc::new(Mutex::new(rng));
        Ok(Self {
            coins: CoinService::new(store.clone()),
            chores: ChoreService::new(store.clone()),
            shop: ShopService::new(store.clone()),
            pets: PetService::new(store.clone(), rng.clone()),
            games: GameService::new(store.clone(), rng),
            kids: KidService::new(store.clone()),
            admin: AdminService::new(store.clone()),
            store,
        })
    }

    /// A point-in-time copy of the whole household.
    pub fn snapshot(&self) -> Household {
        self.store.snapshot()
    }

    /// Register an observer called with the documents touched by each
    /// committed mutation. Returns an id for [`Engine::unsubscribe`].
    pub fn subscribe(&self, observer: impl Fn(&[Document]) + Send + Sync + 'static) -> u64 {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&self, observer_id: u64) {
        self.store.unsubscribe(observer_id)
    }

    /// Replace one document with state that arrived from outside (another
    /// device, a sync layer). Observers are notified.
    pub fn apply_remote(&self, update: RemoteUpdate) {
        self.store.apply_remote(update)
    }

    pub fn coins(&self) -> &CoinService {
        &self.coins
    }

    pub fn chores(&self) -> &ChoreService {
        &self.chores
    }

    pub fn shop(&self) -> &ShopService {
        &self.shop
    }

    pub fn pets(&self) -> &PetService {
        &self.pets
    }

    pub fn games(&self) -> &GameService {
        &self.games
    }

    pub fn kids(&self) -> &KidService {
        &self.kids
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }
}

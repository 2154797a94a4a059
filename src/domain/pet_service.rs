//! Pet lifecycle: mystery eggs, evolution, switching the active pet, and
//! day-to-day care.

use log::info;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::{Arc, Mutex};

use crate::domain::household::HouseholdStore;
use crate::domain::models::pet::{
    evolve_cost, EGG_COST, FEED_COST, MAX_PET_LEVEL, PLAY_COST,
};
use crate::domain::models::{OwnedPet, PetState, PetType};
use crate::error::EngineError;
use crate::storage::Document;

/// Outcome of an evolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Evolution {
    pub pet_id: String,
    pub level: u8,
    pub cost: u32,
    pub coins: u32,
}

/// Service for the pet corner.
///
/// The random egg type comes from an injected seedable RNG so tests can
/// force outcomes.
#[derive(Clone)]
pub struct PetService {
    store: Arc<HouseholdStore>,
    rng: Arc<Mutex<StdRng>>,
}

impl PetService {
    pub fn new(store: Arc<HouseholdStore>, rng: Arc<Mutex<StdRng>>) -> Self {
        Self { store, rng }
    }

    /// Buy a mystery egg for 15 coins: a uniformly random pet type hatches at
    /// level 1, joins the kid's owned pets, and becomes the active pet.
    pub fn buy_egg(&self, kid_id: &str) -> Result<OwnedPet, EngineError> {
        let pet = self
            .store
            .mutate(&[Document::KidPets, Document::Kids], |h| {
                h.kid(kid_id)?;
                h.spend(kid_id, EGG_COST)?;

                let index = self
                    .rng
                    .lock()
                    .expect("rng lock poisoned")
                    .gen_range(0..PetType::ALL.len());
                let pet = OwnedPet::hatch(PetType::ALL[index]);
                h.kid_pets
                    .entry(kid_id.to_string())
                    .or_default()
                    .push(pet.clone());
                h.kid_mut(kid_id)?.active_pet = Some(pet.id.clone());
                Ok(pet)
            })?;

        info!(
            "Kid {} hatched a {} ({})",
            kid_id,
            pet.pet_type.display_name(),
            pet.id
        );
        Ok(pet)
    }

    /// Evolve the kid's active pet. Costs `level * 10` coins; level 5 is
    /// terminal.
    pub fn evolve(&self, kid_id: &str) -> Result<Evolution, EngineError> {
        let evolution = self
            .store
            .mutate(&[Document::KidPets, Document::Kids], |h| {
                let kid = h.kid(kid_id)?;
                let pet_id = kid
                    .active_pet
                    .clone()
                    .ok_or_else(|| EngineError::NoActivePet { kid_id: kid_id.to_string() })?;

                let level = h
                    .kid_pets
                    .get(kid_id)
                    .and_then(|pets| pets.iter().find(|pet| pet.id == pet_id))
                    .map(|pet| pet.level)
                    .ok_or_else(|| EngineError::not_found("pet", pet_id.clone()))?;
                if level >= MAX_PET_LEVEL {
                    return Err(EngineError::PetAtMaxLevel { pet_id });
                }

                let cost = evolve_cost(level);
                let coins = h.spend(kid_id, cost)?;
                let pet = h
                    .kid_pets
                    .get_mut(kid_id)
                    .and_then(|pets| pets.iter_mut().find(|pet| pet.id == pet_id))
                    .ok_or_else(|| EngineError::not_found("pet", pet_id.clone()))?;
                pet.level += 1;
                Ok(Evolution { pet_id, level: pet.level, cost, coins })
            })?;

        info!(
            "Kid {} evolved pet {} to level {} for {} coins",
            kid_id, evolution.pet_id, evolution.level, evolution.cost
        );
        Ok(evolution)
    }

    /// Switch the kid's active pet to another owned pet. No coin effect.
    pub fn set_active_pet(&self, kid_id: &str, pet_id: &str) -> Result<(), EngineError> {
        self.store.mutate(&[Document::Kids], |h| {
            h.kid(kid_id)?;
            let owned = h
                .kid_pets
                .get(kid_id)
                .map(|pets| pets.iter().any(|pet| pet.id == pet_id))
                .unwrap_or(false);
            if !owned {
                return Err(EngineError::not_found("pet", pet_id));
            }
            h.kid_mut(kid_id)?.active_pet = Some(pet_id.to_string());
            Ok(())
        })?;

        info!("Kid {} switched active pet to {}", kid_id, pet_id);
        Ok(())
    }

    /// Feed the pet for 3 coins: food meter +20, capped at 100.
    pub fn feed(&self, kid_id: &str) -> Result<PetState, EngineError> {
        self.care(kid_id, FEED_COST, PetState::feed)
    }

    /// Play with the pet for 2 coins: happiness meter +20, capped at 100.
    pub fn play(&self, kid_id: &str) -> Result<PetState, EngineError> {
        self.care(kid_id, PLAY_COST, PetState::play)
    }

    fn care(
        &self,
        kid_id: &str,
        cost: u32,
        boost: impl Fn(&mut PetState),
    ) -> Result<PetState, EngineError> {
        self.store
            .mutate(&[Document::PetStates, Document::Kids], |h| {
                h.kid(kid_id)?;
                h.spend(kid_id, cost)?;
                let state = h.pet_states.entry(kid_id.to_string()).or_default();
                boost(state);
                Ok(*state)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::household::RemoteUpdate;
    use crate::storage::MemoryHouseholdStorage;
    use rand::SeedableRng;

    fn setup_test() -> (PetService, Arc<HouseholdStore>, String) {
        setup_test_with_seed(7)
    }

    fn setup_test_with_seed(seed: u64) -> (PetService, Arc<HouseholdStore>, String) {
        let store =
            Arc::new(HouseholdStore::open(Arc::new(MemoryHouseholdStorage::new())).unwrap());
        let kid_id = store.snapshot().kids[0].id.clone();
        let rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        (PetService::new(store.clone(), rng), store, kid_id)
    }

    fn set_coins(store: &HouseholdStore, kid_id: &str, coins: u32) {
        let mut kids = store.snapshot().kids;
        kids.iter_mut().find(|k| k.id == kid_id).unwrap().coins = coins;
        store.apply_remote(RemoteUpdate::Kids(kids));
    }

    #[test]
    fn test_egg_then_immediate_evolve_fails() {
        let (service, store, kid_id) = setup_test();
        set_coins(&store, &kid_id, 15);

        let pet = service.buy_egg(&kid_id).unwrap();
        let household = store.snapshot();
        assert_eq!(household.kid(&kid_id).unwrap().coins, 0);
        assert_eq!(household.kid_pets[&kid_id].len(), 1);
        assert_eq!(household.active_pet(&kid_id).unwrap().id, pet.id);
        assert_eq!(pet.level, 1);

        // Evolving from level 1 costs 10, and the kid is broke.
        let result = service.evolve(&kid_id);
        assert!(matches!(
            result,
            Err(EngineError::InsufficientFunds { needed: 10, available: 0 })
        ));
        assert_eq!(store.snapshot().active_pet(&kid_id).unwrap().level, 1);
    }

    #[test]
    fn test_egg_requires_15_coins() {
        let (service, store, kid_id) = setup_test();
        set_coins(&store, &kid_id, 14);

        let result = service.buy_egg(&kid_id);
        assert!(matches!(result, Err(EngineError::InsufficientFunds { .. })));
        assert!(store.snapshot().kid_pets[&kid_id].is_empty());
    }

    #[test]
    fn test_egg_type_is_deterministic_under_a_seed() {
        let (a, store_a, kid_a) = setup_test_with_seed(42);
        let (b, store_b, kid_b) = setup_test_with_seed(42);
        set_coins(&store_a, &kid_a, 15);
        set_coins(&store_b, &kid_b, 15);

        let pet_a = a.buy_egg(&kid_a).unwrap();
        let pet_b = b.buy_egg(&kid_b).unwrap();
        assert_eq!(pet_a.pet_type, pet_b.pet_type);
    }

    #[test]
    fn test_evolution_cost_schedule() {
        let (service, store, kid_id) = setup_test();
        set_coins(&store, &kid_id, 15 + 10 + 20 + 30 + 40);

        service.buy_egg(&kid_id).unwrap();
        for (expected_level, expected_cost) in [(2u8, 10u32), (3, 20), (4, 30), (5, 40)] {
            let evolution = service.evolve(&kid_id).unwrap();
            assert_eq!(evolution.level, expected_level);
            assert_eq!(evolution.cost, expected_cost);
        }

        let household = store.snapshot();
        assert_eq!(household.kid(&kid_id).unwrap().coins, 0);
        assert_eq!(household.active_pet(&kid_id).unwrap().level, 5);

        // Level 5 is terminal even with coins to spare.
        set_coins(&store, &kid_id, 100);
        let result = service.evolve(&kid_id);
        assert!(matches!(result, Err(EngineError::PetAtMaxLevel { .. })));
    }

    #[test]
    fn test_evolve_without_pet_is_declined() {
        let (service, _store, kid_id) = setup_test();
        let result = service.evolve(&kid_id);
        assert!(matches!(result, Err(EngineError::NoActivePet { .. })));
    }

    #[test]
    fn test_switching_active_pet() {
        let (service, store, kid_id) = setup_test();
        set_coins(&store, &kid_id, 30);

        let first = service.buy_egg(&kid_id).unwrap();
        let second = service.buy_egg(&kid_id).unwrap();
        assert_eq!(store.snapshot().active_pet(&kid_id).unwrap().id, second.id);

        service.set_active_pet(&kid_id, &first.id).unwrap();
        assert_eq!(store.snapshot().active_pet(&kid_id).unwrap().id, first.id);

        let result = service.set_active_pet(&kid_id, "pet::stranger");
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_feed_and_play_move_meters_and_charge() {
        let (service, store, kid_id) = setup_test();

        let after_feed = service.feed(&kid_id).unwrap();
        assert_eq!(after_feed.food, 70);
        assert_eq!(after_feed.happy, 50);
        assert_eq!(store.snapshot().kid(&kid_id).unwrap().coins, 17);

        let after_play = service.play(&kid_id).unwrap();
        assert_eq!(after_play.happy, 70);
        assert_eq!(store.snapshot().kid(&kid_id).unwrap().coins, 15);
    }

    #[test]
    fn test_care_meters_cap_at_100() {
        let (service, store, kid_id) = setup_test();
        set_coins(&store, &kid_id, 100);

        for _ in 0..4 {
            service.feed(&kid_id).unwrap();
        }
        assert_eq!(store.snapshot().pet_states[&kid_id].food, 100);
    }

    #[test]
    fn test_care_blocked_when_broke() {
        let (service, store, kid_id) = setup_test();
        set_coins(&store, &kid_id, 2);

        assert!(matches!(
            service.feed(&kid_id),
            Err(EngineError::InsufficientFunds { .. })
        ));
        // Playing costs 2, which the kid can still afford.
        assert!(service.play(&kid_id).is_ok());

        let household = store.snapshot();
        assert_eq!(household.pet_states[&kid_id].food, 50);
        assert_eq!(household.kid(&kid_id).unwrap().coins, 0);
    }
}

//! Chore completion, the all-done bonus, streaks, and chore administration.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::chore::{
    DeleteChoreCommand, DeleteChoreResult, SaveChoreCommand, SaveChoreResult,
};
use crate::domain::household::HouseholdStore;
use crate::domain::models::chore::ALL_DONE_BONUS;
use crate::domain::models::Chore;
use crate::error::EngineError;
use crate::storage::Document;

/// Outcome of toggling a chore for a kid.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreToggle {
    /// Whether the chore is complete after the toggle.
    pub completed: bool,
    /// Whether this toggle completed the kid's last remaining relevant chore.
    pub all_done: bool,
    pub coins: u32,
    pub streak: u32,
}

/// Service for chore completion and chore CRUD.
#[derive(Clone)]
pub struct ChoreService {
    store: Arc<HouseholdStore>,
}

impl ChoreService {
    pub fn new(store: Arc<HouseholdStore>) -> Self {
        Self { store }
    }

    /// Toggle a chore's completed state for a kid.
    ///
    /// Completing a chore awards its value, plus the flat all-done bonus and
    /// a streak increment when this completion is the one that finishes every
    /// relevant chore. Uncompleting subtracts the value, clamped at zero; the
    /// bonus and streak are not unwound, so re-completing the final chore can
    /// award them again.
    pub fn toggle_chore(&self, kid_id: &str, chore_id: &str) -> Result<ChoreToggle, EngineError> {
        let toggle = self
            .store
            .mutate(&[Document::Kids, Document::DailyProgress], |h| {
                let chore = h.chore(chore_id)?.clone();
                if !chore.applies_to(kid_id) {
                    warn!("Chore {} does not apply to kid {}", chore_id, kid_id);
                    return Err(EngineError::not_found("chore", chore_id));
                }
                h.kid(kid_id)?;

                let mut completed = h.completed_chores(kid_id).to_vec();
                if let Some(position) = completed.iter().position(|id| id == chore_id) {
                    completed.remove(position);
                    h.daily_progress.insert(kid_id.to_string(), completed);
                    let coins = h.earn(kid_id, -(chore.value as i64))?;
                    let streak = h.kid(kid_id)?.streak;
                    Ok(ChoreToggle { completed: false, all_done: false, coins, streak })
                } else {
                    completed.push(chore_id.to_string());
                    let relevant = h.relevant_chores(kid_id);
                    let all_done = !relevant.is_empty()
                        && relevant
                            .iter()
                            .all(|chore| completed.iter().any(|id| id == &chore.id));
                    h.daily_progress.insert(kid_id.to_string(), completed);

                    let reward = chore.value + if all_done { ALL_DONE_BONUS } else { 0 };
                    let coins = h.earn(kid_id, reward as i64)?;
                    if all_done {
                        h.kid_mut(kid_id)?.streak += 1;
                    }
                    let streak = h.kid(kid_id)?.streak;
                    Ok(ChoreToggle { completed: true, all_done, coins, streak })
                }
            })?;

        info!(
            "Kid {} toggled chore {}: completed={}, all_done={}, coins={}",
            kid_id, chore_id, toggle.completed, toggle.all_done, toggle.coins
        );
        Ok(toggle)
    }

    /// Create or edit a chore.
    pub fn save_chore(&self, command: SaveChoreCommand) -> Result<SaveChoreResult, EngineError> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(EngineError::Validation("chore name cannot be empty".to_string()));
        }

        let result = self.store.mutate(&[Document::Chores], |h| {
            match &command.id {
                Some(chore_id) => {
                    let due_date = command.due_date;
                    let kid_scope = command.kid_id.clone();
                    let icon = command.icon.clone();
                    let chore = h
                        .chores
                        .iter_mut()
                        .find(|chore| &chore.id == chore_id)
                        .ok_or_else(|| EngineError::not_found("chore", chore_id.clone()))?;
                    chore.name = name.clone();
                    chore.value = command.value;
                    if let Some(icon) = icon {
                        chore.icon = icon;
                    }
                    chore.due_date = due_date;
                    chore.kid_id = kid_scope;
                    chore.updated_at = chrono::Utc::now();
                    Ok(SaveChoreResult { chore: chore.clone(), created: false })
                }
                None => {
                    let mut chore = Chore::new(
                        name.clone(),
                        command.value,
                        command.icon.clone().unwrap_or_else(|| "⭐".to_string()),
                    );
                    chore.due_date = command.due_date;
                    chore.kid_id = command.kid_id.clone();
                    h.chores.push(chore.clone());
                    Ok(SaveChoreResult { chore, created: true })
                }
            }
        })?;

        info!(
            "{} chore '{}' ({})",
            if result.created { "Created" } else { "Updated" },
            result.chore.name,
            result.chore.id
        );
        Ok(result)
    }

    /// Delete a chore and prune it from every kid's daily progress so no
    /// stale completion ids linger.
    pub fn delete_chore(
        &self,
        command: DeleteChoreCommand,
    ) -> Result<DeleteChoreResult, EngineError> {
        let chore_id = command.chore_id;
        let name = self
            .store
            .mutate(&[Document::Chores, Document::DailyProgress], |h| {
                let position = h
                    .chores
                    .iter()
                    .position(|chore| chore.id == chore_id)
                    .ok_or_else(|| EngineError::not_found("chore", chore_id.clone()))?;
                let removed = h.chores.remove(position);
                for completed in h.daily_progress.values_mut() {
                    completed.retain(|id| id != &chore_id);
                }
                Ok(removed.name)
            })?;

        info!("Deleted chore '{}' ({})", name, chore_id);
        Ok(DeleteChoreResult {
            success_message: format!("Chore '{}' deleted successfully", name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::household::Household;
    use crate::storage::MemoryHouseholdStorage;

    fn setup_test() -> (ChoreService, Arc<HouseholdStore>) {
        let store =
            Arc::new(HouseholdStore::open(Arc::new(MemoryHouseholdStorage::new())).unwrap());
        (ChoreService::new(store.clone()), store)
    }

    /// Replace the seeded household with one kid at 0 coins and three chores
    /// worth 2, 1, and 2.
    fn setup_full_day() -> (ChoreService, Arc<HouseholdStore>, String, Vec<String>) {
        let (service, store) = setup_test();
        let kid_id = store.snapshot().kids[0].id.clone();

        let mut household = store.snapshot();
        household.kids.truncate(1);
        household.kids[0].coins = 0;
        household.chores = vec![
            Chore::new("Empty Dishwasher", 2, "🍽️"),
            Chore::new("Make Bed", 1, "🛏️"),
            Chore::new("Take Out Trash", 2, "🗑️"),
        ];
        let chore_ids: Vec<String> = household.chores.iter().map(|c| c.id.clone()).collect();
        reset_state(&store, household);

        (service, store, kid_id, chore_ids)
    }

    fn reset_state(store: &HouseholdStore, household: Household) {
        store.apply_remote(crate::domain::household::RemoteUpdate::Kids(household.kids));
        store.apply_remote(crate::domain::household::RemoteUpdate::Chores(household.chores));
        store.apply_remote(crate::domain::household::RemoteUpdate::DailyProgress(
            household.daily_progress,
        ));
    }

    #[test]
    fn test_full_day_completion_scenario() {
        let (service, _store, kid_id, chore_ids) = setup_full_day();

        let first = service.toggle_chore(&kid_id, &chore_ids[0]).unwrap();
        assert_eq!(first.coins, 2);
        assert!(!first.all_done);
        assert_eq!(first.streak, 0);

        let second = service.toggle_chore(&kid_id, &chore_ids[1]).unwrap();
        assert_eq!(second.coins, 3);
        assert!(!second.all_done);
        assert_eq!(second.streak, 0);

        // Last chore: 2 + the 5-coin all-done bonus.
        let third = service.toggle_chore(&kid_id, &chore_ids[2]).unwrap();
        assert_eq!(third.coins, 10);
        assert!(third.all_done);
        assert_eq!(third.streak, 1);
    }

    #[test]
    fn test_toggle_on_then_off_restores_coins() {
        let (service, store, kid_id, chore_ids) = setup_full_day();

        service.toggle_chore(&kid_id, &chore_ids[0]).unwrap();
        let undone = service.toggle_chore(&kid_id, &chore_ids[0]).unwrap();

        assert!(!undone.completed);
        assert_eq!(undone.coins, 0);
        assert!(store.snapshot().daily_progress[&kid_id].is_empty());
    }

    #[test]
    fn test_uncompleting_after_all_done_keeps_bonus_and_streak() {
        let (service, _store, kid_id, chore_ids) = setup_full_day();

        for chore_id in &chore_ids {
            service.toggle_chore(&kid_id, chore_id).unwrap();
        }
        // 2 + 1 + (2 + 5) = 10; undoing the last chore only takes back its
        // value, never the folded-in bonus or the streak.
        let undone = service.toggle_chore(&kid_id, &chore_ids[2]).unwrap();
        assert_eq!(undone.coins, 8);
        assert_eq!(undone.streak, 1);
    }

    #[test]
    fn test_uncompleting_clamps_at_zero() {
        let (service, store, kid_id, chore_ids) = setup_full_day();

        service.toggle_chore(&kid_id, &chore_ids[0]).unwrap();
        // Simulate inconsistent prior state: another writer zeroed the coins.
        let mut household = store.snapshot();
        household.kids[0].coins = 0;
        store.apply_remote(crate::domain::household::RemoteUpdate::Kids(household.kids));

        let undone = service.toggle_chore(&kid_id, &chore_ids[0]).unwrap();
        assert_eq!(undone.coins, 0);
    }

    #[test]
    fn test_kid_scoped_chores_dont_count_for_others() {
        let (service, store) = setup_test();
        let household = store.snapshot();
        let kid_a = household.kids[0].id.clone();
        let kid_b = household.kids[1].id.clone();

        let mut next = household;
        next.chores = vec![
            Chore::new("Shared", 1, "⭐"),
            {
                let mut chore = Chore::new("Only B", 1, "🎯");
                chore.kid_id = Some(kid_b.clone());
                chore
            },
        ];
        let shared_id = next.chores[0].id.clone();
        let only_b_id = next.chores[1].id.clone();
        reset_state(&store, next);

        // Kid A's only relevant chore is the shared one, so completing it is
        // an all-done transition despite B's chore being open.
        let result = service.toggle_chore(&kid_a, &shared_id).unwrap();
        assert!(result.all_done);

        // Kid A toggling B's chore is rejected.
        let rejected = service.toggle_chore(&kid_a, &only_b_id);
        assert!(matches!(rejected, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let (service, store) = setup_test();
        let kid_id = store.snapshot().kids[0].id.clone();
        let chore_id = store.snapshot().chores[0].id.clone();

        assert!(matches!(
            service.toggle_chore(&kid_id, "chore::missing"),
            Err(EngineError::NotFound { .. })
        ));
        assert!(matches!(
            service.toggle_chore("kid::missing", &chore_id),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_save_chore_creates_and_updates() {
        let (service, store) = setup_test();

        let created = service
            .save_chore(SaveChoreCommand {
                id: None,
                name: "  Water Plants ".to_string(),
                value: 3,
                icon: None,
                due_date: None,
                kid_id: None,
            })
            .unwrap();
        assert!(created.created);
        assert_eq!(created.chore.name, "Water Plants");
        assert_eq!(created.chore.icon, "⭐");

        let updated = service
            .save_chore(SaveChoreCommand {
                id: Some(created.chore.id.clone()),
                name: "Water All Plants".to_string(),
                value: 4,
                icon: Some("🪴".to_string()),
                due_date: None,
                kid_id: None,
            })
            .unwrap();
        assert!(!updated.created);
        assert_eq!(updated.chore.value, 4);
        assert_eq!(updated.chore.icon, "🪴");

        let stored = store.snapshot();
        assert!(stored.chores.iter().any(|c| c.name == "Water All Plants"));
    }

    #[test]
    fn test_delete_chore_prunes_daily_progress() {
        let (service, store, kid_id, chore_ids) = setup_full_day();

        service.toggle_chore(&kid_id, &chore_ids[0]).unwrap();
        service
            .delete_chore(DeleteChoreCommand { chore_id: chore_ids[0].clone() })
            .unwrap();

        let household = store.snapshot();
        assert_eq!(household.chores.len(), 2);
        assert!(household.daily_progress[&kid_id].is_empty());
    }
}

//! Parent administration: the parent gate and the bulk reset operations.
//!
//! The bulk operations are destructive across the whole household, so each
//! command carries a `confirmed` flag and refuses to run without it. The
//! parent gate is a simple shared-password check guarding the admin surface.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::admin::{
    ResetDailyProgressCommand, ResetDailyProgressResult, WeeklyPayoutCommand, WeeklyPayoutResult,
};
use crate::domain::household::HouseholdStore;
use crate::error::EngineError;
use crate::storage::Document;

const PARENT_PASSWORD: &str = "parent123";

/// Service for parent-only household operations.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<HouseholdStore>,
    parent_password: String,
}

impl AdminService {
    pub fn new(store: Arc<HouseholdStore>) -> Self {
        Self { store, parent_password: PARENT_PASSWORD.to_string() }
    }

    #[cfg(test)]
    pub fn with_password(store: Arc<HouseholdStore>, password: impl Into<String>) -> Self {
        Self { store, parent_password: password.into() }
    }

    /// Check a password attempt against the parent password. Attempts are
    /// logged but never stored.
    pub fn verify_parent_password(&self, attempt: &str) -> bool {
        let accepted = attempt == self.parent_password;
        if accepted {
            info!("Parent gate unlocked");
        } else {
            warn!("Parent gate rejected a password attempt");
        }
        accepted
    }

    /// Clear every kid's completed-chore set for the day. Coins and streaks
    /// are left alone.
    pub fn reset_daily_progress(
        &self,
        command: ResetDailyProgressCommand,
    ) -> Result<ResetDailyProgressResult, EngineError> {
        if !command.confirmed {
            return Err(EngineError::NotConfirmed);
        }

        let kids_reset = self.store.mutate(&[Document::DailyProgress], |h| {
            let mut reset = 0;
            for completed in h.daily_progress.values_mut() {
                if !completed.is_empty() {
                    completed.clear();
                    reset += 1;
                }
            }
            Ok(reset)
        })?;

        info!("Reset daily progress for {} kid(s)", kids_reset);
        Ok(ResetDailyProgressResult {
            success_message: "Daily progress reset for all kids".to_string(),
        })
    }

    /// Cash out the week: every kid's coin balance drops to zero and all
    /// daily progress is cleared. Streaks survive the payout.
    pub fn weekly_payout(
        &self,
        command: WeeklyPayoutCommand,
    ) -> Result<WeeklyPayoutResult, EngineError> {
        if !command.confirmed {
            return Err(EngineError::NotConfirmed);
        }

        let kids_paid = self.store.mutate(&[Document::Kids, Document::DailyProgress], |h| {
            let now = chrono::Utc::now();
            for kid in &mut h.kids {
                kid.coins = 0;
                kid.updated_at = now;
            }
            for completed in h.daily_progress.values_mut() {
                completed.clear();
            }
            Ok(h.kids.len())
        })?;

        info!("Weekly payout completed for {} kid(s)", kids_paid);
        Ok(WeeklyPayoutResult {
            kids_paid,
            success_message: format!("Weekly payout completed for {} kid(s)", kids_paid),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryHouseholdStorage;

    fn setup_test() -> (AdminService, Arc<HouseholdStore>) {
        let store =
            Arc::new(HouseholdStore::open(Arc::new(MemoryHouseholdStorage::new())).unwrap());
        (AdminService::new(store.clone()), store)
    }

    fn complete_a_chore(store: &Arc<HouseholdStore>) -> String {
        let snapshot = store.snapshot();
        let kid_id = snapshot.kids[0].id.clone();
        let chore_id = snapshot.chores[0].id.clone();
        store
            .mutate(&[Document::Kids, Document::DailyProgress], |h| {
                h.daily_progress.get_mut(&kid_id).unwrap().push(chore_id.clone());
                let kid = h.kid_mut(&kid_id)?;
                kid.streak = 3;
                Ok(())
            })
            .unwrap();
        kid_id
    }

    #[test]
    fn test_parent_gate() {
        let (service, _store) = setup_test();
        assert!(service.verify_parent_password("parent123"));
        assert!(!service.verify_parent_password("parent124"));
        assert!(!service.verify_parent_password(""));
    }

    #[test]
    fn test_parent_gate_custom_password() {
        let (_, store) = setup_test();
        let service = AdminService::with_password(store, "hunter2");
        assert!(service.verify_parent_password("hunter2"));
        assert!(!service.verify_parent_password("parent123"));
    }

    #[test]
    fn test_bulk_operations_require_confirmation() {
        let (service, store) = setup_test();
        let kid_id = complete_a_chore(&store);

        let reset = service.reset_daily_progress(ResetDailyProgressCommand { confirmed: false });
        assert!(matches!(reset, Err(EngineError::NotConfirmed)));
        let payout = service.weekly_payout(WeeklyPayoutCommand { confirmed: false });
        assert!(matches!(payout, Err(EngineError::NotConfirmed)));

        // Nothing changed.
        let household = store.snapshot();
        assert_eq!(household.daily_progress[&kid_id].len(), 1);
        assert_eq!(household.kid(&kid_id).unwrap().coins, 20);
    }

    #[test]
    fn test_reset_clears_progress_but_not_coins_or_streaks() {
        let (service, store) = setup_test();
        let kid_id = complete_a_chore(&store);

        service.reset_daily_progress(ResetDailyProgressCommand { confirmed: true }).unwrap();

        let household = store.snapshot();
        assert!(household.daily_progress.values().all(|completed| completed.is_empty()));
        let kid = household.kid(&kid_id).unwrap();
        assert_eq!(kid.coins, 20);
        assert_eq!(kid.streak, 3);
    }

    #[test]
    fn test_weekly_payout_zeroes_coins_and_keeps_streaks() {
        let (service, store) = setup_test();
        let kid_id = complete_a_chore(&store);

        let result = service.weekly_payout(WeeklyPayoutCommand { confirmed: true }).unwrap();
        assert_eq!(result.kids_paid, 3);

        let household = store.snapshot();
        assert!(household.kids.iter().all(|kid| kid.coins == 0));
        assert!(household.daily_progress.values().all(|completed| completed.is_empty()));
        assert_eq!(household.kid(&kid_id).unwrap().streak, 3);
    }
}

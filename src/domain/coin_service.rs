//! The two coin primitives as persisted operations.
//!
//! Every coin mutation in the engine funnels through `Household::earn` and
//! `Household::spend`; this service exposes them directly for callers that
//! adjust balances outside the built-in operations (manual parent
//! corrections, mini-game payouts routed by presentation code).

use log::info;
use std::sync::Arc;

use crate::domain::household::HouseholdStore;
use crate::error::EngineError;
use crate::storage::Document;

/// Service for direct coin adjustments.
#[derive(Clone)]
pub struct CoinService {
    store: Arc<HouseholdStore>,
}

impl CoinService {
    pub fn new(store: Arc<HouseholdStore>) -> Self {
        Self { store }
    }

    /// Deduct `amount` coins. Declines with `InsufficientFunds` when the
    /// balance does not cover it. Returns the new balance.
    pub fn spend(&self, kid_id: &str, amount: u32) -> Result<u32, EngineError> {
        let coins = self
            .store
            .mutate(&[Document::Kids], |h| h.spend(kid_id, amount))?;
        info!("Kid {} spent {} coins, balance now {}", kid_id, amount, coins);
        Ok(coins)
    }

    /// Add `delta` coins (negative for losses); the balance is clamped at a
    /// floor of zero. Returns the new balance.
    pub fn earn(&self, kid_id: &str, delta: i64) -> Result<u32, EngineError> {
        let coins = self
            .store
            .mutate(&[Document::Kids], |h| h.earn(kid_id, delta))?;
        info!("Kid {} earned {} coins, balance now {}", kid_id, delta, coins);
        Ok(coins)
    }
}

//! Error taxonomy for the economy engine.
//!
//! Business-rule violations are declined actions, not crashes: every variant
//! except `Persistence` means the operation was a complete no-op.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("item '{item_id}' is already owned")]
    AlreadyOwned { item_id: String },

    #[error("item '{item_id}' is not owned")]
    NotOwned { item_id: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("kid '{kid_id}' has no active pet")]
    NoActivePet { kid_id: String },

    #[error("pet '{pet_id}' is already at the maximum level")]
    PetAtMaxLevel { pet_id: String },

    #[error("bet must be at least 1 coin")]
    InvalidBet,

    #[error("operation requires explicit confirmation")]
    NotConfirmed,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("persistence failure: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl EngineError {
    /// Convenience constructor for dangling or unknown id references.
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        EngineError::NotFound { kind, id: id.into() }
    }
}

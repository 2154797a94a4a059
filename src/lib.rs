//! # Chore Tracker Engine
//!
//! The reward-economy and pet-progression core of a family chore tracker.
//! Parents define chores, kids check them off to earn coins, and coins are
//! spent on pet care, pet evolution, cosmetic shop items, and mini-games.
//!
//! This crate owns all the rules for mutating a household's shared economic
//! state. It is UI agnostic: presentation code renders snapshots and invokes
//! the operations exposed by [`Engine`], observing changes through the
//! engine's subscribe/notify mechanism. Durable storage is behind the
//! [`storage::HouseholdStorage`] trait, with a JSON-file implementation for
//! local use and an in-memory implementation for tests and embedding.

pub mod domain;
pub mod error;
pub mod storage;

pub use domain::Engine;
pub use domain::household::{Household, RemoteUpdate};
pub use error::EngineError;
pub use storage::Document;

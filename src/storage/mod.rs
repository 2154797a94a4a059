//! # Storage Module
//!
//! Persistence for the six household documents. The domain layer only sees
//! the [`HouseholdStorage`] trait; concrete backends are a JSON-file store
//! for local use and an in-memory store for tests and embedding.

pub mod json;
pub mod memory;
pub mod traits;

pub use json::JsonHouseholdStorage;
pub use memory::MemoryHouseholdStorage;
pub use traits::{Document, HouseholdStorage};

//! Domain models for the chore tracker economy.
//!
//! Plain data types only - all mutation rules live in the services and in
//! [`crate::domain::household::Household`].

pub mod catalog;
pub mod chore;
pub mod inventory;
pub mod kid;
pub mod pet;

pub use catalog::{ShopItem, REWARD_CATEGORIES};
pub use chore::Chore;
pub use inventory::{Inventory, ItemCategory};
pub use kid::Kid;
pub use pet::{OwnedPet, PetState, PetType};

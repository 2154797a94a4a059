use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a kid in the household.
///
/// A kid is the unit of ownership for coins, completed chores, and pets.
/// The currently active pet is a pointer into the kid's owned-pets list;
/// the pet's type and level are always derived from that list, never
/// duplicated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kid {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub coins: u32,
    pub streak: u32,
    pub active_pet: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Kid {
    /// Generate a unique ID for a kid
    pub fn generate_id() -> String {
        format!("kid::{}", Uuid::new_v4())
    }

    /// Create a new kid with no coins, no streak, and no pet.
    pub fn new(name: impl Into<String>, age: u8) -> Self {
        let now = Utc::now();
        Kid {
            id: Self::generate_id(),
            name: name.into(),
            age,
            coins: 0,
            streak: 0,
            active_pet: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new kid with a starting coin balance (used by the default
    /// household seed).
    pub fn with_starting_coins(name: impl Into<String>, age: u8, coins: u32) -> Self {
        let mut kid = Self::new(name, age);
        kid.coins = coins;
        kid
    }
}

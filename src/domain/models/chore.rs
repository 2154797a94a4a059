use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flat bonus awarded when a kid completes the last of their relevant chores.
pub const ALL_DONE_BONUS: u32 = 5;

/// Domain model representing a chore.
///
/// A chore is created and edited by a parent, and is immutable from a kid's
/// point of view. `kid_id` of `None` means the chore applies to every kid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: String,
    pub name: String,
    /// Coin reward for completing the chore.
    pub value: u32,
    pub icon: String,
    pub due_date: Option<NaiveDate>,
    pub kid_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chore {
    /// Generate a unique ID for a chore
    pub fn generate_id() -> String {
        format!("chore::{}", Uuid::new_v4())
    }

    /// Create a chore applying to every kid.
    pub fn new(name: impl Into<String>, value: u32, icon: impl Into<String>) -> Self {
        let now = Utc::now();
        Chore {
            id: Self::generate_id(),
            name: name.into(),
            value,
            icon: icon.into(),
            due_date: None,
            kid_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this chore applies to the given kid (all-kids chores apply to
    /// everyone).
    pub fn applies_to(&self, kid_id: &str) -> bool {
        self.kid_id.as_deref().map_or(true, |id| id == kid_id)
    }
}

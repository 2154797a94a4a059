//! Domain-level command and query types
//!
//! These structs are used by the parent-administration services. Kid-facing
//! economy operations (toggling chores, spending, pet care, games) take
//! plain arguments; the CRUD and bulk operations use explicit commands so
//! callers spell out intent, including the confirmation flag the bulk
//! operations require.

pub mod kid {
    use crate::domain::models::Kid;

    /// Input for creating or editing a kid. A `None` id creates a new kid;
    /// otherwise the named kid's profile fields are updated and their
    /// economy state (coins, streak, pets) is preserved.
    #[derive(Debug, Clone)]
    pub struct SaveKidCommand {
        pub id: Option<String>,
        pub name: String,
        pub age: u8,
    }

    /// Result of saving a kid.
    #[derive(Debug, Clone)]
    pub struct SaveKidResult {
        pub kid: Kid,
        pub created: bool,
    }

    /// Command for deleting a kid and all their per-kid records.
    #[derive(Debug, Clone)]
    pub struct DeleteKidCommand {
        pub kid_id: String,
    }

    /// Result of deleting a kid.
    #[derive(Debug, Clone)]
    pub struct DeleteKidResult {
        pub success_message: String,
    }
}

pub mod chore {
    use chrono::NaiveDate;

    use crate::domain::models::Chore;

    /// Input for creating or editing a chore. A `None` id creates a new
    /// chore; `kid_id` of `None` makes the chore apply to every kid.
    #[derive(Debug, Clone)]
    pub struct SaveChoreCommand {
        pub id: Option<String>,
        pub name: String,
        pub value: u32,
        pub icon: Option<String>,
        pub due_date: Option<NaiveDate>,
        pub kid_id: Option<String>,
    }

    /// Result of saving a chore.
    #[derive(Debug, Clone)]
    pub struct SaveChoreResult {
        pub chore: Chore,
        pub created: bool,
    }

    /// Command for deleting a chore.
    #[derive(Debug, Clone)]
    pub struct DeleteChoreCommand {
        pub chore_id: String,
    }

    /// Result of deleting a chore.
    #[derive(Debug, Clone)]
    pub struct DeleteChoreResult {
        pub success_message: String,
    }
}

pub mod admin {
    /// Command for clearing every kid's completed-chore set. Coins and
    /// streaks are untouched.
    #[derive(Debug, Clone)]
    pub struct ResetDailyProgressCommand {
        pub confirmed: bool,
    }

    /// Result of resetting daily progress.
    #[derive(Debug, Clone)]
    pub struct ResetDailyProgressResult {
        pub success_message: String,
    }

    /// Command for the weekly payout: zero every kid's coins and clear all
    /// daily progress in one logical operation. Streaks are untouched.
    #[derive(Debug, Clone)]
    pub struct WeeklyPayoutCommand {
        pub confirmed: bool,
    }

    /// Result of the weekly payout.
    #[derive(Debug, Clone)]
    pub struct WeeklyPayoutResult {
        pub kids_paid: usize,
        pub success_message: String,
    }
}

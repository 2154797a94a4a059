use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pet evolution levels run 1 through 5; level 5 is terminal.
pub const MIN_PET_LEVEL: u8 = 1;
pub const MAX_PET_LEVEL: u8 = 5;

/// Price of a mystery egg.
pub const EGG_COST: u32 = 15;
/// Cost of feeding the active pet.
pub const FEED_COST: u32 = 3;
/// Cost of playing with the active pet.
pub const PLAY_COST: u32 = 2;
/// How much feeding or playing raises the corresponding meter.
pub const CARE_BOOST: u8 = 20;

/// Display names for each evolution level, 1-indexed by `level`.
pub const LEVEL_NAMES: [&str; 5] = ["Egg", "Baby", "Teen", "Adult", "Legendary"];

/// Evolving from `level` to `level + 1` costs `level * 10` coins, giving the
/// strictly increasing schedule 10, 20, 30, 40.
pub fn evolve_cost(level: u8) -> u32 {
    level as u32 * 10
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
    Bunny,
    Dragon,
    Unicorn,
}

impl PetType {
    pub const ALL: [PetType; 5] = [
        PetType::Dog,
        PetType::Cat,
        PetType::Bunny,
        PetType::Dragon,
        PetType::Unicorn,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Bunny => "Bunny",
            PetType::Dragon => "Dragon",
            PetType::Unicorn => "Unicorn",
        }
    }

    /// Emoji shown for each evolution level, 1-indexed by `level`.
    pub fn stage_emojis(self) -> [&'static str; 5] {
        match self {
            PetType::Dog => ["🥚", "🐕", "🐕", "🐕‍🦺", "🦮✨"],
            PetType::Cat => ["🥚", "🐱", "🐈", "🐈‍⬛", "😺✨"],
            PetType::Bunny => ["🥚", "🐰", "🐇", "🐇", "🐇✨"],
            PetType::Dragon => ["🥚", "🐲", "🐉", "🐉", "🐉✨🔥"],
            PetType::Unicorn => ["🥚", "🦄", "🦄", "🦄", "🦄✨🌈"],
        }
    }
}

/// A pet owned by a kid. Levels are monotonically non-decreasing and advance
/// only through the evolve operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedPet {
    pub id: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub level: u8,
}

impl OwnedPet {
    /// Generate a unique ID for a pet
    pub fn generate_id() -> String {
        format!("pet::{}", Uuid::new_v4())
    }

    /// Hatch a fresh level-1 pet of the given type.
    pub fn hatch(pet_type: PetType) -> Self {
        OwnedPet {
            id: Self::generate_id(),
            pet_type,
            level: MIN_PET_LEVEL,
        }
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_PET_LEVEL
    }

    pub fn level_name(&self) -> &'static str {
        let index = (self.level.clamp(MIN_PET_LEVEL, MAX_PET_LEVEL) - 1) as usize;
        LEVEL_NAMES[index]
    }

    pub fn stage_emoji(&self) -> &'static str {
        let index = (self.level.clamp(MIN_PET_LEVEL, MAX_PET_LEVEL) - 1) as usize;
        self.pet_type.stage_emojis()[index]
    }
}

/// Care meters for a kid's pet corner. Both run 0..=100 and start at the
/// midpoint when a kid is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub food: u8,
    pub happy: u8,
}

impl Default for PetState {
    fn default() -> Self {
        PetState { food: 50, happy: 50 }
    }
}

impl PetState {
    pub fn feed(&mut self) {
        self.food = self.food.saturating_add(CARE_BOOST).min(100);
    }

    pub fn play(&mut self) {
        self.happy = self.happy.saturating_add(CARE_BOOST).min(100);
    }
}

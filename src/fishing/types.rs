//! Fishing data structures: rods, species templates and caught fish.

use serde::{Deserialize, Serialize};

use crate::reeling::{EquipmentProfile, FishProfile};

/// Rarity tiers for fish species, determining sale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Sale value multiplier.
    pub fn value_multiplier(&self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Rare => 2.0,
            Self::Epic => 3.0,
            Self::Legendary => 5.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

/// A fishing rod from the shop.
#[derive(Debug, Clone, PartialEq)]
pub struct Rod {
    pub id: u32,
    pub name: &'static str,
    pub price: u64,
    /// Reeling bar height in pixels of the 400px reference track.
    pub bar_length: f64,
    /// Extra catch reach beyond the bar, in pixels.
    pub tolerance: f64,
    /// Multiplier bonus on non-common species odds.
    pub rarity_bonus: f64,
    /// Shifts rolled fish toward their maximum length.
    pub length_bonus: f64,
}

impl Rod {
    /// Reeling parameters for this rod. Rod order doubles as the difficulty
    /// index: later rods calm the fish down.
    pub fn equipment_profile(&self) -> EquipmentProfile {
        EquipmentProfile {
            bar_length: self.bar_length,
            tolerance: self.tolerance,
            difficulty_index: self.id,
        }
    }
}

/// Static definition of a fish species.
#[derive(Debug, Clone, PartialEq)]
pub struct FishTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub min_weight: f64,
    pub max_weight: f64,
    pub min_length: f64,
    pub max_length: f64,
    pub rarity: Rarity,
    /// Relative catch weight before rod bonuses.
    pub base_prob: f64,
}

impl FishTemplate {
    pub fn length_range(&self) -> f64 {
        self.max_length - self.min_length
    }

    pub fn weight_range(&self) -> f64 {
        self.max_weight - self.min_weight
    }
}

/// A specific fish that was hooked or caught.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishInstance {
    pub id: String,
    pub template_id: String,
    pub name: String,
    /// Kilograms, one decimal.
    pub weight: f64,
    /// Centimeters, one decimal.
    pub length: f64,
    pub rarity: Rarity,
    /// Coins when sold.
    pub value: u64,
    /// Within 10% of the species' maximum length.
    pub is_gigantic: bool,
}

impl FishInstance {
    pub fn profile(&self) -> FishProfile {
        FishProfile {
            weight: self.weight,
        }
    }
}

//! Rod shop and fish species tables.

use super::types::{FishTemplate, Rarity, Rod};

/// Rods in shop order. Index equals id.
pub static RODS: [Rod; 4] = [
    Rod {
        id: 0,
        name: "Bamboo Rod",
        price: 0,
        bar_length: 100.0,
        tolerance: 10.0,
        rarity_bonus: 0.0,
        length_bonus: 0.0,
    },
    Rod {
        id: 1,
        name: "Fiberglass Rod",
        price: 1800,
        bar_length: 145.0,
        tolerance: 15.0,
        rarity_bonus: 0.1,
        length_bonus: 0.1,
    },
    Rod {
        id: 2,
        name: "Carbon Fiber Rod",
        price: 4500,
        bar_length: 190.0,
        tolerance: 20.0,
        rarity_bonus: 0.25,
        length_bonus: 0.2,
    },
    Rod {
        id: 3,
        name: "Iridium Rod",
        price: 9000,
        bar_length: 240.0,
        tolerance: 25.0,
        rarity_bonus: 0.4,
        length_bonus: 0.3,
    },
];

/// All catchable species.
pub static FISH_TEMPLATES: [FishTemplate; 12] = [
    species("1", "Crucian Carp", (10.0, 20.0), (10.0, 15.0), Rarity::Common, 0.30),
    species("2", "Perch", (15.0, 25.0), (12.0, 18.0), Rarity::Common, 0.20),
    species("3", "Rainbow Trout", (20.0, 35.0), (20.0, 30.0), Rarity::Rare, 0.15),
    species("4", "Smallmouth Bass", (25.0, 45.0), (25.0, 40.0), Rarity::Rare, 0.12),
    species("5", "Catfish", (40.0, 60.0), (45.0, 65.0), Rarity::Rare, 0.08),
    species("6", "Salmon", (50.0, 75.0), (50.0, 75.0), Rarity::Epic, 0.05),
    species("7", "Sturgeon", (60.0, 85.0), (60.0, 90.0), Rarity::Epic, 0.04),
    species("8", "Pike", (45.0, 70.0), (55.0, 85.0), Rarity::Epic, 0.03),
    species("9", "Golden Koi", (70.0, 90.0), (70.0, 95.0), Rarity::Legendary, 0.015),
    species("10", "Arowana", (80.0, 100.0), (80.0, 100.0), Rarity::Legendary, 0.01),
    species("11", "Neon Tetra", (5.0, 10.0), (5.0, 8.0), Rarity::Epic, 0.005),
    species("12", "Leviathan", (95.0, 100.0), (95.0, 100.0), Rarity::Legendary, 0.001),
];

const fn species(
    id: &'static str,
    name: &'static str,
    weight: (f64, f64),
    length: (f64, f64),
    rarity: Rarity,
    base_prob: f64,
) -> FishTemplate {
    FishTemplate {
        id,
        name,
        min_weight: weight.0,
        max_weight: weight.1,
        min_length: length.0,
        max_length: length.1,
        rarity,
        base_prob,
    }
}

/// Equipment catalog lookup.
pub fn rod_by_id(id: u32) -> Option<&'static Rod> {
    RODS.iter().find(|rod| rod.id == id)
}

pub fn template_by_id(id: &str) -> Option<&'static FishTemplate> {
    FISH_TEMPLATES.iter().find(|t| t.id == id)
}

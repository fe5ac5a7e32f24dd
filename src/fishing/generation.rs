//! Fish generation: species selection and attribute rolling.
//!
//! Longer casts and better rods push fish toward the top of their species'
//! size range; rod rarity bonuses tilt species odds away from commons.

use rand::Rng;
use uuid::Builder;

use super::catalog::FISH_TEMPLATES;
use super::types::{FishInstance, FishTemplate, Rarity, Rod};
use crate::core::constants::{
    GIGANTIC_LENGTH_RATIO, GIGANTIC_VALUE_BONUS, VALUE_LENGTH_FACTOR, VALUE_WEIGHT_FACTOR,
};

/// Selection weight of a species with the given rod.
pub fn template_weight(template: &FishTemplate, rod: &Rod) -> f64 {
    if template.rarity == Rarity::Common {
        template.base_prob
    } else {
        template.base_prob * (1.0 + rod.rarity_bonus)
    }
}

/// Picks a species, weighting non-common fish by the rod's rarity bonus.
pub fn roll_template(rod: &Rod, rng: &mut impl Rng) -> &'static FishTemplate {
    let total: f64 = FISH_TEMPLATES.iter().map(|t| template_weight(t, rod)).sum();
    let mut roll = rng.gen::<f64>() * total;

    for template in FISH_TEMPLATES.iter() {
        let weight = template_weight(template, rod);
        if roll < weight {
            return template;
        }
        roll -= weight;
    }

    // Float residue at the very top of the range
    &FISH_TEMPLATES[0]
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sale value from raw size, before rounding for display.
pub fn fish_value(weight: f64, length: f64, rarity: Rarity, is_gigantic: bool) -> u64 {
    let base = ((weight * VALUE_WEIGHT_FACTOR + length * VALUE_LENGTH_FACTOR)
        * rarity.value_multiplier())
    .floor();
    let value = if is_gigantic {
        (base * GIGANTIC_VALUE_BONUS).floor()
    } else {
        base
    };
    value.max(0.0) as u64
}

/// Rolls a fish for a cast of `cast_power` (0.0-1.0) with `rod`.
pub fn calculate_fish(cast_power: f64, rod: &Rod, rng: &mut impl Rng) -> FishInstance {
    let template = roll_template(rod, rng);
    roll_fish_from_template(template, cast_power, rod, rng)
}

/// Rolls size and value for a known species.
pub fn roll_fish_from_template(
    template: &FishTemplate,
    cast_power: f64,
    rod: &Rod,
    rng: &mut impl Rng,
) -> FishInstance {
    let distance = cast_power.clamp(0.0, 1.0);
    let length_range = template.length_range();

    let variation = (rng.gen::<f64>() * 0.7 + distance * 0.2 + rod.length_bonus * 0.1)
        * length_range;
    let length = template.max_length.min(template.min_length + variation);
    let weight = template.min_weight + (variation / length_range) * template.weight_range();

    let is_gigantic = length >= template.max_length * GIGANTIC_LENGTH_RATIO;
    let value = fish_value(weight, length, template.rarity, is_gigantic);

    let id = Builder::from_random_bytes(rng.gen()).into_uuid();

    FishInstance {
        id: id.to_string(),
        template_id: template.id.to_string(),
        name: template.name.to_string(),
        weight: round_tenth(weight),
        length: round_tenth(length),
        rarity: template.rarity,
        value,
        is_gigantic,
    }
}

//! Species tags and their static parameter tables.
//!
//! Every rule constant that distinguishes one species from another lives
//! here, keyed by a closed tag, so interaction sites can match exhaustively
//! instead of probing types at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Grass,
    PoisonIvy,
    Gazelle,
    Zebra,
    Lion,
    Hyena,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Plant,
    Prey,
    Predator,
}

/// Sleep schedule and food capacity, present for animals only.
#[derive(Debug, Clone, Copy)]
pub struct AnimalTraits {
    pub max_food: i32,
    pub bedtime: u32,
    pub waketime: u32,
}

/// The fixed rule table for one species.
#[derive(Debug, Clone, Copy)]
pub struct SpeciesProfile {
    pub name: &'static str,
    pub role: Role,
    pub breeding_age: u32,
    pub breeding_probability: f64,
    pub max_litter_size: u32,
    /// Hunger units granted to (or, if negative, taken from) whoever eats
    /// this species. Zero for predators, which nothing eats.
    pub food_value: i32,
    pub max_age: u32,
    pub animal: Option<AnimalTraits>,
}

const GRASS: SpeciesProfile = SpeciesProfile {
    name: "grass",
    role: Role::Plant,
    breeding_age: 3,
    breeding_probability: 0.20,
    max_litter_size: 1,
    food_value: 1,
    max_age: 20,
    animal: None,
};

const POISON_IVY: SpeciesProfile = SpeciesProfile {
    name: "poison_ivy",
    role: Role::Plant,
    breeding_age: 3,
    breeding_probability: 0.10,
    max_litter_size: 1,
    food_value: -5,
    max_age: 100,
    animal: None,
};

const GAZELLE: SpeciesProfile = SpeciesProfile {
    name: "gazelle",
    role: Role::Prey,
    breeding_age: 4,
    breeding_probability: 0.80,
    max_litter_size: 9,
    food_value: 3,
    max_age: 100,
    animal: Some(AnimalTraits {
        max_food: 15,
        bedtime: 20,
        waketime: 9,
    }),
};

const ZEBRA: SpeciesProfile = SpeciesProfile {
    name: "zebra",
    role: Role::Prey,
    breeding_age: 4,
    breeding_probability: 0.80,
    max_litter_size: 9,
    food_value: 3,
    max_age: 100,
    animal: Some(AnimalTraits {
        max_food: 15,
        bedtime: 23,
        waketime: 9,
    }),
};

const LION: SpeciesProfile = SpeciesProfile {
    name: "lion",
    role: Role::Predator,
    breeding_age: 85,
    breeding_probability: 0.20,
    max_litter_size: 2,
    food_value: 0,
    max_age: 270,
    animal: Some(AnimalTraits {
        max_food: 65,
        bedtime: 20,
        waketime: 13,
    }),
};

const HYENA: SpeciesProfile = SpeciesProfile {
    name: "hyena",
    role: Role::Predator,
    breeding_age: 50,
    breeding_probability: 0.20,
    max_litter_size: 1,
    food_value: 0,
    max_age: 200,
    animal: Some(AnimalTraits {
        max_food: 40,
        bedtime: 4,
        waketime: 18,
    }),
};

impl SpeciesProfile {
    /// Food capacity for animal species; plants report zero.
    pub fn max_food(&self) -> i32 {
        self.animal.map_or(0, |traits| traits.max_food)
    }
}

impl Species {
    pub const ALL: [Species; 6] = [
        Species::Grass,
        Species::PoisonIvy,
        Species::Gazelle,
        Species::Zebra,
        Species::Lion,
        Species::Hyena,
    ];

    pub fn profile(self) -> &'static SpeciesProfile {
        match self {
            Species::Grass => &GRASS,
            Species::PoisonIvy => &POISON_IVY,
            Species::Gazelle => &GAZELLE,
            Species::Zebra => &ZEBRA,
            Species::Lion => &LION,
            Species::Hyena => &HYENA,
        }
    }

    pub fn role(self) -> Role {
        self.profile().role
    }

    /// The probability that this species kills a predator of a different
    /// species in one round of combat. The acting species' instinct applies,
    /// never the victim's.
    pub fn killing_instinct(self) -> f64 {
        match self {
            Species::Lion => 0.05,
            Species::Hyena => 0.03,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.profile().name)
    }
}

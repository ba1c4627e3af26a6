//! The flat entity record shared by every species.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Location;
use crate::species::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// State carried only by animals.
#[derive(Debug, Clone)]
pub struct AnimalState {
    pub gender: Gender,
    pub food: i32,
    pub awake: bool,
    pub infected: bool,
    pub sick_days: u32,
    /// Ticks since birth, modulo bookkeeping: every third tick adds a year
    /// of age, decoupling age from the raw tick count.
    pub age_ticks: u32,
}

/// One actor on the field. The species tag plus the static profile decide
/// which behavior variant runs each tick.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub species: Species,
    pub location: Option<Location>,
    pub alive: bool,
    pub age: u32,
    pub animal: Option<AnimalState>,
}

impl Entity {
    /// An entity created during initial seeding: random age, and for
    /// animals a random food level and gender.
    pub fn seeded<R: Rng>(id: EntityId, species: Species, location: Location, rng: &mut R) -> Self {
        let profile = species.profile();
        let age = rng.gen_range(0..profile.max_age);
        let animal = profile.animal.map(|traits| AnimalState {
            gender: random_gender(rng),
            food: rng.gen_range(0..traits.max_food),
            awake: traits.bedtime < traits.waketime,
            infected: false,
            sick_days: 0,
            age_ticks: 0,
        });
        Self {
            id,
            species,
            location: Some(location),
            alive: true,
            age,
            animal,
        }
    }

    /// An entity born during the run: age zero, full food, random gender.
    pub fn newborn<R: Rng>(id: EntityId, species: Species, location: Location, rng: &mut R) -> Self {
        let profile = species.profile();
        let animal = profile.animal.map(|traits| AnimalState {
            gender: random_gender(rng),
            food: traits.max_food,
            awake: traits.bedtime < traits.waketime,
            infected: false,
            sick_days: 0,
            age_ticks: 0,
        });
        Self {
            id,
            species,
            location: Some(location),
            alive: true,
            age: 0,
            animal,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_infected(&self) -> bool {
        self.animal.as_ref().map_or(false, |a| a.infected)
    }

    /// Raise or lower the food level, clamped at the species maximum.
    /// Dropping to zero or below does not kill here; starvation is checked
    /// by the per-tick hunger decrement. No-op for plants.
    pub fn set_food(&mut self, level: i32) {
        let max_food = self.species.profile().max_food();
        if let Some(animal) = self.animal.as_mut() {
            animal.food = level.min(max_food);
        }
    }
}

fn random_gender<R: Rng>(rng: &mut R) -> Gender {
    if rng.gen::<bool>() {
        Gender::Male
    } else {
        Gender::Female
    }
}

//! The run-wide registry of infected animals.
//!
//! The infection flag on the entity is authoritative; the registry mirrors
//! it so population-wide infected counts are O(1).

use std::collections::HashSet;

use rand::Rng;

use crate::entity::EntityId;

/// Probability that a single exposure infects a healthy animal.
pub const EXPOSURE_PROBABILITY: f64 = 0.001;

#[derive(Debug, Default)]
pub struct DiseaseRegistry {
    infected: HashSet<EntityId>,
}

impl DiseaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the per-encounter exposure probability. On success the animal is
    /// recorded as infected and `true` is returned; the caller sets the
    /// entity's own flag.
    pub fn mark_exposed<R: Rng>(&mut self, id: EntityId, rng: &mut R) -> bool {
        if rng.gen::<f64>() <= EXPOSURE_PROBABILITY {
            self.infected.insert(id);
            true
        } else {
            false
        }
    }

    /// Unconditional infection, used when an infected parent transmits at
    /// birth. Always returns `true`.
    pub fn force_infect(&mut self, id: EntityId) -> bool {
        self.infected.insert(id);
        true
    }

    pub fn recover(&mut self, id: EntityId) {
        self.infected.remove(&id);
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.infected.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.infected.len()
    }

    pub fn clear(&mut self) {
        self.infected.clear();
    }
}

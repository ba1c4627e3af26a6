//! Behavior shared by all animals: aging, hunger, sleep, disease, partner
//! search, breeding, and the last-resort grazing move.

use rand::Rng;

use crate::entity::{Entity, EntityId};
use crate::grid::Location;
use crate::species::Species;
use crate::world::World;

/// Sick-days after which an infected animal recovers unconditionally.
pub const RECOVERY_SICK_DAYS: u32 = 5;
/// The age penalty added per sick tick is uniform in 1..=10.
const MAX_SICKNESS_AGE_PENALTY: u32 = 10;

/// Advance the tick tracker; every third tick the animal gains a year of
/// age, and passing the species maximum kills it.
pub(crate) fn advance_age(world: &mut World, id: EntityId) {
    let Some(entity) = world.entity_mut(id) else {
        return;
    };
    let max_age = entity.species.profile().max_age;
    let Some(animal) = entity.animal.as_mut() else {
        return;
    };
    animal.age_ticks += 1;
    if animal.age_ticks % 3 == 0 {
        entity.age += 1;
        if entity.age > max_age {
            world.kill(id);
        }
    }
}

/// Recovery check first, then progression: five sick-days clear the
/// infection; while it lasts, each tick ages the animal by a random penalty.
/// The penalty itself never kills; the next age advance does.
pub(crate) fn progress_disease<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) {
    let mut recovered = false;
    let mut still_sick = false;
    if let Some(entity) = world.entity_mut(id) {
        if let Some(animal) = entity.animal.as_mut() {
            if animal.sick_days == RECOVERY_SICK_DAYS {
                animal.infected = false;
                animal.sick_days = 0;
                recovered = true;
            }
            still_sick = animal.infected;
        }
    }
    if recovered {
        world.disease.recover(id);
    }
    if still_sick {
        let penalty = rng.gen_range(1..=MAX_SICKNESS_AGE_PENALTY);
        if let Some(entity) = world.entity_mut(id) {
            entity.age += penalty;
            if let Some(animal) = entity.animal.as_mut() {
                animal.sick_days += 1;
            }
        }
    }
}

/// Fall asleep exactly at bedtime, wake exactly at waketime.
pub(crate) fn apply_sleep_schedule(world: &mut World, id: EntityId) {
    let hour = world.hour();
    let Some(entity) = world.entity_mut(id) else {
        return;
    };
    let Some(traits) = entity.species.profile().animal else {
        return;
    };
    let Some(animal) = entity.animal.as_mut() else {
        return;
    };
    if hour == traits.bedtime {
        animal.awake = false;
    }
    if hour == traits.waketime {
        animal.awake = true;
    }
}

pub(crate) fn is_awake(world: &World, id: EntityId) -> bool {
    world
        .entity(id)
        .and_then(|entity| entity.animal.as_ref())
        .map_or(false, |animal| animal.awake)
}

/// One active tick of hunger. Reaching zero food kills outright.
pub(crate) fn increment_hunger(world: &mut World, id: EntityId) {
    let mut starved = false;
    if let Some(entity) = world.entity_mut(id) {
        if let Some(animal) = entity.animal.as_mut() {
            animal.food -= 1;
            starved = animal.food <= 0;
        }
    }
    if starved {
        world.kill(id);
    }
}

pub(crate) fn set_infected(world: &mut World, id: EntityId) {
    if let Some(entity) = world.entity_mut(id) {
        if let Some(animal) = entity.animal.as_mut() {
            animal.infected = true;
        }
    }
}

/// Scan the radius-1 neighborhood for a living same-species animal of the
/// opposite gender. Every animal inspected is a disease encounter: an
/// infected neighbor may expose this animal, and an infected scanner may
/// expose a healthy neighbor, whether or not a partner is found.
pub(crate) fn find_partner<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) -> bool {
    let Some((my_species, my_gender, my_location)) = world.entity(id).and_then(|entity| {
        let animal = entity.animal.as_ref()?;
        Some((entity.species, animal.gender, entity.location?))
    }) else {
        return false;
    };

    for spot in world.field().adjacent_locations(my_location, 1, 1) {
        let Some(other_id) = world.occupant_at(spot) else {
            continue;
        };
        let Some((other_species, other_gender, other_infected)) =
            world.entity(other_id).and_then(|entity| {
                if !entity.is_alive() {
                    return None;
                }
                let animal = entity.animal.as_ref()?;
                Some((entity.species, animal.gender, animal.infected))
            })
        else {
            continue;
        };

        let my_infected = world.entity(id).map_or(false, Entity::is_infected);
        if other_infected {
            if !my_infected && world.disease.mark_exposed(id, rng) {
                set_infected(world, id);
            }
        } else if my_infected && world.disease.mark_exposed(other_id, rng) {
            set_infected(world, other_id);
        }

        if other_species == my_species && other_gender != my_gender {
            return true;
        }
    }
    false
}

/// Breed if of age and a partner is adjacent. Offspring fill free adjacent
/// cells up to the rolled litter size; an infected parent transmits to
/// every newborn. Returns the number born.
pub(crate) fn give_birth<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) -> usize {
    let Some((species, age, location)) = world
        .entity(id)
        .and_then(|entity| Some((entity.species, entity.age, entity.location?)))
    else {
        return 0;
    };
    let profile = species.profile();
    if age < profile.breeding_age || !find_partner(world, id, rng) {
        return 0;
    }
    if rng.gen::<f64>() > profile.breeding_probability {
        return 0;
    }
    let litter = rng.gen_range(1..=profile.max_litter_size);
    let free = world.field().free_adjacent_locations(location);
    let parent_infected = world.entity(id).map_or(false, Entity::is_infected);

    let mut births = 0;
    for spot in free.into_iter().take(litter as usize) {
        let child = world.spawn_newborn(species, spot, rng);
        if parent_infected {
            world.disease.force_infect(child);
            set_infected(world, child);
        }
        births += 1;
    }
    births
}

/// Last resort before overcrowding: kill one adjacent living grass and take
/// its cell. Grants no food.
pub(crate) fn graze_fallback(world: &mut World, id: EntityId) -> Option<Location> {
    let location = world.entity(id)?.location?;
    for spot in world.field().adjacent_locations(location, 1, 1) {
        let Some(other_id) = world.occupant_at(spot) else {
            continue;
        };
        let is_live_grass = world
            .entity(other_id)
            .map_or(false, |entity| entity.is_alive() && entity.species == Species::Grass);
        if is_live_grass {
            world.kill(other_id);
            return Some(spot);
        }
    }
    None
}

//! Plant behaviour: ageing and weather-gated breeding.
//!
//! Plants never move and never eat. Grass propagates under rain (and a
//! little under mist), poison ivy only spreads on the wind. Poison ivy
//! is also the only plant that dies of old age.

use rand::Rng;

use crate::entity::EntityId;
use crate::species::Species;
use crate::weather::Weather;
use crate::world::World;

/// Extra breeding probability grass picks up in mist, on top of its base rate.
pub const GRASS_MIST_BONUS_MIN: f64 = 0.001;
pub const GRASS_MIST_BONUS_MAX: f64 = 0.01;

/// Run one tick of plant behaviour. Returns the number of offspring placed.
pub fn act<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) -> usize {
    let Some(entity) = world.entity_mut(id) else {
        return 0;
    };
    let species = entity.species;
    let profile = species.profile();

    entity.age += 1;
    // Grass regrows indefinitely; only poison ivy has a bounded lifespan.
    if species == Species::PoisonIvy && entity.age > profile.max_age {
        world.kill(id);
        return 0;
    }

    give_birth(world, id, rng)
}

/// Effective breeding probability for `species` under `weather`, or `None`
/// when the conditions do not permit breeding at all.
pub(crate) fn breeding_probability<R: Rng>(
    species: Species,
    weather: Weather,
    rng: &mut R,
) -> Option<f64> {
    let base = species.profile().breeding_probability;
    match (species, weather) {
        (Species::Grass, Weather::Rain) => Some(base),
        (Species::Grass, Weather::Mist) => {
            Some(base + rng.gen_range(GRASS_MIST_BONUS_MIN..GRASS_MIST_BONUS_MAX))
        }
        (Species::PoisonIvy, Weather::Wind) => Some(base),
        _ => None,
    }
}

fn give_birth<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) -> usize {
    let Some(entity) = world.entity(id) else {
        return 0;
    };
    let species = entity.species;
    let profile = species.profile();
    let Some(location) = entity.location else {
        return 0;
    };
    if entity.age < profile.breeding_age {
        return 0;
    }

    let Some(probability) = breeding_probability(species, world.weather(), rng) else {
        return 0;
    };
    if rng.gen::<f64>() > probability {
        return 0;
    }

    let litter = rng.gen_range(1..=profile.max_litter_size);
    let free = world.field().free_adjacent_locations(location);
    let mut births = 0;
    for spot in free.into_iter().take(litter as usize) {
        world.spawn_newborn(species, spot, rng);
        births += 1;
    }
    births
}

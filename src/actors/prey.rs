//! Grazer behaviour: gazelles and zebras.
//!
//! A grazer ages, works through any infection, sleeps to its schedule,
//! burns food, breeds, and finally moves towards fodder. When every
//! neighbouring cell is taken the animal dies of overcrowding.

use rand::Rng;

use crate::actors::animal;
use crate::entity::EntityId;
use crate::species::Role;
use crate::world::World;

/// Run one tick of grazer behaviour. Returns the number of offspring placed.
pub fn act<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) -> usize {
    animal::advance_age(world, id);
    if !world.is_alive(id) {
        return 0;
    }
    animal::progress_disease(world, id, rng);
    animal::apply_sleep_schedule(world, id);
    if !animal::is_awake(world, id) {
        return 0;
    }
    animal::increment_hunger(world, id);
    if !world.is_alive(id) {
        return 0;
    }

    let births = animal::give_birth(world, id, rng);

    let Some(entity) = world.entity(id) else {
        return births;
    };
    let Some(location) = entity.location else {
        return births;
    };
    let hungry = entity
        .animal
        .as_ref()
        .map_or(false, |a| a.food < entity.species.profile().max_food());

    let mut destination = if hungry { find_food(world, id) } else { None };
    if destination.is_none() {
        destination = world.field().free_adjacent_location(location);
    }
    if destination.is_none() {
        destination = animal::graze_fallback(world, id);
    }

    match destination {
        Some(spot) => world.relocate(id, spot),
        // Boxed in on every side: overcrowding.
        None => world.kill(id),
    }
    births
}

/// Look for an edible plant next door. A plant is only worth eating once it
/// has reached breeding age, and only if the grazer has room for its food
/// value. Eating kills the plant and frees its cell for the grazer.
pub(crate) fn find_food(world: &mut World, id: EntityId) -> Option<crate::grid::Location> {
    let entity = world.entity(id)?;
    let location = entity.location?;
    let max_food = entity.species.profile().max_food();
    let food = entity.animal.as_ref()?.food;

    let mut meal = None;
    for spot in world.field().adjacent_locations(location, 1, 1) {
        let Some(other_id) = world.occupant_at(spot) else {
            continue;
        };
        let Some(other) = world.entity(other_id) else {
            continue;
        };
        if !other.is_alive() || other.species.role() != Role::Plant {
            continue;
        }
        let plant = other.species.profile();
        if other.age < plant.breeding_age {
            continue;
        }
        if food + plant.food_value > max_food {
            continue;
        }
        meal = Some((other_id, spot, plant.food_value));
        break;
    }

    let (plant_id, spot, value) = meal?;
    world.kill(plant_id);
    if let Some(entity) = world.entity_mut(id) {
        entity.set_food(food + value);
    }
    Some(spot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Location;
    use crate::species::Species;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grazer_world() -> (World, EntityId, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let mut world = World::new(10, 10, &mut rng);
        let id = world.spawn_newborn(Species::Gazelle, Location { row: 5, col: 5 }, &mut rng);
        (world, id, rng)
    }

    #[test]
    fn eating_poison_ivy_costs_food() {
        let (mut world, id, mut rng) = grazer_world();
        world.entity_mut(id).unwrap().set_food(10);
        let ivy = world.spawn_newborn(Species::PoisonIvy, Location { row: 5, col: 6 }, &mut rng);
        world.entity_mut(ivy).unwrap().age = Species::PoisonIvy.profile().breeding_age;

        let spot = find_food(&mut world, id);
        assert_eq!(spot, Some(Location { row: 5, col: 6 }));
        assert!(!world.is_alive(ivy));
        let food = world.entity(id).unwrap().animal.as_ref().unwrap().food;
        assert_eq!(food, 10 + Species::PoisonIvy.profile().food_value);
        assert_eq!(food, 5);
    }

    #[test]
    fn immature_plants_are_not_eaten() {
        let (mut world, id, mut rng) = grazer_world();
        world.entity_mut(id).unwrap().set_food(5);
        let sprout = world.spawn_newborn(Species::Grass, Location { row: 5, col: 6 }, &mut rng);
        // Fresh grass has not reached breeding age yet.
        assert!(find_food(&mut world, id).is_none());
        assert!(world.is_alive(sprout));
    }

    #[test]
    fn a_full_grazer_passes_up_grass() {
        let (mut world, id, mut rng) = grazer_world();
        let max = Species::Gazelle.profile().max_food();
        world.entity_mut(id).unwrap().set_food(max);
        let grass = world.spawn_newborn(Species::Grass, Location { row: 5, col: 6 }, &mut rng);
        world.entity_mut(grass).unwrap().age = Species::Grass.profile().breeding_age;
        assert!(find_food(&mut world, id).is_none());
        assert!(world.is_alive(grass));
    }

    #[test]
    fn overcrowded_grazers_die() {
        let (mut world, id, mut rng) = grazer_world();
        // Ring the grazer with fellow gazelles so no cell is free. Peers are
        // full-grown but below breeding age so the tick stays predictable.
        let centre = Location { row: 5, col: 5 };
        for spot in world.field().adjacent_locations(centre, 1, 1) {
            world.spawn_newborn(Species::Gazelle, spot, &mut rng);
        }
        {
            let entity = world.entity_mut(id).unwrap();
            entity.set_food(Species::Gazelle.profile().max_food());
            entity.animal.as_mut().unwrap().awake = true;
        }
        act(&mut world, id, &mut rng);
        assert!(!world.is_alive(id));
    }

    #[test]
    fn a_sleeping_grazer_does_nothing() {
        let (mut world, id, mut rng) = grazer_world();
        {
            let entity = world.entity_mut(id).unwrap();
            entity.set_food(3);
            entity.animal.as_mut().unwrap().awake = false;
        }
        let births = act(&mut world, id, &mut rng);
        assert_eq!(births, 0);
        let entity = world.entity(id).unwrap();
        // Asleep: no hunger, no movement.
        assert_eq!(entity.animal.as_ref().unwrap().food, 3);
        assert_eq!(entity.location, Some(Location { row: 5, col: 5 }));
    }
}

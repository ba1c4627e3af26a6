//! Per-tick behavior variants, selected by the entity's species role.

pub mod animal;
pub mod plant;
pub mod predator;
pub mod prey;

use rand::Rng;

use crate::entity::EntityId;
use crate::species::Role;
use crate::world::World;

/// Run one actor's behavior for this tick. Returns the number of offspring
/// it produced.
pub fn act<R: Rng>(world: &mut World, id: EntityId, rng: &mut R) -> usize {
    let Some(entity) = world.entity(id) else {
        return 0;
    };
    if !entity.is_alive() {
        return 0;
    }
    match entity.species.role() {
        Role::Plant => plant::act(world, id, rng),
        Role::Prey => prey::act(world, id, rng),
        Role::Predator => predator::act(world, id, rng),
    }
}

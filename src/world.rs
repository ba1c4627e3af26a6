//! The simulation context: entity arena, field, disease registry, weather,
//! and the global clock, owned together and passed explicitly into every
//! behavior call. No process-wide state.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;

use crate::disease::DiseaseRegistry;
use crate::entity::{Entity, EntityId};
use crate::grid::{Field, Location};
use crate::snapshot::{CellSnapshot, PopulationCount, WorldSnapshot};
use crate::species::Species;
use crate::weather::{Weather, WeatherCycle, CYCLE_INTERVAL_TICKS};

/// Ticks per simulated hour.
pub const TICKS_PER_HOUR: u64 = 3;
/// Hours per simulated day; the clock wraps back to zero.
pub const HOURS_PER_DAY: u32 = 24;

pub struct World {
    pub(crate) field: Field,
    pub(crate) entities: HashMap<EntityId, Entity>,
    pub(crate) disease: DiseaseRegistry,
    weather: WeatherCycle,
    order: Vec<EntityId>,
    next_id: u64,
    tick: u64,
    hour: u32,
}

impl World {
    /// Create an empty world. The weather is rolled immediately so tick
    /// zero already has a condition.
    pub fn new<R: Rng>(depth: i32, width: i32, rng: &mut R) -> Self {
        Self {
            field: Field::new(depth, width),
            entities: HashMap::new(),
            disease: DiseaseRegistry::new(),
            weather: WeatherCycle::new(rng),
            order: Vec::new(),
            next_id: 0,
            tick: 0,
            hour: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn weather(&self) -> Weather {
        self.weather.current()
    }

    pub fn weather_mut(&mut self) -> &mut WeatherCycle {
        &mut self.weather
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn infected_count(&self) -> usize {
        self.disease.count()
    }

    /// Advance the tick counter, the hourly clock (every third tick), and
    /// the weather cycle (every fiftieth tick). The hour wraps 24 to 0.
    pub fn advance_clock<R: Rng>(&mut self, rng: &mut R) {
        self.tick += 1;
        if self.tick % TICKS_PER_HOUR == 0 {
            self.hour += 1;
        }
        if self.tick % CYCLE_INTERVAL_TICKS == 0 {
            self.weather.cycle(rng);
        }
        if self.hour == HOURS_PER_DAY {
            self.hour = 0;
        }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an actor with random age (and random food for animals), as
    /// during initial population seeding.
    pub fn spawn_seeded<R: Rng>(
        &mut self,
        species: Species,
        location: Location,
        rng: &mut R,
    ) -> EntityId {
        let id = self.allocate();
        let entity = Entity::seeded(id, species, location, rng);
        self.admit(entity, location)
    }

    /// Spawn a newborn actor: age zero, full food, random gender.
    pub fn spawn_newborn<R: Rng>(
        &mut self,
        species: Species,
        location: Location,
        rng: &mut R,
    ) -> EntityId {
        let id = self.allocate();
        let entity = Entity::newborn(id, species, location, rng);
        self.admit(entity, location)
    }

    fn admit(&mut self, entity: Entity, location: Location) -> EntityId {
        let id = entity.id;
        if let Some(evicted) = self.field.place(id, location) {
            // The previous occupant loses its slot: clear its position
            // bookkeeping before the newcomer takes over.
            if let Some(previous) = self.entities.get_mut(&evicted) {
                previous.alive = false;
                previous.location = None;
                if previous.is_infected() {
                    self.disease.recover(evicted);
                }
            }
        }
        self.entities.insert(id, entity);
        self.order.push(id);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.get(&id).map_or(false, Entity::is_alive)
    }

    pub fn occupant_at(&self, location: Location) -> Option<EntityId> {
        self.field.occupant_at(location)
    }

    /// Mark an actor dead, clear its field slot, and drop its registry
    /// membership. Idempotent: a second call finds nothing left to clear.
    pub fn kill(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if !entity.alive && entity.location.is_none() {
            return;
        }
        entity.alive = false;
        let infected = entity.is_infected();
        if let Some(location) = entity.location.take() {
            self.field.clear(location);
        }
        if infected {
            self.disease.recover(id);
        }
    }

    /// Move a living actor to a new location. The destination must be free;
    /// eaten or defeated occupants are killed (and their slot cleared)
    /// before the move.
    pub fn relocate(&mut self, id: EntityId, destination: Location) {
        debug_assert!(self.is_alive(id), "cannot relocate a dead actor");
        debug_assert!(
            self.field.occupant_at(destination).is_none(),
            "destination must be free"
        );
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if let Some(previous) = entity.location.take() {
            self.field.clear(previous);
        }
        entity.location = Some(destination);
        self.field.place(id, destination);
    }

    /// The live actors in their fixed per-tick execution order.
    pub fn live_ids(&self) -> Vec<EntityId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.is_alive(*id))
            .collect()
    }

    /// Drop dead actors from the arena. Returns how many were removed.
    pub fn prune_dead(&mut self) -> usize {
        let before = self.order.len();
        let entities = &self.entities;
        self.order.retain(|id| {
            entities.get(id).map_or(false, Entity::is_alive)
        });
        self.entities.retain(|_, entity| entity.alive);
        before - self.order.len()
    }

    pub fn total_population(&self) -> usize {
        self.order
            .iter()
            .filter(|id| self.is_alive(**id))
            .count()
    }

    /// Living population per species, in species order.
    pub fn census(&self) -> Vec<PopulationCount> {
        let mut counts: BTreeMap<Species, usize> = BTreeMap::new();
        for entity in self.entities.values().filter(|e| e.alive) {
            *counts.entry(entity.species).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(species, count)| PopulationCount { species, count })
            .collect()
    }

    pub fn living_species_count(&self) -> usize {
        self.census().len()
    }

    /// The simulation continues only while more than one species survives.
    pub fn is_viable(&self) -> bool {
        self.living_species_count() >= 2
    }

    /// Assemble the read-only per-tick view.
    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let cells = self
            .field
            .occupied_cells()
            .filter_map(|(location, id)| {
                self.entities.get(&id).map(|entity| CellSnapshot {
                    row: location.row,
                    col: location.col,
                    species: entity.species,
                })
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            hour: self.hour,
            weather: self.weather.current(),
            infected: self.disease.count(),
            populations: self.census(),
            cells,
        }
    }
}

//! Savannah: a tick-driven multi-species ecosystem simulation on a 2-D grid.
//!
//! Plants, grazers, and hunters share a bounded field, driven by a clock
//! that also turns the weather and a day/night rhythm. Runs are fully
//! deterministic for a given scenario seed.

pub mod actors;
pub mod disease;
pub mod engine;
pub mod entity;
pub mod grid;
pub mod rng;
pub mod scenario;
pub mod snapshot;
pub mod species;
pub mod weather;
pub mod world;

pub use engine::{Engine, EngineSettings, RunOutcome, RunStatus, StopHandle, TickSummary};
pub use scenario::{Scenario, ScenarioError, ScenarioLoader};
pub use snapshot::{SnapshotWriter, WorldSnapshot};
pub use species::{Role, Species};
pub use world::World;

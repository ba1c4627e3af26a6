//! The driver: owns the world, the named RNG streams, and the run loop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;

use crate::rng::RngManager;
use crate::scenario::Scenario;
use crate::snapshot::{SnapshotWriter, WorldSnapshot};
use crate::species::Species;
use crate::weather::Weather;
use crate::world::World;
use crate::{actors, grid::Location};

/// How one run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every requested tick ran.
    Completed,
    /// A stop handle was triggered between ticks.
    Stopped,
    /// Fewer than two species remained, so the run halted early.
    NonViable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub ticks_run: u64,
    pub status: RunStatus,
}

/// What one tick did, for callers that log or chart progress.
#[derive(Debug, Clone, Copy)]
pub struct TickSummary {
    pub tick: u64,
    pub hour: u32,
    pub weather: Weather,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
    pub viable: bool,
}

/// Cooperative stop flag. Cloneable and safe to trigger from another
/// thread; the engine checks it between ticks only.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    pub snapshot_interval_ticks: u64,
    pub snapshot_dir: PathBuf,
    pub delay_ms: u64,
}

impl EngineSettings {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        EngineSettings {
            scenario_name: scenario.name.clone(),
            seed: scenario.seed,
            snapshot_interval_ticks: scenario.snapshot_interval_ticks,
            snapshot_dir: PathBuf::from("snapshots"),
            delay_ms: scenario.delay_ms,
        }
    }

    pub fn with_snapshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshot_dir = dir.into();
        self
    }
}

pub struct Engine {
    settings: EngineSettings,
    scenario: Scenario,
    world: World,
    rng: RngManager,
    snapshot_writer: SnapshotWriter,
    stop: Arc<AtomicBool>,
}

/// Order the species are rolled for each cell. A later successful roll
/// evicts an earlier winner, so the order is part of the seeded layout.
const SEEDING_ORDER: [Species; 6] = [
    Species::Lion,
    Species::Zebra,
    Species::Gazelle,
    Species::Grass,
    Species::PoisonIvy,
    Species::Hyena,
];

impl Engine {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let settings = EngineSettings::from_scenario(scenario);
        Self::new(scenario.clone(), settings)
    }

    pub fn new(scenario: Scenario, settings: EngineSettings) -> Self {
        let snapshot_writer =
            SnapshotWriter::new(&settings.snapshot_dir, settings.snapshot_interval_ticks);
        let mut rng = RngManager::new(settings.seed);
        let world = Self::seed_world(&scenario, &mut rng);
        Engine {
            settings,
            scenario,
            world,
            rng,
            snapshot_writer,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Rebuild the world from the scenario seed. A reset engine replays the
    /// exact same run.
    pub fn reset(&mut self) {
        self.rng.reseed(self.settings.seed);
        self.stop.store(false, Ordering::SeqCst);
        self.world = Self::seed_world(&self.scenario, &mut self.rng);
    }

    fn seed_world(scenario: &Scenario, rng: &mut RngManager) -> World {
        use rand::Rng;

        let mut world = {
            let mut weather_rng = rng.stream("weather");
            World::new(scenario.field.depth, scenario.field.width, &mut weather_rng)
        };
        let mut populate_rng = rng.stream("populate");
        for row in 0..world.field().depth() {
            for col in 0..world.field().width() {
                let spot = Location { row, col };
                for species in SEEDING_ORDER {
                    let p = scenario.seeding.probability(species);
                    if p > 0.0 && populate_rng.gen::<f64>() <= p {
                        world.spawn_seeded(species, spot, &mut populate_rng);
                    }
                }
            }
        }
        world
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop))
    }

    /// Advance the world one tick and return what happened.
    pub fn step(&mut self) -> anyhow::Result<TickSummary> {
        {
            let mut weather_rng = self.rng.stream("weather");
            self.world.advance_clock(&mut weather_rng);
        }

        let mut births = 0;
        {
            let mut actor_rng = self.rng.stream("actors");
            // Newborns join the world immediately but act from the next
            // tick; the roster is fixed up front.
            for id in self.world.live_ids() {
                if self.world.is_alive(id) {
                    births += actors::act(&mut self.world, id, &mut actor_rng);
                }
            }
        }
        let deaths = self.world.prune_dead();

        let summary = TickSummary {
            tick: self.world.tick(),
            hour: self.world.hour(),
            weather: self.world.weather(),
            births,
            deaths,
            population: self.world.total_population(),
            viable: self.world.is_viable(),
        };

        let snapshot = self.world.snapshot(&self.settings.scenario_name);
        self.snapshot_writer
            .maybe_write(&snapshot)
            .with_context(|| format!("writing snapshot at tick {}", summary.tick))?;

        Ok(summary)
    }

    pub fn run(&mut self, max_ticks: u64) -> anyhow::Result<RunOutcome> {
        self.run_with_hook(max_ticks, |_| {})
    }

    /// Run up to `max_ticks`, calling `hook` with a fresh snapshot after
    /// every tick. Halts early on a stop request or a non-viable world.
    pub fn run_with_hook(
        &mut self,
        max_ticks: u64,
        mut hook: impl FnMut(WorldSnapshot),
    ) -> anyhow::Result<RunOutcome> {
        let mut ticks_run = 0;
        loop {
            if ticks_run == max_ticks {
                return Ok(RunOutcome {
                    ticks_run,
                    status: RunStatus::Completed,
                });
            }
            if self.stop.load(Ordering::SeqCst) {
                return Ok(RunOutcome {
                    ticks_run,
                    status: RunStatus::Stopped,
                });
            }
            if !self.world.is_viable() {
                return Ok(RunOutcome {
                    ticks_run,
                    status: RunStatus::NonViable,
                });
            }

            self.step()?;
            ticks_run += 1;
            hook(self.world.snapshot(&self.settings.scenario_name));

            if self.settings.delay_ms > 0 {
                thread::sleep(Duration::from_millis(self.settings.delay_ms));
            }
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn current_tick(&self) -> u64 {
        self.world.tick()
    }

    pub fn is_viable(&self) -> bool {
        self.world.is_viable()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot(&self.settings.scenario_name)
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Pause applied between ticks during `run`; `step` itself never sleeps.
    pub fn set_delay(&mut self, delay_ms: u64) {
        self.settings.delay_ms = delay_ms;
    }

    pub fn delay_ms(&self) -> u64 {
        self.settings.delay_ms
    }
}

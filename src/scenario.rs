//! Scenario files: named, seeded simulation setups loaded from YAML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::species::Species;

/// Ticks a run lasts when the scenario does not say otherwise.
pub const DEFAULT_TICKS: u64 = 4_000;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid scenario: {0}")]
    Validation(String),
}

/// Grid dimensions. Non-positive values fall back to the stock savannah
/// size when the field is built.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_depth")]
    pub depth: i32,
}

fn default_width() -> i32 {
    210
}

fn default_depth() -> i32 {
    150
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width: default_width(),
            depth: default_depth(),
        }
    }
}

/// Per-cell probability that initial seeding places each species.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SeedingConfig {
    #[serde(default = "default_grass")]
    pub grass: f64,
    #[serde(default = "default_poison_ivy")]
    pub poison_ivy: f64,
    #[serde(default = "default_gazelle")]
    pub gazelle: f64,
    #[serde(default = "default_zebra")]
    pub zebra: f64,
    #[serde(default = "default_lion")]
    pub lion: f64,
    #[serde(default = "default_hyena")]
    pub hyena: f64,
}

fn default_grass() -> f64 {
    0.50
}

fn default_poison_ivy() -> f64 {
    0.01
}

fn default_gazelle() -> f64 {
    0.30
}

fn default_zebra() -> f64 {
    0.30
}

fn default_lion() -> f64 {
    0.03
}

fn default_hyena() -> f64 {
    0.03
}

impl Default for SeedingConfig {
    fn default() -> Self {
        SeedingConfig {
            grass: default_grass(),
            poison_ivy: default_poison_ivy(),
            gazelle: default_gazelle(),
            zebra: default_zebra(),
            lion: default_lion(),
            hyena: default_hyena(),
        }
    }
}

impl SeedingConfig {
    pub fn probability(&self, species: Species) -> f64 {
        match species {
            Species::Grass => self.grass,
            Species::PoisonIvy => self.poison_ivy,
            Species::Gazelle => self.gazelle,
            Species::Zebra => self.zebra,
            Species::Lion => self.lion,
            Species::Hyena => self.hyena,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Run length; `None` means the stock run of [`DEFAULT_TICKS`].
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub seeding: SeedingConfig,
    #[serde(default = "default_snapshot_interval")]
    pub snapshot_interval_ticks: u64,
    /// Optional pause between ticks, for watching a run unfold.
    #[serde(default)]
    pub delay_ms: u64,
}

fn default_seed() -> u64 {
    42
}

fn default_snapshot_interval() -> u64 {
    50
}

impl Scenario {
    /// The stock savannah setup used when no scenario file is given.
    pub fn savannah() -> Self {
        Scenario {
            name: "savannah".to_string(),
            description: Some("Default savannah with the stock six species".to_string()),
            seed: default_seed(),
            ticks: None,
            field: FieldConfig::default(),
            seeding: SeedingConfig::default(),
            snapshot_interval_ticks: default_snapshot_interval(),
            delay_ms: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.unwrap_or(DEFAULT_TICKS)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.name.trim().is_empty() {
            return Err(ScenarioError::Validation(
                "scenario name must not be empty".to_string(),
            ));
        }
        for species in Species::ALL {
            let p = self.seeding.probability(species);
            if !(0.0..=1.0).contains(&p) {
                return Err(ScenarioError::Validation(format!(
                    "seeding probability for {species} out of range: {p}"
                )));
            }
        }
        Ok(())
    }
}

/// Loads scenario files relative to a base directory.
pub struct ScenarioLoader {
    pub base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        ScenarioLoader {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, name: &str) -> Result<Scenario, ScenarioError> {
        let path = self.base_dir.join(name);
        let raw = fs::read_to_string(path)?;
        Self::from_str(&raw)
    }

    pub fn from_str(raw: &str) -> Result<Scenario, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(raw)?;
        scenario.validate()?;
        Ok(scenario)
    }
}

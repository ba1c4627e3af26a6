//! The run-wide weather condition, re-rolled on a fixed tick cadence.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticks between weather re-rolls.
pub const CYCLE_INTERVAL_TICKS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Rain,
    Sun,
    Fog,
    Wind,
    Mist,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Rain,
        Weather::Sun,
        Weather::Fog,
        Weather::Wind,
        Weather::Mist,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weather::Rain => "rain",
            Weather::Sun => "sun",
            Weather::Fog => "fog",
            Weather::Wind => "wind",
            Weather::Mist => "mist",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct WeatherCycle {
    current: Weather,
}

impl WeatherCycle {
    /// Start the cycle with an immediate roll.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut cycle = Self {
            current: Weather::Rain,
        };
        cycle.cycle(rng);
        cycle
    }

    /// Uniformly select one of the fixed conditions as the new current.
    pub fn cycle<R: Rng>(&mut self, rng: &mut R) {
        let index = rng.gen_range(0..Weather::ALL.len());
        self.current = Weather::ALL[index];
    }

    pub fn current(&self) -> Weather {
        self.current
    }

    /// Force a condition; used by scenario checks that pin the weather.
    pub fn set_current(&mut self, weather: Weather) {
        self.current = weather;
    }
}

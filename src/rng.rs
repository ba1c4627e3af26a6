//! Deterministic random number streams.
//!
//! Every probabilistic concern (seeding, actor behavior, weather) draws from
//! a named stream derived from the master seed, so a run replays identically
//! for the same seed and stream usage.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Drop all derived streams and restart from the given seed. Used when
    /// the simulation resets so a reset run replays like a fresh one.
    pub fn reseed(&mut self, seed: u64) {
        self.master = ChaCha8Rng::seed_from_u64(seed);
        self.streams.clear();
    }

    /// Borrow the named stream, deriving it from the master on first use.
    pub fn stream(&mut self, name: &str) -> StreamRng<'_> {
        let entry = self.streams.entry(name.to_string()).or_insert_with(|| {
            let mut seed_bytes = [0u8; 32];
            self.master.fill_bytes(&mut seed_bytes);
            let mut seed_u64 = [0u8; 8];
            seed_u64.copy_from_slice(&seed_bytes[..8]);
            let derived = u64::from_le_bytes(seed_u64);
            ChaCha8Rng::seed_from_u64(derived)
        });
        StreamRng { inner: entry }
    }
}

pub struct StreamRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for StreamRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

//! Read-only per-tick state for external consumers, plus the periodic
//! on-disk JSON writer used by the CLI runner.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::species::Species;
use crate::weather::Weather;

/// One occupied cell: location plus the occupant's species tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub row: u32,
    pub col: u32,
    pub species: Species,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCount {
    pub species: Species,
    pub count: usize,
}

/// The full read-only view of one tick. Consumers never mutate simulation
/// state through this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub hour: u32,
    pub weather: Weather,
    pub infected: usize,
    pub populations: Vec<PopulationCount>,
    pub cells: Vec<CellSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub tick: u64,
    pub timestamp: String,
    pub entity_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    metadata: SnapshotMetadata,
    snapshot: WorldSnapshot,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes a snapshot file every `interval_ticks` ticks. An interval of zero
/// disables writing entirely.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    interval_ticks: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>, interval_ticks: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval_ticks,
        }
    }

    pub fn maybe_write(&self, snapshot: &WorldSnapshot) -> Result<Option<PathBuf>, SnapshotError> {
        if self.interval_ticks == 0 {
            return Ok(None);
        }
        if snapshot.tick == 0 || snapshot.tick % self.interval_ticks != 0 {
            return Ok(None);
        }

        let dir = self.output_dir.join(&snapshot.scenario);
        fs::create_dir_all(&dir)?;
        let file = SnapshotFile {
            metadata: SnapshotMetadata {
                tick: snapshot.tick,
                timestamp: chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string(),
                entity_count: snapshot.cells.len(),
            },
            snapshot: snapshot.clone(),
        };
        let path = dir.join(format!("tick_{:06}.json", snapshot.tick));
        fs::write(&path, serde_json::to_string_pretty(&file)?)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(tick: u64) -> WorldSnapshot {
        WorldSnapshot {
            scenario: "test".to_string(),
            tick,
            hour: 0,
            weather: Weather::Rain,
            infected: 0,
            populations: vec![PopulationCount {
                species: Species::Grass,
                count: 1,
            }],
            cells: vec![CellSnapshot {
                row: 0,
                col: 0,
                species: Species::Grass,
            }],
        }
    }

    #[test]
    fn writer_respects_interval() {
        let dir = tempdir().expect("tempdir");
        let writer = SnapshotWriter::new(dir.path(), 30);
        assert!(writer.maybe_write(&sample(1)).unwrap().is_none());
        assert!(writer.maybe_write(&sample(29)).unwrap().is_none());
        let path = writer.maybe_write(&sample(30)).unwrap().expect("written");
        assert!(path.exists());
    }

    #[test]
    fn zero_interval_disables_writing() {
        let dir = tempdir().expect("tempdir");
        let writer = SnapshotWriter::new(dir.path(), 0);
        assert!(writer.maybe_write(&sample(30)).unwrap().is_none());
    }

    #[test]
    fn written_file_round_trips() {
        let dir = tempdir().expect("tempdir");
        let writer = SnapshotWriter::new(dir.path(), 10);
        let path = writer.maybe_write(&sample(10)).unwrap().expect("written");
        let text = fs::read_to_string(path).expect("readable");
        let parsed: SnapshotFile = serde_json::from_str(&text).expect("valid json");
        assert_eq!(parsed.metadata.tick, 10);
        assert_eq!(parsed.snapshot.cells.len(), 1);
    }
}

//! Spatial model - the bounded rectangular field and its coordinates.

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Dimensions substituted when a caller asks for a non-positive field.
pub const DEFAULT_WIDTH: i32 = 210;
pub const DEFAULT_DEPTH: i32 = 150;

/// A grid coordinate. A plain value, not an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: u32,
    pub col: u32,
}

impl Location {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// The field maps each location to at most one occupant.
///
/// The field is the authority on occupancy; entities mirror their own
/// location but the cell contents here decide who is where.
pub struct Field {
    depth: u32,
    width: u32,
    cells: Vec<Option<EntityId>>,
}

impl Field {
    /// Create a field of the given size. Non-positive dimensions are
    /// substituted with the defaults rather than treated as an error.
    pub fn new(depth: i32, width: i32) -> Self {
        let (depth, width) = if depth <= 0 || width <= 0 {
            eprintln!(
                "field dimensions must be greater than zero, using defaults {}x{}",
                DEFAULT_DEPTH, DEFAULT_WIDTH
            );
            (DEFAULT_DEPTH, DEFAULT_WIDTH)
        } else {
            (depth, width)
        };
        let depth = depth as u32;
        let width = width as u32;
        Self {
            depth,
            width,
            cells: vec![None; (depth * width) as usize],
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn contains(&self, location: Location) -> bool {
        location.row < self.depth && location.col < self.width
    }

    fn index(&self, location: Location) -> usize {
        debug_assert!(self.contains(location), "location out of bounds");
        (location.row * self.width + location.col) as usize
    }

    /// The occupant of the given location, if any.
    pub fn occupant_at(&self, location: Location) -> Option<EntityId> {
        self.cells[self.index(location)]
    }

    /// Record the occupant at the location, returning whoever was evicted.
    /// The caller is responsible for clearing the evicted occupant's own
    /// position bookkeeping.
    pub fn place(&mut self, id: EntityId, location: Location) -> Option<EntityId> {
        let index = self.index(location);
        self.cells[index].replace(id)
    }

    pub fn clear(&mut self, location: Location) {
        let index = self.index(location);
        self.cells[index] = None;
    }

    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// In-bounds locations whose Chebyshev distance from `location` lies in
    /// the band `[min_radius, max_radius]`, excluding the location itself.
    /// Order is deterministic (row-major over the offset window).
    pub fn adjacent_locations(
        &self,
        location: Location,
        min_radius: u32,
        max_radius: u32,
    ) -> Vec<Location> {
        let mut adjacent = Vec::new();
        let r = max_radius as i64;
        let row = location.row as i64;
        let col = location.col as i64;
        for dr in -r..=r {
            for dc in -r..=r {
                let distance = dr.abs().max(dc.abs()) as u32;
                if distance < min_radius || distance > max_radius || (dr == 0 && dc == 0) {
                    continue;
                }
                let (nr, nc) = (row + dr, col + dc);
                if nr >= 0 && nr < self.depth as i64 && nc >= 0 && nc < self.width as i64 {
                    adjacent.push(Location::new(nr as u32, nc as u32));
                }
            }
        }
        adjacent
    }

    /// Radius-1 neighbors with no occupant.
    pub fn free_adjacent_locations(&self, location: Location) -> Vec<Location> {
        self.adjacent_locations(location, 1, 1)
            .into_iter()
            .filter(|loc| self.occupant_at(*loc).is_none())
            .collect()
    }

    /// One arbitrary free neighbor, or none.
    pub fn free_adjacent_location(&self, location: Location) -> Option<Location> {
        self.free_adjacent_locations(location).into_iter().next()
    }

    /// All occupied cells in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Location, EntityId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.map(|id| {
                let row = index as u32 / self.width;
                let col = index as u32 % self.width;
                (Location::new(row, col), id)
            })
        })
    }
}

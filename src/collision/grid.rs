use std::collections::HashMap;

use glam::Vec2;

use crate::core::types::Aabb;

/// Integer cell coordinate.
pub type CellKey = (i32, i32);

/// Uniform grid bucketing body slots for the current frame.
///
/// Stores slot indices into the frame's body list rather than ids. Cell vectors
/// are kept between frames and only emptied, so steady-state rebuilds do not
/// allocate.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    /// Populated keys in first-insertion order; drives deterministic iteration.
    occupied: Vec<CellKey>,
    /// Slots whose bounds cover more than [`Self::MAX_CELLS_PER_BODY`] cells.
    oversized: Vec<usize>,
}

impl SpatialGrid {
    /// Retained empty cells beyond this multiple of the last occupancy are dropped on clear.
    const STALE_CELL_FACTOR: usize = 4;

    /// Bodies covering more cells than this are kept out of the cells and
    /// listed in [`oversized`](Self::oversized) instead.
    pub const MAX_CELLS_PER_BODY: i64 = 1024;

    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
            occupied: Vec::new(),
            oversized: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn set_cell_size(&mut self, cell_size: f32) {
        self.cell_size = cell_size;
        self.cells.clear();
        self.occupied.clear();
        self.oversized.clear();
    }

    pub fn world_to_cell(&self, point: Vec2) -> CellKey {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Discards all cell contents.
    pub fn clear(&mut self) {
        self.oversized.clear();
        let occupancy = self.occupied.len();
        for key in self.occupied.drain(..) {
            if let Some(slots) = self.cells.get_mut(&key) {
                slots.clear();
            }
        }
        if self.cells.len() > occupancy.max(16) * Self::STALE_CELL_FACTOR {
            self.cells.clear();
        }
    }

    /// Inserts `slot` into every cell covered by `bounds`, or into the
    /// oversized list when that would exceed [`Self::MAX_CELLS_PER_BODY`].
    pub fn insert(&mut self, slot: usize, bounds: &Aabb) {
        let min_cell = self.world_to_cell(bounds.min);
        let max_cell = self.world_to_cell(bounds.max);

        let span_x = i64::from(max_cell.0) - i64::from(min_cell.0) + 1;
        let span_y = i64::from(max_cell.1) - i64::from(min_cell.1) + 1;
        if span_x.saturating_mul(span_y) > Self::MAX_CELLS_PER_BODY {
            self.oversized.push(slot);
            return;
        }

        for x in min_cell.0..=max_cell.0 {
            for y in min_cell.1..=max_cell.1 {
                let slots = self.cells.entry((x, y)).or_default();
                if slots.is_empty() {
                    self.occupied.push((x, y));
                }
                slots.push(slot);
            }
        }
    }

    /// Bodies bucketed in `key` this frame.
    pub fn query(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keys of populated cells, in first-insertion order.
    pub fn occupied_cells(&self) -> &[CellKey] {
        &self.occupied
    }

    /// Slots too large to bucket this frame, in insertion order.
    pub fn oversized(&self) -> &[usize] {
        &self.oversized
    }

    pub fn populated_cell_count(&self) -> usize {
        self.occupied.len()
    }

    /// Populated cells with their contents, in first-insertion order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellKey, &[usize])> + '_ {
        self.occupied.iter().map(move |&key| (key, self.query(key)))
    }
}

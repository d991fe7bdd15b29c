//! Conway's Game of Life (B3/S23) on a torus, with change tracking and
//! cycle detection.

use std::collections::HashSet;
use std::hash::Hash;

use glam::IVec2;

use crate::bits::{BitAggregator, BitEnumerator};
use crate::grid::{Size, ToroidalGrid};

/// Alive/dead automaton state.
pub type CellGrid = ToroidalGrid<bool>;

/// Per-cell "must recompute" flags for the next generation.
pub type ChangeGrid = ToroidalGrid<bool>;

/// Applies the B3/S23 rule.
pub fn is_alive_next(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

impl ToroidalGrid<bool> {
    /// Builds a cell grid from packed bits, row-major, MSB first within each byte.
    ///
    /// Bits beyond the grid capacity are ignored; cells with no bit stay dead.
    pub fn from_bytes(size: Size, data: &[u8]) -> Self {
        let mut grid = Self::new(size);
        grid.set_bytes(data);
        grid
    }

    /// Overwrites cells from packed bits, row-major, MSB first within each byte.
    pub fn set_bytes(&mut self, data: &[u8]) {
        for (cell, bit) in self.values_mut().iter_mut().zip(BitEnumerator::new(data)) {
            *cell = bit;
        }
    }

    /// Packs cells into bytes, row-major, MSB first within each byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut aggregator = BitAggregator::with_capacity(self.values().len());
        aggregator.extend(self.values().iter().copied());
        aggregator.into_bytes()
    }

    /// Counts set cells.
    pub fn population(&self) -> usize {
        self.values().iter().filter(|&&v| v).count()
    }

    /// Counts live cells among the 8 neighbors of `point`.
    pub fn count_neighbors(&self, point: IVec2) -> u8 {
        self.neighborhood(point)
            .iter()
            .filter(|n| n.offset != IVec2::ZERO && *self.get(n.position))
            .count() as u8
    }

    /// Flags `point` and its full Moore neighborhood.
    pub fn mark_neighborhood(&mut self, point: IVec2) {
        for neighbor in self.neighborhood(point) {
            self.set(neighbor.position, true);
        }
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Double-buffered Life simulation that only recomputes cells whose
/// neighborhood changed in the previous generation.
#[derive(Debug, Clone)]
pub struct LifeSimulation {
    cells: CellGrid,
    next_cells: CellGrid,
    changes: ChangeGrid,
    next_changes: ChangeGrid,
}

impl LifeSimulation {
    /// Seeds a simulation from packed bits. Every cell starts flagged as changed.
    pub fn new(size: Size, seed: &[u8]) -> Self {
        Self {
            cells: CellGrid::from_bytes(size, seed),
            next_cells: CellGrid::new(size),
            changes: ChangeGrid::filled(size, true),
            next_changes: ChangeGrid::new(size),
        }
    }

    /// Returns the grid size.
    pub fn size(&self) -> Size {
        self.cells.size()
    }

    /// Returns the current generation.
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// Returns the flags that will drive the next step.
    pub fn changes(&self) -> &ChangeGrid {
        &self.changes
    }

    /// Advances one generation.
    ///
    /// Unflagged cells carry over unchanged: a cell can only flip if some
    /// cell in its neighborhood flipped last step, and those are exactly the
    /// cells [`ChangeGrid`] marks.
    pub fn step(&mut self) {
        self.next_cells.set_all(false);
        self.next_changes.set_all(false);

        for point in self.cells.points() {
            let alive = *self.cells.get(point);
            if *self.changes.get(point) {
                let next_alive = is_alive_next(alive, self.cells.count_neighbors(point));
                self.next_cells.set(point, next_alive);
                if alive != next_alive {
                    self.next_changes.mark_neighborhood(point);
                }
            } else {
                self.next_cells.set(point, alive);
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next_cells);
        std::mem::swap(&mut self.changes, &mut self.next_changes);
    }

    /// Runs until a snapshot repeats or `max_generations` snapshots are recorded.
    ///
    /// `fingerprint` maps a packed snapshot to the key used for cycle detection.
    pub fn run<K, F>(mut self, max_generations: usize, mut fingerprint: F) -> History
    where
        K: Eq + Hash,
        F: FnMut(&[u8]) -> K,
    {
        let size = self.size();
        let mut seen = HashSet::with_capacity(max_generations);
        let mut frames = Vec::with_capacity(max_generations);
        let mut ended_in_cycle = false;

        while frames.len() < max_generations {
            let data = self.cells.to_bytes();
            if !seen.insert(fingerprint(&data)) {
                tracing::trace!(generation = frames.len(), "snapshot repeated");
                ended_in_cycle = true;
                break;
            }
            frames.push(data);
            if frames.len() < max_generations {
                self.step();
            }
        }

        tracing::debug!(
            generations = frames.len(),
            ended_in_cycle,
            "life simulation finished"
        );

        History {
            size,
            frames,
            ended_in_cycle,
        }
    }
}

/// Packed snapshots of every generation a simulation visited, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    size: Size,
    frames: Vec<Vec<u8>>,
    ended_in_cycle: bool,
}

impl History {
    /// Grid size of every frame.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Packed snapshots, oldest first.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True if the run stopped because a snapshot repeated, rather than
    /// hitting the generation limit.
    pub fn ended_in_cycle(&self) -> bool {
        self.ended_in_cycle
    }

    /// Decodes frame `index` back into a cell grid.
    pub fn frame(&self, index: usize) -> Option<CellGrid> {
        self.frames
            .get(index)
            .map(|data| CellGrid::from_bytes(self.size, data))
    }

    /// Decodes every frame, oldest first.
    pub fn grids(&self) -> impl Iterator<Item = CellGrid> + '_ {
        self.frames
            .iter()
            .map(|data| CellGrid::from_bytes(self.size, data))
    }
}

//! Cellular automaton machinery for LifeHash.
//!
//! - [`ToroidalGrid`] - generic wrap-around grid with Moore neighborhoods
//! - [`BitAggregator`] / [`BitEnumerator`] - MSB-first bit streams
//! - [`LifeSimulation`] - B3/S23 Life with change tracking and cycle detection
//!
//! # Example
//!
//! ```
//! use lifehash_automata::{LifeSimulation, Size};
//!
//! // One byte per row of an 8x8 torus; row 1 holds a horizontal blinker.
//! let seed = [0, 0b0111_0000, 0, 0, 0, 0, 0, 0];
//! let history = LifeSimulation::new(Size::square(8), &seed).run(50, |data| data.to_vec());
//!
//! assert!(history.ended_in_cycle());
//! assert_eq!(history.len(), 2);
//! ```

mod bits;
mod grid;
mod life;

pub use bits::{BitAggregator, BitEnumerator, Underflow};
pub use glam::IVec2;
pub use grid::{Neighbor, Size, ToroidalGrid};
pub use life::{CellGrid, ChangeGrid, History, LifeSimulation, is_alive_next};

// ============================================================================
// Invariant tests - properties that must hold for arbitrary seeds
// ============================================================================

/// Sweeps over many pseudo-random seeds.
///
/// Run with: cargo test -p lifehash-automata --features invariant-tests
#[cfg(all(test, feature = "invariant-tests"))]
mod invariant_tests {
    use super::*;
    use std::collections::HashSet;

    /// Deterministic seed bytes from a counter.
    fn seed_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut state = seed.wrapping_add(1);
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 56) as u8
            })
            .collect()
    }

    #[test]
    fn test_history_bounded_and_unique() {
        for (length, max) in [(16usize, 150usize), (32, 300)] {
            for seed in 0..64 {
                let size = Size::square(length);
                let data = seed_bytes(seed, size.capacity() / 8);
                let history = LifeSimulation::new(size, &data).run(max, |d| d.to_vec());

                assert!(!history.is_empty());
                assert!(history.len() <= max, "seed {seed} exceeded {max} frames");
                let unique: HashSet<&Vec<u8>> = history.frames().iter().collect();
                assert_eq!(unique.len(), history.len(), "seed {seed} repeated a frame");
                assert_eq!(history.frames()[0], data);
                assert!(history.ended_in_cycle() || history.len() == max);
            }
        }
    }

    #[test]
    fn test_incremental_step_matches_full_step() {
        for seed in 0..32 {
            let size = Size::square(16);
            let data = seed_bytes(seed, 32);
            let mut sim = LifeSimulation::new(size, &data);
            let mut reference = CellGrid::from_bytes(size, &data);

            for generation in 0..60 {
                sim.step();
                let mut next = CellGrid::new(size);
                for point in reference.points() {
                    let alive = *reference.get(point);
                    next.set(point, is_alive_next(alive, reference.count_neighbors(point)));
                }
                reference = next;
                assert_eq!(
                    sim.cells(),
                    &reference,
                    "seed {seed} diverged at generation {generation}"
                );
            }
        }
    }

    #[test]
    fn test_bit_roundtrip_any_buffer() {
        for seed in 0..64 {
            let data = seed_bytes(seed, 1 + (seed as usize % 40));
            let agg: BitAggregator = BitEnumerator::new(&data).collect();
            assert_eq!(agg.into_bytes(), data);
        }
    }
}

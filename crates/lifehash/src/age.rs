//! The age field: how recently each cell was alive.

use lifehash_automata::{CellGrid, History, ToroidalGrid};
use lifehash_color::{clamped, lerp_from};

/// Per-cell values in [0, 1].
pub type FracGrid = ToroidalGrid<f64>;

/// Writes `weight` into every cell alive in `cells`.
///
/// Dead cells keep their previous value, so overlaying frames oldest first
/// leaves each cell with the weight of the last frame it was alive in.
pub fn overlay(frac: &mut FracGrid, cells: &CellGrid, weight: f64) {
    for (value, &alive) in frac.values_mut().iter_mut().zip(cells.values()) {
        if alive {
            *value = weight;
        }
    }
}

/// Overlays every frame of `history`; frame `i` of `n` weighs `(i + 1) / n`.
///
/// Cells that were never alive stay at 0. An empty history yields an
/// all-zero field.
pub fn accumulate(history: &History) -> FracGrid {
    let mut frac = FracGrid::new(history.size());
    let count = history.len() as f64;
    for (i, cells) in history.grids().enumerate() {
        let weight = clamped(lerp_from(0.0, count, (i + 1) as f64));
        overlay(&mut frac, &cells, weight);
    }
    frac
}

/// Rescales the field so its minimum maps to 0 and its maximum to 1.
///
/// A constant field is left as is.
pub fn normalize(frac: &mut FracGrid) {
    let (min, max) = frac
        .values()
        .iter()
        .fold((f64::MAX, f64::from_bits(1)), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
    if min == max {
        return;
    }
    for value in frac.values_mut() {
        *value = lerp_from(min, max, *value);
    }
}

/// The age field for a finished simulation, normalized when `normalize_age` is set.
pub fn age_field(history: &History, normalize_age: bool) -> FracGrid {
    let mut frac = accumulate(history);
    if normalize_age {
        normalize(&mut frac);
    }
    frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifehash_automata::{IVec2, LifeSimulation, Size};

    #[test]
    fn test_overlay_overwrites_alive_only() {
        let size = Size::square(2);
        let mut frac = FracGrid::filled(size, 0.25);
        let mut cells = CellGrid::new(size);
        cells.set(IVec2::new(1, 0), true);

        overlay(&mut frac, &cells, 0.75);
        assert_eq!(frac.values(), &[0.25, 0.75, 0.25, 0.25]);
    }

    #[test]
    fn test_blinker_weights() {
        // Two frames: horizontal then vertical blinker.
        let seed = [0, 0b0111_0000, 0, 0, 0, 0, 0, 0];
        let history = LifeSimulation::new(Size::square(8), &seed).run(50, |d| d.to_vec());
        assert_eq!(history.len(), 2);

        let frac = accumulate(&history);
        // Center is alive in both frames, so it carries the last weight.
        assert_eq!(*frac.get(IVec2::new(2, 1)), 1.0);
        // Horizontal arms only in frame 0.
        assert_eq!(*frac.get(IVec2::new(1, 1)), 0.5);
        // Vertical arms only in frame 1.
        assert_eq!(*frac.get(IVec2::new(2, 0)), 1.0);
        // Never alive.
        assert_eq!(*frac.get(IVec2::new(6, 6)), 0.0);
    }

    #[test]
    fn test_normalize_spans_unit_range() {
        let mut frac = FracGrid::from_vec(Size::square(2), vec![0.25, 0.5, 0.75, 0.5]).unwrap();
        normalize(&mut frac);
        assert_eq!(frac.values(), &[0.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn test_normalize_constant_field_unchanged() {
        let mut frac = FracGrid::filled(Size::square(3), 0.4);
        normalize(&mut frac);
        assert!(frac.values().iter().all(|&v| v == 0.4));

        let mut zero = FracGrid::new(Size::square(3));
        normalize(&mut zero);
        assert!(zero.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_age_field_skips_normalization() {
        let seed = [0, 0b0111_0000, 0, 0, 0, 0, 0, 0];
        let history = LifeSimulation::new(Size::square(8), &seed).run(50, |d| d.to_vec());
        let raw = age_field(&history, false);
        assert_eq!(raw, accumulate(&history));
        let normalized = age_field(&history, true);
        assert_eq!(*normalized.get(IVec2::new(1, 1)), 0.5);
        assert_eq!(*normalized.get(IVec2::new(6, 6)), 0.0);
    }
}

//! Color grids: the final symmetric grid plus debug views of intermediate grids.

use lifehash_automata::{CellGrid, ChangeGrid, IVec2};
use lifehash_color::{Color, ColorFunc};

use crate::age::FracGrid;
use crate::pattern::Pattern;

/// A grid of colors, ready for [`Image::from_color_grid`](crate::Image::from_color_grid).
pub type ColorGrid = lifehash_automata::ToroidalGrid<Color>;

/// Colors the age field through `gradient` and replicates it with `pattern`.
///
/// Cells no transform writes stay black.
pub fn color_grid(frac: &FracGrid, gradient: &ColorFunc, pattern: Pattern) -> ColorGrid {
    let mut grid = ColorGrid::new(pattern.target_size(frac.size()));
    let max = IVec2::new(grid.width() as i32 - 1, grid.height() as i32 - 1);

    for (point, &value) in frac.iter() {
        let color = gradient.apply(value);
        for transform in pattern.transforms() {
            grid.set(transform.apply(point, max), color);
        }
    }
    grid
}

/// Alive cells white, dead cells black.
pub fn cell_colors(cells: &CellGrid) -> ColorGrid {
    cells.map(|&alive| if alive { Color::WHITE } else { Color::BLACK })
}

/// Changed cells red, unchanged cells blue.
pub fn change_colors(changes: &ChangeGrid) -> ColorGrid {
    changes.map(|&changed| if changed { Color::RED } else { Color::BLUE })
}

/// Age values as grayscale.
pub fn age_colors(frac: &FracGrid) -> ColorGrid {
    frac.map(|&value| Color::BLACK.lerp_to(Color::WHITE, value))
}

//! Wrap-around 2D grids.

use glam::IVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width and height of a grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    pub const fn square(length: usize) -> Self {
        Self::new(length, length)
    }

    /// Total number of cells.
    pub const fn capacity(self) -> usize {
        self.width * self.height
    }

    /// Scales both dimensions by `factor`.
    pub const fn scaled(self, factor: usize) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// One entry of a Moore neighborhood: the offset from the center and the
/// wrapped position it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Offset relative to the center, each component in -1..=1.
    pub offset: IVec2,
    /// Wrapped grid position.
    pub position: IVec2,
}

/// Offsets of the 3x3 Moore neighborhood, center included, in row-major order.
const MOORE_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(0, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// A 2D grid whose edges wrap around.
///
/// Cells are stored row-major. Every coordinate is reduced modulo the grid
/// size, so lookups never go out of bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ToroidalGrid<T> {
    size: Size,
    cells: Vec<T>,
}

impl<T: Clone + Default> ToroidalGrid<T> {
    /// Creates a grid with every cell set to `T::default()`.
    pub fn new(size: Size) -> Self {
        Self::filled(size, T::default())
    }
}

impl<T: Clone> ToroidalGrid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(size: Size, value: T) -> Self {
        Self {
            size,
            cells: vec![value; size.capacity()],
        }
    }

    /// Sets every cell to `value`.
    pub fn set_all(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> ToroidalGrid<T> {
    /// Creates a grid from row-major cell values.
    ///
    /// Returns `None` if `cells.len()` does not match the size.
    pub fn from_vec(size: Size, cells: Vec<T>) -> Option<Self> {
        (cells.len() == size.capacity()).then_some(Self { size, cells })
    }

    /// Returns the grid size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Wraps a coordinate onto the torus.
    pub fn wrap(&self, point: IVec2) -> IVec2 {
        IVec2::new(
            circular_index(point.x, self.size.width),
            circular_index(point.y, self.size.height),
        )
    }

    fn offset(&self, point: IVec2) -> usize {
        let p = self.wrap(point);
        p.y as usize * self.size.width + p.x as usize
    }

    /// Gets the value at `point`, wrapping out-of-range coordinates.
    pub fn get(&self, point: IVec2) -> &T {
        &self.cells[self.offset(point)]
    }

    /// Sets the value at `point`, wrapping out-of-range coordinates.
    pub fn set(&mut self, point: IVec2, value: T) {
        let offset = self.offset(point);
        self.cells[offset] = value;
    }

    /// Returns all cell values in row-major order.
    pub fn values(&self) -> &[T] {
        &self.cells
    }

    /// Returns all cell values mutably, in row-major order.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterates over every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = IVec2> + use<T> {
        let Size { width, height } = self.size;
        (0..height).flat_map(move |y| (0..width).map(move |x| IVec2::new(x as i32, y as i32)))
    }

    /// Iterates over `(point, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &T)> {
        self.points().zip(self.cells.iter())
    }

    /// Returns the Moore neighborhood of `point`, center included.
    pub fn neighborhood(&self, point: IVec2) -> [Neighbor; 9] {
        MOORE_OFFSETS.map(|offset| Neighbor {
            offset,
            position: self.wrap(point + offset),
        })
    }

    /// Creates a new grid by applying `f` to every cell.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> ToroidalGrid<U> {
        ToroidalGrid {
            size: self.size,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

/// Reduces `index` into `0..modulus`.
fn circular_index(index: i32, modulus: usize) -> i32 {
    index.rem_euclid(modulus as i32)
}

//! A simple 2d grid type
//! Backed by the ndarray crate, stored row major so that a row of cells is contiguous
//! in memory, which is the order the simulation sweeps in.
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

use super::vectors::CellVector;

/// A simple 2d grid type
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T>(ndarray::Array2<T>);

/* =================
 * Initialization
 * ================= */
impl<T> Grid<T> {
    /// Create a new grid filled with one value
    pub fn new_fill(width: usize, height: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self(ndarray::Array2::from_elem((height, width), value))
    }
    /// Create a new grid with the given width and height, and fill it with default values
    pub fn new_empty(width: usize, height: usize) -> Self
    where
        T: Default,
    {
        Self(ndarray::Array2::from_shape_simple_fn((height, width), T::default))
    }
}

/* ======================================
 * Simple Getters
 * Access basic attributes of the struct
 * ====================================== */
impl<T> Grid<T> {
    /// Get the width of the grid, in columns
    pub fn get_width(&self) -> usize {
        self.0.ncols()
    }
    /// Get the height of the grid, in rows
    pub fn get_height(&self) -> usize {
        self.0.nrows()
    }
}

/// Defines when the user has simply exceeded the bounds of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} went outside the constraints of grid")]
pub struct GridOutOfBoundsError(pub CellVector);

/* ======================================
 * Position Based Getters
 * Access data at a position
 * ====================================== */
impl<T> Grid<T> {
    /// Whether or not the coordinate lies inside the grid
    pub fn in_bounds(&self, idx: CellVector) -> bool {
        self.to_ndarray_idx(idx).is_some()
    }
    /// Gets the value at the given coordinate
    /// Panics if the coordinate is out of bounds, use checked_get for user supplied coordinates
    pub fn get(&self, idx: CellVector) -> &T {
        &self.0[self.expect_ndarray_idx(idx)]
    }
    /// Gets the value at the given coordinate, or returns an error if the coordinate is out of bounds
    pub fn checked_get(&self, idx: CellVector) -> Result<&T, GridOutOfBoundsError> {
        match self.to_ndarray_idx(idx) {
            Some(coord) => Ok(&self.0[coord]),
            None => Err(GridOutOfBoundsError(idx)),
        }
    }
    /// Gets the value at the given coordinate, mutably
    pub fn get_mut(&mut self, idx: CellVector) -> &mut T {
        let coord = self.expect_ndarray_idx(idx);
        &mut self.0[coord]
    }
    /// Gets the value at the given coordinate mutably, or None if out of bounds
    pub fn checked_get_mut(&mut self, idx: CellVector) -> Option<&mut T> {
        let coord = self.to_ndarray_idx(idx)?;
        Some(&mut self.0[coord])
    }
    /// Sets the value at the given coordinate, overwriting the old value
    pub fn set(&mut self, idx: CellVector, value: T) {
        self.replace(idx, value);
    }
    /// Like set, but gives you ownership of the original value
    pub fn replace(&mut self, idx: CellVector, replacement: T) -> T {
        let coord = self.expect_ndarray_idx(idx);
        std::mem::replace(&mut self.0[coord], replacement)
    }
    /// Like replace, but returns an error instead of panicking when out of bounds
    pub fn checked_replace(
        &mut self,
        idx: CellVector,
        replacement: T,
    ) -> Result<T, GridOutOfBoundsError> {
        match self.to_ndarray_idx(idx) {
            Some(coord) => Ok(std::mem::replace(&mut self.0[coord], replacement)),
            None => Err(GridOutOfBoundsError(idx)),
        }
    }
    /// Transforms the coordinate to the ndarray coordinate system, None if it falls outside
    fn to_ndarray_idx(&self, idx: CellVector) -> Option<[usize; 2]> {
        let col = usize::try_from(idx.col).ok()?;
        let row = usize::try_from(idx.row).ok()?;
        if col < self.get_width() && row < self.get_height() {
            Some([row, col])
        } else {
            None
        }
    }
    /// Same as to_ndarray_idx but the caller guarantees the coordinate is valid
    fn expect_ndarray_idx(&self, idx: CellVector) -> [usize; 2] {
        debug_assert!(self.in_bounds(idx), "{} is out of bounds", idx);
        [idx.row as usize, idx.col as usize]
    }
}

/// Iteration
impl<T> Grid<T> {
    /// Get an iterator over the grid, row major
    pub fn iter(&self) -> ndarray::iter::Iter<'_, T, ndarray::Ix2> {
        self.0.iter()
    }

    /// Get a mutable iterator over the grid, row major
    pub fn iter_mut(&mut self) -> ndarray::iter::IterMut<'_, T, ndarray::Ix2> {
        self.0.iter_mut()
    }

    /// Iterate over every cell along with its coordinate, row major
    pub fn indexed_iter(&self) -> impl Iterator<Item = (CellVector, &T)> {
        self.0
            .indexed_iter()
            .map(|((row, col), value)| (CellVector::new(col as isize, row as isize), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let grid: Grid<u8> = Grid::new_empty(4, 3);
        assert_eq!(grid.get_width(), 4);
        assert_eq!(grid.get_height(), 3);
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut grid = Grid::new_fill(2, 3, 0);
        grid.set(CellVector::new(1, 0), 1);
        grid.set(CellVector::new(0, 1), 2);
        grid.set(CellVector::new(1, 2), 3);
        let values: Vec<_> = grid.iter().copied().collect();
        assert_eq!(values, vec![0, 1, 2, 0, 0, 3]);
    }

    #[test]
    fn test_iter_mut() {
        let mut grid = Grid::new_fill(2, 2, 1);
        for val in grid.iter_mut() {
            *val *= 2;
        }
        assert!(grid.iter().all(|v| *v == 2));
    }

    #[test]
    fn test_indexed_iter() {
        let mut grid = Grid::new_fill(3, 2, false);
        grid.set(CellVector::new(2, 1), true);
        let found: Vec<_> = grid
            .indexed_iter()
            .filter(|(_, v)| **v)
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(found, vec![CellVector::new(2, 1)]);
    }

    #[test]
    fn test_in_bounds() {
        let grid: Grid<u8> = Grid::new_empty(3, 3);
        assert!(grid.in_bounds(CellVector::new(0, 0)));
        assert!(grid.in_bounds(CellVector::new(2, 2)));
        assert!(!grid.in_bounds(CellVector::new(-1, 0)));
        assert!(!grid.in_bounds(CellVector::new(0, -1)));
        assert!(!grid.in_bounds(CellVector::new(3, 0)));
        assert!(!grid.in_bounds(CellVector::new(0, 3)));
    }

    #[test]
    fn test_checked_access() {
        let mut grid = Grid::new_fill(2, 2, 7);
        assert_eq!(grid.checked_get(CellVector::new(1, 1)), Ok(&7));
        let err = grid.checked_get(CellVector::new(2, 0)).unwrap_err();
        assert_eq!(err, GridOutOfBoundsError(CellVector::new(2, 0)));
        assert_eq!(grid.checked_replace(CellVector::new(0, 1), 9), Ok(7));
        assert_eq!(*grid.get(CellVector::new(0, 1)), 9);
        assert!(grid.checked_replace(CellVector::new(0, -1), 9).is_err());
        assert!(grid.checked_get_mut(CellVector::new(5, 5)).is_none());
    }
}

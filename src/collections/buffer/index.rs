//! Mapping between multi-dimensional coordinates and linear offsets, for row-major layouts stored
//! in a single buffer.
//!
//! These are pure functions; none of them check the coordinates against a shape. A zero column
//! (or row) count is a logic error and causes a division by zero in the inverse mappings.

/// Returns the linear index of (`row`, `col`) in a row-major layout with `ncols` columns.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::buffer::index::{coords_2d, index_2d};
/// assert_eq!(index_2d(2, 1, 4), 9);
/// assert_eq!(coords_2d(9, 4), (2, 1));
/// ```
pub const fn index_2d(row: usize, col: usize, ncols: usize) -> usize {
    row * ncols + col
}

/// Returns the (`row`, `col`) coordinates of `index` in a row-major layout with `ncols` columns.
///
/// # Panics
/// Panics if `ncols` is zero.
pub const fn coords_2d(index: usize, ncols: usize) -> (usize, usize) {
    (index / ncols, index % ncols)
}

/// Returns the linear index of (`depth`, `row`, `col`) in a layout of `nrows * ncols` planes.
///
/// # Examples
/// ```
/// # use buffer_lib::collections::buffer::index::{coords_3d, index_3d};
/// assert_eq!(index_3d(1, 2, 3, 3, 4), 23);
/// assert_eq!(coords_3d(23, 3, 4), (1, 2, 3));
/// ```
pub const fn index_3d(depth: usize, row: usize, col: usize, nrows: usize, ncols: usize) -> usize {
    depth * nrows * ncols + row * ncols + col
}

/// Returns the (`depth`, `row`, `col`) coordinates of `index` in a layout of `nrows * ncols`
/// planes.
///
/// # Panics
/// Panics if `nrows` or `ncols` is zero.
pub const fn coords_3d(index: usize, nrows: usize, ncols: usize) -> (usize, usize, usize) {
    let plane = nrows * ncols;
    let (row, col) = coords_2d(index % plane, ncols);
    (index / plane, row, col)
}

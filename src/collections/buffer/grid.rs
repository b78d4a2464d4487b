use std::fmt::{self, Debug, Formatter};

use super::Buffer;
use super::index::{coords_2d, index_2d};
use crate::alloc::{Allocator, Global};
use crate::error::{CapacityOverflow, GridError, IndexOutOfBounds, InvalidDimensions};

/// A fixed-size, two-dimensional grid of values stored row-major in a single [`Buffer`].
///
/// # Examples
/// ```
/// # use buffer_lib::collections::buffer::Grid;
/// let mut grid = Grid::new(2, 3, 0_u8).unwrap();
/// grid.set(1, 2, 7).unwrap();
/// assert_eq!(grid.row(1), Ok(&[0, 0, 7][..]));
/// assert!(grid.get(2, 0).is_err());
/// ```
pub struct Grid<T, A: Allocator = Global> {
    buf: Buffer<T, A>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Grid<T> {
    /// Creates a new `rows` by `cols` Grid, with every cell set to a clone of `fill`.
    ///
    /// # Errors
    /// Returns [`InvalidDimensions`] if either dimension is zero.
    ///
    /// # Panics
    /// Panics if the memory layout size exceeds [`isize::MAX`].
    #[track_caller]
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Grid<T>, InvalidDimensions> {
        match Grid::try_new_in(rows, cols, fill, Global) {
            Ok(grid) => Ok(grid),
            Err(GridError::InvalidDimensions(error)) => Err(error),
            Err(GridError::CapacityOverflow(error)) => panic!("{}", error),
            Err(GridError::Allocation(error)) => error.handle(),
        }
    }
}

impl<T: Clone, A: Allocator> Grid<T, A> {
    /// Creates a new `rows` by `cols` Grid allocated from `alloc`, with every cell set to a
    /// clone of `fill`.
    ///
    /// # Errors
    /// Returns an error if either dimension is zero, the size overflows or the allocation fails.
    #[track_caller]
    pub fn try_new_in(rows: usize, cols: usize, fill: T, alloc: A) -> Result<Grid<T, A>, GridError> {
        if rows == 0 || cols == 0 {
            return Err(InvalidDimensions { rows, cols }.into());
        }

        let size = rows.checked_mul(cols).ok_or(CapacityOverflow)?;
        let mut buf = Buffer::try_with_cap_in(size, alloc)?;
        for _ in 0..size {
            // SAFETY: buf was created with capacity for every cell.
            unsafe { buf.push_unchecked(fill.clone()) }
        }

        Ok(Grid { buf, rows, cols })
    }
}

impl<T, A: Allocator> Grid<T, A> {
    /// Returns the number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at (`row`, `col`).
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] for whichever coordinate is outside the Grid.
    pub fn get(&self, row: usize, col: usize) -> Result<&T, IndexOutOfBounds> {
        let index = self.index_of(row, col)?;
        self.buf.get(index)
    }

    /// Returns the cell at (`row`, `col`) mutably.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] for whichever coordinate is outside the Grid.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T, IndexOutOfBounds> {
        let index = self.index_of(row, col)?;
        self.buf.get_mut(index)
    }

    /// Replaces the cell at (`row`, `col`), returning the previous value.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] for whichever coordinate is outside the Grid.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<T, IndexOutOfBounds> {
        let index = self.index_of(row, col)?;
        self.buf.set(index, value)
    }

    /// Returns all cells in `row` as a slice.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `row >= rows`.
    pub fn row(&self, row: usize) -> Result<&[T], IndexOutOfBounds> {
        let start = self.index_of(row, 0)?;
        Ok(&self.buf[start..start + self.cols])
    }

    /// Returns the (`row`, `col`) coordinates of a linear index into [`Grid::as_buffer`].
    pub const fn coords(&self, index: usize) -> (usize, usize) {
        coords_2d(index, self.cols)
    }

    /// Returns the Buffer backing this Grid.
    pub const fn as_buffer(&self) -> &Buffer<T, A> {
        &self.buf
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, IndexOutOfBounds> {
        if row >= self.rows {
            Err(IndexOutOfBounds { index: row, len: self.rows })
        } else if col >= self.cols {
            Err(IndexOutOfBounds { index: col, len: self.cols })
        } else {
            Ok(index_2d(row, col, self.cols))
        }
    }
}

impl<T: Debug, A: Allocator> Debug for Grid<T, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in self.buf.chunks(self.cols) {
            list.entry(&row);
        }
        list.finish()
    }
}

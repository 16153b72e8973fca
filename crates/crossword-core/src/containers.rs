//! Grid-shaped containers.

use std::ops::{Index, IndexMut};

use crate::Position;

/// A rectangular, row-major container with one value per [`Position`].
///
/// # Examples
///
/// ```
/// use crossword_core::{Grid, Position};
///
/// let mut grid = Grid::filled(3, 2, 0_u32);
/// grid[Position::new(1, 2)] = 7;
///
/// assert_eq!(grid.width(), 3);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.get(Position::new(1, 2)), Some(&7));
/// assert_eq!(grid.get(Position::new(2, 0)), None);
/// assert_eq!(grid.positions().count(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: u8,
    height: u8,
    cells: Vec<T>,
}

/// Error returned when rows cannot form a rectangular [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ShapeError {
    /// A row's length differs from the first row's.
    #[display("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// The grid has more rows or columns than a [`Position`] can address.
    #[display("grid of {rows}x{cols} exceeds 255x255")]
    TooLarge {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
}

impl<T> Grid<T> {
    /// Creates a grid from rows of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::RaggedRow`] if the rows differ in length, or
    /// [`ShapeError::TooLarge`] if either dimension exceeds 255.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ShapeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let (Ok(h), Ok(w)) = (u8::try_from(height), u8::try_from(width)) else {
            return Err(ShapeError::TooLarge {
                rows: height,
                cols: width,
            });
        };

        let mut cells = Vec::with_capacity(height * width);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(ShapeError::RaggedRow {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            cells.extend(values);
        }
        Ok(Self {
            width: w,
            height: h,
            cells,
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.height && pos.col() < self.width
    }

    /// Returns the value at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.offset(pos).map(|i| &self.cells[i])
    }

    /// Returns the value at `pos` mutably, or `None` outside the grid.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.offset(pos).map(|i| &mut self.cells[i])
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl DoubleEndedIterator<Item = Position> + use<T> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Iterates over `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions().zip(&self.cells)
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(usize::from(self.width).max(1))
    }

    /// Builds a grid of the same shape by mapping every value.
    #[must_use]
    pub fn map<U>(&self, mut f: impl FnMut(Position, &T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.iter().map(|(pos, value)| f(pos, value)).collect(),
        }
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| usize::from(pos.row()) * usize::from(self.width) + usize::from(pos.col()))
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a `width` x `height` grid with every cell set to `value`.
    #[must_use]
    pub fn filled(width: u8, height: u8, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; usize::from(width) * usize::from(height)],
        }
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    fn index(&self, pos: Position) -> &T {
        self.get(pos)
            .unwrap_or_else(|| panic!("position {pos} outside {}x{} grid", self.height, self.width))
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    fn index_mut(&mut self, pos: Position) -> &mut T {
        let (height, width) = (self.height, self.width);
        self.get_mut(pos)
            .unwrap_or_else(|| panic!("position {pos} outside {height}x{width} grid"))
    }
}

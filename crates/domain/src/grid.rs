//! Grid — the rectangular table of HP deltas a traveler walks across.
//!
//! A [`Grid`] can only be obtained through validation, so every grid handed
//! to the [solver](crate::solver) has at least one row, at least one column,
//! no ragged rows, and few enough cells for `i64` intermediates to be exact.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest number of cells a grid may hold.
///
/// Any `i32` cell is accepted. With at most `2^24` cells a path visits fewer
/// than `2^25` cells, so a `need` value stays below `2^57`.
pub const MAX_CELLS: usize = 1 << 24;

/// Validated, immutable `rows × columns` grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i32>>", into = "Vec<Vec<i32>>")]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyGrid`] when there are no rows,
    /// [`ValidationError::EmptyRow`] for a zero-length row,
    /// [`ValidationError::RaggedRow`] when rows differ in length, and
    /// [`ValidationError::TooManyCells`] above [`MAX_CELLS`].
    pub fn new(rows: Vec<Vec<i32>>) -> Result<Self, ValidationError> {
        let first = rows.first().ok_or(ValidationError::EmptyGrid)?;
        let columns = first.len();

        for (index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(ValidationError::EmptyRow { row: index });
            }
            if row.len() != columns {
                return Err(ValidationError::RaggedRow {
                    row: index,
                    expected: columns,
                    found: row.len(),
                });
            }
        }

        let cells = rows.len().saturating_mul(columns);
        if cells > MAX_CELLS {
            return Err(ValidationError::TooManyCells {
                cells,
                max: MAX_CELLS,
            });
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Borrow one row.
    ///
    /// # Panics
    ///
    /// Panics when `row >= self.rows()`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[i32] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Iterate over rows from top to bottom.
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[i32]> + ExactSizeIterator {
        self.cells.chunks_exact(self.columns)
    }

    /// Copy back into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.iter_rows().map(<[i32]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<i32>>> for Grid {
    type Error = ValidationError;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<Grid> for Vec<Vec<i32>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

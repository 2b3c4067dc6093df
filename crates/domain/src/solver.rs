//! Minimum initial HP solver.
//!
//! `need(r, c)` is the HP required on entering cell `(r, c)` so that HP stays
//! at least 1 through the rest of the best right/down path:
//!
//! ```text
//! need(R-1, C-1) = max(1, 1 - grid[R-1][C-1])
//! need(r, c)     = max(1, min(need(r, c+1), need(r+1, c)) - grid[r][c])
//! ```
//!
//! where a missing neighbour (past the last row or column) is ignored. The
//! table is filled bottom-to-top, right-to-left, keeping a single row of
//! `need` values: when cell `(r, c)` is visited, `need[c]` still holds the
//! value from row `r + 1` and `need[c + 1]` already holds row `r`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Minimum HP a traveler must start with. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct MinHp(u64);

impl MinHp {
    /// The survival floor.
    pub const FLOOR: Self = Self(1);

    /// Wrap a raw value, rejecting zero.
    #[must_use]
    pub fn new(value: u64) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MinHp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raised when converting zero into a [`MinHp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("minimum HP must be at least 1")]
pub struct ZeroMinHp;

impl TryFrom<u64> for MinHp {
    type Error = ZeroMinHp;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ZeroMinHp)
    }
}

impl From<MinHp> for u64 {
    fn from(value: MinHp) -> Self {
        value.0
    }
}

/// Compute the minimum initial HP needed to cross `grid`.
///
/// Runs in `O(rows × columns)` time with one `columns`-long buffer. The grid
/// is only read.
#[must_use]
pub fn solve(grid: &Grid) -> MinHp {
    let columns = grid.columns();
    let mut need = vec![1_i64; columns];

    for (index, row) in grid.iter_rows().rev().enumerate() {
        let last_row = index == 0;
        for c in (0..columns).rev() {
            let last_column = c + 1 == columns;
            let next = match (last_row, last_column) {
                (true, true) => 1,
                (true, false) => need[c + 1],
                (false, true) => need[c],
                (false, false) => need[c].min(need[c + 1]),
            };
            need[c] = (next - i64::from(row[c])).max(1);
        }
    }

    // floored at 1 on every step, so the sign is always positive
    MinHp(need[0].unsigned_abs())
}

//! Dungeon record — one solved grid, as kept by the results store.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::id::RecordId;
use crate::solver::{self, MinHp};
use crate::time::{Timestamp, now};

/// A grid together with its computed minimum HP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonRecord {
    pub id: RecordId,
    #[serde(rename = "dungeon")]
    pub grid: Grid,
    #[serde(rename = "minimumHP")]
    pub minimum_hp: MinHp,
    pub rows: usize,
    pub columns: usize,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl DungeonRecord {
    /// Solve `grid` and stamp a fresh record with the current time.
    #[must_use]
    pub fn compute(grid: Grid) -> Self {
        Self::compute_at(grid, now())
    }

    /// Solve `grid` and stamp a fresh record with `created_at`.
    #[must_use]
    pub fn compute_at(grid: Grid, created_at: Timestamp) -> Self {
        Self {
            id: RecordId::new(),
            minimum_hp: solver::solve(&grid),
            rows: grid.rows(),
            columns: grid.columns(),
            grid,
            created_at,
        }
    }
}

//! Dungeon service — use-cases for solving grids and querying past results.

use dungeon_domain::error::{DungeonError, NotFoundError};
use dungeon_domain::filter::RecordFilter;
use dungeon_domain::grid::Grid;
use dungeon_domain::id::RecordId;
use dungeon_domain::record::DungeonRecord;
use dungeon_domain::solver::{self, MinHp};
use dungeon_domain::time::Timestamp;

use crate::ports::DungeonRecordRepository;

/// Application service for minimum-HP calculations and their history.
pub struct DungeonService<R> {
    repo: R,
}

impl<R: DungeonRecordRepository> DungeonService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validate `cells` and compute the minimum HP without storing anything.
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::Validation`] when the grid is empty, ragged,
    /// or too large.
    pub fn calculate(&self, cells: Vec<Vec<i32>>) -> Result<MinHp, DungeonError> {
        let grid = Grid::new(cells)?;
        Ok(solver::solve(&grid))
    }

    /// Validate `cells`, compute the minimum HP, and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::Validation`] for malformed grids, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, cells), fields(rows = cells.len()))]
    pub async fn calculate_and_save(
        &self,
        cells: Vec<Vec<i32>>,
    ) -> Result<DungeonRecord, DungeonError> {
        let grid = Grid::new(cells)?;
        let record = DungeonRecord::compute(grid);
        tracing::debug!(
            columns = record.columns,
            minimum_hp = %record.minimum_hp,
            "dungeon solved"
        );
        self.repo.save(record).await
    }

    /// List every stored result, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_results(&self) -> Result<Vec<DungeonRecord>, DungeonError> {
        self.repo.get_all().await
    }

    /// Look up a result by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::NotFound`] when no record with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_result(&self, id: RecordId) -> Result<DungeonRecord, DungeonError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "DungeonRecord",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Results for grids of exactly `rows × columns`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn results_by_dimensions(
        &self,
        rows: usize,
        columns: usize,
    ) -> Result<Vec<DungeonRecord>, DungeonError> {
        self.repo
            .find_by(RecordFilter::dimensions(rows, columns))
            .await
    }

    /// Results whose minimum HP equals `minimum_hp`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn results_by_minimum_hp(
        &self,
        minimum_hp: MinHp,
    ) -> Result<Vec<DungeonRecord>, DungeonError> {
        self.repo.find_by(RecordFilter::minimum_hp(minimum_hp)).await
    }

    /// Results created within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`DungeonError::Validation`] when `from > to`, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn results_between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<DungeonRecord>, DungeonError> {
        let filter = RecordFilter::created_between(from, to)?;
        self.repo.find_by(filter).await
    }

    /// Average minimum HP across grids of `rows × columns`, `None` if there are none.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn average_minimum_hp(
        &self,
        rows: usize,
        columns: usize,
    ) -> Result<Option<f64>, DungeonError> {
        self.repo
            .average_minimum_hp(RecordFilter::dimensions(rows, columns))
            .await
    }

    /// Total number of stored results.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_results(&self) -> Result<u64, DungeonError> {
        self.repo.count(RecordFilter::all()).await
    }
}

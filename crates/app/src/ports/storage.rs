//! Storage port — repository trait for calculation records.

use std::future::Future;

use dungeon_domain::error::DungeonError;
use dungeon_domain::filter::RecordFilter;
use dungeon_domain::id::RecordId;
use dungeon_domain::record::DungeonRecord;

/// Repository for persisting and querying [`DungeonRecord`]s.
///
/// Lists are ordered newest-first.
pub trait DungeonRecordRepository {
    /// Persist a new record.
    fn save(
        &self,
        record: DungeonRecord,
    ) -> impl Future<Output = Result<DungeonRecord, DungeonError>> + Send;

    /// Get a record by its unique identifier.
    fn get_by_id(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<DungeonRecord>, DungeonError>> + Send;

    /// Get every record.
    fn get_all(&self) -> impl Future<Output = Result<Vec<DungeonRecord>, DungeonError>> + Send;

    /// Get the records matching `filter`.
    fn find_by(
        &self,
        filter: RecordFilter,
    ) -> impl Future<Output = Result<Vec<DungeonRecord>, DungeonError>> + Send;

    /// Mean `minimum_hp` of the records matching `filter`, `None` when nothing matches.
    fn average_minimum_hp(
        &self,
        filter: RecordFilter,
    ) -> impl Future<Output = Result<Option<f64>, DungeonError>> + Send;

    /// Number of records matching `filter`.
    fn count(
        &self,
        filter: RecordFilter,
    ) -> impl Future<Output = Result<u64, DungeonError>> + Send;
}

//! `SQLite` implementation of [`DungeonRecordRepository`].

use std::str::FromStr;

use chrono::SecondsFormat;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use dungeon_app::ports::DungeonRecordRepository;
use dungeon_domain::error::DungeonError;
use dungeon_domain::filter::RecordFilter;
use dungeon_domain::grid::Grid;
use dungeon_domain::id::RecordId;
use dungeon_domain::record::DungeonRecord;
use dungeon_domain::solver::MinHp;
use dungeon_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(DungeonRecord);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<DungeonRecord> {
        value.map(|w| w.0)
    }
}

fn decode<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let dungeon_data: String = row.try_get("dungeon_data")?;
        let minimum_hp: i64 = row.try_get("minimum_hp")?;
        let rows: i64 = row.try_get("row_count")?;
        let columns: i64 = row.try_get("column_count")?;
        let created_at: String = row.try_get("created_at")?;

        let id = RecordId::from_str(&id).map_err(decode)?;
        let grid: Grid = serde_json::from_str(&dungeon_data).map_err(decode)?;
        let minimum_hp = u64::try_from(minimum_hp).map_err(decode)?;
        let minimum_hp = MinHp::try_from(minimum_hp).map_err(decode)?;
        let rows = usize::try_from(rows).map_err(decode)?;
        let columns = usize::try_from(columns).map_err(decode)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(decode)?
            .to_utc();

        Ok(Self(DungeonRecord {
            id,
            grid,
            minimum_hp,
            rows,
            columns,
            created_at,
        }))
    }
}

/// Fixed-width UTC form so text comparison orders like time.
fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Append one `AND` clause per criterion set on `filter`.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &RecordFilter) {
    builder.push(" WHERE 1 = 1");

    if let Some(rows) = filter.rows {
        builder
            .push(" AND row_count = ")
            .push_bind(usize_to_i64(rows));
    }
    if let Some(columns) = filter.columns {
        builder
            .push(" AND column_count = ")
            .push_bind(usize_to_i64(columns));
    }
    if let Some(minimum_hp) = filter.minimum_hp {
        builder
            .push(" AND minimum_hp = ")
            .push_bind(to_i64(minimum_hp.get()));
    }
    if let Some(from) = filter.created_from {
        builder
            .push(" AND created_at >= ")
            .push_bind(encode_timestamp(from));
    }
    if let Some(to) = filter.created_to {
        builder
            .push(" AND created_at <= ")
            .push_bind(encode_timestamp(to));
    }
}

const INSERT: &str = r"
    INSERT INTO dungeon_results (id, dungeon_data, minimum_hp, row_count, column_count, created_at)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM dungeon_results WHERE id = ?";
const SELECT: &str = "SELECT * FROM dungeon_results";
const SELECT_AVERAGE: &str = "SELECT AVG(minimum_hp) FROM dungeon_results";
const SELECT_COUNT: &str = "SELECT COUNT(*) FROM dungeon_results";
const NEWEST_FIRST: &str = " ORDER BY created_at DESC, rowid DESC";

/// `SQLite`-backed dungeon record repository.
pub struct SqliteDungeonRecordRepository {
    pool: SqlitePool,
}

impl SqliteDungeonRecordRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn select(&self, filter: &RecordFilter) -> Result<Vec<DungeonRecord>, DungeonError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT);
        push_filter(&mut builder, filter);
        builder.push(NEWEST_FIRST);

        let rows: Vec<Wrapper> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

impl DungeonRecordRepository for SqliteDungeonRecordRepository {
    async fn save(&self, record: DungeonRecord) -> Result<DungeonRecord, DungeonError> {
        let dungeon_data = serde_json::to_string(&record.grid).map_err(StorageError::from)?;

        sqlx::query(INSERT)
            .bind(record.id.to_string())
            .bind(&dungeon_data)
            .bind(to_i64(record.minimum_hp.get()))
            .bind(usize_to_i64(record.rows))
            .bind(usize_to_i64(record.columns))
            .bind(encode_timestamp(record.created_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(record)
    }

    async fn get_by_id(&self, id: RecordId) -> Result<Option<DungeonRecord>, DungeonError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<DungeonRecord>, DungeonError> {
        self.select(&RecordFilter::all()).await
    }

    async fn find_by(&self, filter: RecordFilter) -> Result<Vec<DungeonRecord>, DungeonError> {
        self.select(&filter).await
    }

    async fn average_minimum_hp(&self, filter: RecordFilter) -> Result<Option<f64>, DungeonError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_AVERAGE);
        push_filter(&mut builder, &filter);

        let average: Option<f64> = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(average)
    }

    async fn count(&self, filter: RecordFilter) -> Result<u64, DungeonError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COUNT);
        push_filter(&mut builder, &filter);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(count.unsigned_abs())
    }
}

//! Record filters used for lookups and aggregates.
//!
//! All set criteria must hold for a record to match. An empty filter
//! matches everything.

use crate::error::ValidationError;
use crate::record::DungeonRecord;
use crate::solver::MinHp;
use crate::time::Timestamp;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub minimum_hp: Option<MinHp>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `created_at`.
    pub created_to: Option<Timestamp>,
}

impl RecordFilter {
    /// Match every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match grids of exactly `rows × columns`.
    #[must_use]
    pub fn dimensions(rows: usize, columns: usize) -> Self {
        Self {
            rows: Some(rows),
            columns: Some(columns),
            ..Self::default()
        }
    }

    /// Match records whose result equals `minimum_hp`.
    #[must_use]
    pub fn minimum_hp(minimum_hp: MinHp) -> Self {
        Self {
            minimum_hp: Some(minimum_hp),
            ..Self::default()
        }
    }

    /// Match records created within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRange`] when `from > to`.
    pub fn created_between(from: Timestamp, to: Timestamp) -> Result<Self, ValidationError> {
        if from > to {
            return Err(ValidationError::InvalidRange);
        }
        Ok(Self {
            created_from: Some(from),
            created_to: Some(to),
            ..Self::default()
        })
    }

    /// Evaluate the filter against a record in memory.
    #[must_use]
    pub fn matches(&self, record: &DungeonRecord) -> bool {
        self.rows.is_none_or(|rows| record.rows == rows)
            && self.columns.is_none_or(|columns| record.columns == columns)
            && self.minimum_hp.is_none_or(|hp| record.minimum_hp == hp)
            && self.created_from.is_none_or(|from| record.created_at >= from)
            && self.created_to.is_none_or(|to| record.created_at <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use chrono::Duration;

    fn record(rows: Vec<Vec<i32>>) -> DungeonRecord {
        DungeonRecord::compute(Grid::new(rows).unwrap())
    }

    #[test]
    fn should_match_everything_when_empty() {
        let filter = RecordFilter::all();
        assert_eq!(filter, RecordFilter::default());
        assert!(filter.matches(&record(vec![vec![1]])));
    }

    #[test]
    fn should_match_on_dimensions() {
        let filter = RecordFilter::dimensions(2, 2);
        assert!(filter.matches(&record(vec![vec![-3, 5], vec![1, -4]])));
        assert!(!filter.matches(&record(vec![vec![-3, 5]])));
    }

    #[test]
    fn should_match_on_minimum_hp() {
        let filter = RecordFilter::minimum_hp(MinHp::new(6).unwrap());
        assert!(filter.matches(&record(vec![vec![-5]])));
        assert!(!filter.matches(&record(vec![vec![10]])));
    }

    #[test]
    fn should_match_inclusive_time_range() {
        let r = record(vec![vec![0]]);
        let exact = RecordFilter::created_between(r.created_at, r.created_at).unwrap();
        assert!(exact.matches(&r));

        let later = RecordFilter::created_between(
            r.created_at + Duration::seconds(1),
            r.created_at + Duration::seconds(2),
        )
        .unwrap();
        assert!(!later.matches(&r));
    }

    #[test]
    fn should_reject_inverted_range() {
        let now = crate::time::now();
        assert_eq!(
            RecordFilter::created_between(now, now - Duration::seconds(1)),
            Err(ValidationError::InvalidRange)
        );
    }
}

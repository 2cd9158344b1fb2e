//! The record table: the full, ordered leaderboard dataset.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Ordered sequence of [`Record`]s.
///
/// A table produced by [`append_and_rerank`](crate::ranking::append_and_rerank)
/// is sorted by rank and satisfies the competition-ranking invariant checked
/// by [`RecordTable::is_ranked`]. Tables built directly from records carry no
/// such guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps records in their current order.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Records in table order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the table, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if every rank equals one plus the number of records
    /// with a strictly smaller duration, and records appear in ascending
    /// rank order.
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        let ordered = self.records.windows(2).all(|w| w[0].rank <= w[1].rank);
        ordered
            && self.records.iter().all(|record| {
                let below = self
                    .records
                    .iter()
                    .filter(|other| other.duration_s < record.duration_s)
                    .count();
                usize::try_from(record.rank).is_ok_and(|rank| rank == below + 1)
            })
    }
}

impl FromIterator<Record> for RecordTable {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordTable {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

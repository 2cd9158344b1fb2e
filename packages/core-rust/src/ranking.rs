//! Competition ranking over a record table.
//!
//! Ranks are recomputed from scratch on every call: a record's rank is one
//! plus the number of records with a strictly smaller duration. Equal
//! durations share a rank and the following rank is skipped (10, 10, 20
//! rank as 1, 1, 3). The result depends only on the multiset of durations,
//! so reranking an already ranked table changes nothing.

use tracing::trace;

use crate::record::Record;
use crate::table::RecordTable;
use crate::validation::NewRecord;

/// Appends `new_record` (if any) and reranks the whole table.
///
/// The output is sorted ascending by rank. Records sharing a rank keep
/// their relative order from the input, with the new record last. The
/// input table is left untouched.
#[must_use]
pub fn append_and_rerank(table: &RecordTable, new_record: Option<NewRecord>) -> RecordTable {
    let mut records: Vec<Record> = table.records().to_vec();
    if let Some(new_record) = new_record {
        // Placeholder rank; overwritten below with every other record's.
        records.push(new_record.into_record(0));
    }

    let mut durations: Vec<u64> = records.iter().map(|r| r.duration_s).collect();
    durations.sort_unstable();

    for record in &mut records {
        record.rank = competition_rank(&durations, record.duration_s);
    }

    // `sort_by_key` is stable, which fixes the order among tied ranks.
    records.sort_by_key(|r| r.rank);

    trace!(records = records.len(), "reranked record table");
    RecordTable::from_records(records)
}

/// Reranks a table without adding anything.
#[must_use]
pub fn rerank(table: &RecordTable) -> RecordTable {
    append_and_rerank(table, None)
}

/// Rank of `duration_s` among `sorted_durations` (ascending).
///
/// Saturates at `u32::MAX`, far beyond any table this service holds.
#[must_use]
pub fn competition_rank(sorted_durations: &[u64], duration_s: u64) -> u32 {
    let below = sorted_durations.partition_point(|&d| d < duration_s);
    u32::try_from(below + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    use super::*;
    use crate::validation::RecordSubmission;

    fn new_record(name: &str, duration_s: u64) -> NewRecord {
        RecordSubmission {
            name: name.to_string(),
            datetime: "2024-06-01T08:00:00Z".to_string(),
            duration_s: i64::try_from(duration_s).unwrap(),
            avatar_url: None,
        }
        .validate()
        .unwrap()
    }

    /// Builds a table by appending each duration in turn, as the service does.
    fn table_of(durations: &[u64]) -> RecordTable {
        durations
            .iter()
            .enumerate()
            .fold(RecordTable::new(), |table, (i, &d)| {
                append_and_rerank(&table, Some(new_record(&format!("rider-{i}"), d)))
            })
    }

    /// Unranked table in the given order, with deliberately wrong ranks.
    fn raw_table(durations: &[u64]) -> RecordTable {
        durations
            .iter()
            .enumerate()
            .map(|(i, &d)| Record {
                rank: 99,
                name: format!("rider-{i}"),
                datetime: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
                duration_s: d,
                avatar_url: None,
            })
            .collect()
    }

    fn rank_of(table: &RecordTable, name: &str) -> u32 {
        table.iter().find(|r| r.name == name).unwrap().rank
    }

    #[test]
    fn empty_table_without_new_record_stays_empty() {
        let out = append_and_rerank(&RecordTable::new(), None);
        assert!(out.is_empty());
    }

    #[test]
    fn first_record_gets_rank_one() {
        let out = append_and_rerank(&RecordTable::new(), Some(new_record("solo", 0)));
        assert_eq!(out.len(), 1);
        assert_eq!(out.records()[0].rank, 1);
        assert_eq!(out.records()[0].duration_s, 0);
    }

    #[test]
    fn ties_share_the_lower_rank_and_skip_the_next() {
        let out = rerank(&raw_table(&[20, 10, 10]));
        let ranks: Vec<u32> = out.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3]);
    }

    #[test]
    fn all_equal_durations_rank_first() {
        let out = rerank(&raw_table(&[42, 42, 42, 42]));
        assert!(out.iter().all(|r| r.rank == 1));
    }

    #[test]
    fn appending_ranks_by_duration() {
        let table = table_of(&[50_000, 60_000, 30_044]);
        assert_eq!(rank_of(&table, "rider-0"), 2);
        assert_eq!(rank_of(&table, "rider-1"), 3);
        assert_eq!(rank_of(&table, "rider-2"), 1);
        assert!(table.is_ranked());
    }

    #[test]
    fn output_is_sorted_by_rank() {
        let table = table_of(&[60_000, 50_000, 72_300, 30_044, 80_000]);
        let durations: Vec<u64> = table.iter().map(|r| r.duration_s).collect();
        assert_eq!(durations, vec![30_044, 50_000, 60_000, 72_300, 80_000]);
        let ranks: Vec<u32> = table.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn tied_records_keep_append_order() {
        let table = table_of(&[10, 5, 10, 10]);
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["rider-1", "rider-0", "rider-2", "rider-3"]);
    }

    #[test]
    fn new_record_placed_after_existing_ties() {
        let table = table_of(&[10, 10]);
        let out = append_and_rerank(&table, Some(new_record("late", 10)));
        assert_eq!(out.records()[2].name, "late");
        assert!(out.iter().all(|r| r.rank == 1));
    }

    #[test]
    fn input_table_is_not_modified() {
        let table = raw_table(&[30, 10]);
        let before = table.clone();
        let _ = append_and_rerank(&table, Some(new_record("x", 20)));
        assert_eq!(table, before);
    }

    #[test]
    fn competition_rank_counts_strictly_smaller() {
        let sorted = [10, 10, 20, 30, 30];
        assert_eq!(competition_rank(&sorted, 10), 1);
        assert_eq!(competition_rank(&sorted, 20), 3);
        assert_eq!(competition_rank(&sorted, 30), 4);
        assert_eq!(competition_rank(&sorted, 5), 1);
        assert_eq!(competition_rank(&sorted, 31), 6);
    }

    proptest! {
        #[test]
        fn rerank_is_idempotent(durations in prop::collection::vec(0u64..500, 0..40)) {
            let once = rerank(&raw_table(&durations));
            let twice = rerank(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn reranked_tables_satisfy_the_invariant(
            durations in prop::collection::vec(0u64..500, 0..40),
        ) {
            prop_assert!(rerank(&raw_table(&durations)).is_ranked());
        }

        #[test]
        fn smaller_duration_never_ranks_worse(
            durations in prop::collection::vec(0u64..100, 1..40),
        ) {
            let table = rerank(&raw_table(&durations));
            for a in table.iter() {
                for b in table.iter() {
                    if a.duration_s < b.duration_s {
                        prop_assert!(a.rank <= b.rank);
                    }
                    if a.duration_s == b.duration_s {
                        prop_assert_eq!(a.rank, b.rank);
                    }
                }
            }
        }

        #[test]
        fn ranks_do_not_depend_on_insertion_order(
            durations in prop::collection::vec(0u64..50, 1..30),
        ) {
            let mut reversed = durations.clone();
            reversed.reverse();
            let forward: Vec<(u64, u32)> =
                rerank(&raw_table(&durations)).iter().map(|r| (r.duration_s, r.rank)).collect();
            let backward: Vec<(u64, u32)> =
                rerank(&raw_table(&reversed)).iter().map(|r| (r.duration_s, r.rank)).collect();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn appending_preserves_every_existing_record(
            durations in prop::collection::vec(0u64..1_000, 0..30),
            extra in 0u64..1_000,
        ) {
            let table = rerank(&raw_table(&durations));
            let out = append_and_rerank(&table, Some(new_record("extra", extra)));
            prop_assert_eq!(out.len(), table.len() + 1);
            for record in table.iter() {
                prop_assert!(out.iter().any(|r| r.name == record.name));
            }
        }
    }
}

//! Podium view: the top three ranks of a table.

use crate::table::RecordTable;

/// Highest rank that still places on the podium.
pub const PODIUM_MAX_RANK: u32 = 3;

/// Returns the records ranked `<= PODIUM_MAX_RANK`, in table order.
///
/// Ties can put more than three records on the podium.
#[must_use]
pub fn podium(table: &RecordTable) -> RecordTable {
    table
        .iter()
        .filter(|record| record.rank <= PODIUM_MAX_RANK)
        .cloned()
        .collect()
}

//! Order Extraction
//!
//! Reads the table after a drag, renumbers the visible sequence labels and
//! builds the id list sent to the server.

use crate::models::{OrderSnapshot, RowSnapshot};

/// A container of task rows, read in current display order
pub trait RowTable {
    /// Every row, pinned row included, in container order
    fn rows(&self) -> Vec<RowSnapshot>;

    /// Write the sequence label of the row at `position` (index into `rows()`)
    fn set_label(&self, position: usize, label: usize);
}

/// Rows that take part in ordering
pub fn orderable_count(rows: &[RowSnapshot]) -> usize {
    rows.iter().filter(|r| !r.pinned).count()
}

/// 1-based labels for every non-pinned row as `(position, label)` pairs.
/// Rows without an id still get a label.
pub fn renumber(rows: &[RowSnapshot]) -> Vec<(usize, usize)> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| !row.pinned)
        .enumerate()
        .map(|(label_idx, (position, _))| (position, label_idx + 1))
        .collect()
}

/// Ids of non-pinned rows in order; rows without an id are dropped
pub fn extract_order(rows: &[RowSnapshot]) -> OrderSnapshot {
    rows.iter()
        .filter(|row| !row.pinned)
        .filter_map(|row| row.resolved_id().map(str::to_string))
        .collect()
}

/// Renumber `table` and return its new order
pub fn apply_reorder(table: &impl RowTable) -> OrderSnapshot {
    let rows = table.rows();
    for (position, label) in renumber(&rows) {
        table.set_label(position, label);
    }
    extract_order(&rows)
}

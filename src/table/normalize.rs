//! Row normalization: the one place raw records get their whitespace
//! stripped. Values stay strings here; numeric interpretation belongs to the
//! estimation step.

use super::Row;

/// Trim every field name and value. Returns `None` when the row carries no
/// data at all, i.e. every value is empty after trimming. Field order is
/// preserved, and normalizing an already-normalized row is a no-op.
pub fn normalize_row(fields: Vec<(String, String)>) -> Option<Row> {
    let trimmed: Vec<(String, String)> = fields
        .into_iter()
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect();

    if trimmed.iter().all(|(_, value)| value.is_empty()) {
        return None;
    }
    Some(Row::new(trimmed))
}

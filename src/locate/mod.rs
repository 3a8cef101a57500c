//! Location extraction and resolution. The reference tables disagree on what
//! the location column is called, so both the catalog builder and the
//! resolver go through the same ordered alias list.

use std::collections::BTreeSet;

use crate::table::{Dataset, Row};

/// Field names that can carry the location key, in priority order. Matched
/// case-insensitively against row field names.
pub const LOCATION_FIELDS: [&str; 6] = ["District", "City", "Location", "State", "Region", "Place"];

/// The location value of a row, if it has one.
pub fn location_of(row: &Row) -> Option<&str> {
    row.lookup(&LOCATION_FIELDS)
}

/// Every distinct location name seen across the reference datasets.
/// Storage is case-preserving; iteration order is lexicographic.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    names: BTreeSet<String>,
}

impl LocationCatalog {
    pub fn from_datasets<'a, I>(datasets: I) -> Self
    where
        I: IntoIterator<Item = &'a Dataset>,
    {
        let mut names = BTreeSet::new();
        for dataset in datasets {
            for row in &dataset.rows {
                if let Some(name) = location_of(row) {
                    names.insert(name.to_string());
                }
            }
        }
        Self { names }
    }

    /// Location names in lexicographic ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, query: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(query))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Find the first row in `dataset` whose location matches `query`,
/// case-insensitively. Returns `None` on no match or an empty dataset;
/// resolution in one dataset never depends on the others.
pub fn resolve<'a>(dataset: &'a Dataset, query: &str) -> Option<&'a Row> {
    dataset
        .rows
        .iter()
        .find(|row| location_of(row).is_some_and(|loc| loc.eq_ignore_ascii_case(query)))
}

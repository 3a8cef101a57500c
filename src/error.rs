use thiserror::Error;

use crate::table::DatasetKind;

/// Terminal failure of reference-data loading. Individual source failures
/// degrade to empty datasets and are only logged; this fires when nothing
/// usable came back from any of the four sources.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "no locations found in any reference dataset; check that the data \
         source serves these files with a recognizable location column \
         (District/City/Location/State/Region/Place): {}",
        expected_sources().join(", ")
    )]
    NoLocationsFound,
}

fn expected_sources() -> Vec<&'static str> {
    DatasetKind::ALL.iter().map(|k| k.source_file()).collect()
}

/// Rejected project input. Estimation is skipped entirely; no partial report
/// is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a location must be selected")]
    MissingLocation,
    #[error("roof area must be a positive number of square meters")]
    InvalidRoofArea,
    #[error("occupant count must be at least one")]
    InvalidOccupants,
}

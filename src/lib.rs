//! Rainwater-harvesting assessment from loosely structured reference tables.
//!
//! Four tabular sources (rainfall, groundwater depth, soil type, aquifer
//! info) are fetched and normalized despite inconsistent schemas, a catalog
//! of selectable locations is extracted across them, and a fixed set of
//! formulas turns a resolved location plus project details into an
//! [`AssessmentReport`].

pub mod error;
pub mod estimate;
pub mod fetch;
pub mod locate;
pub mod report;
pub mod table;

pub use error::{LoadError, ValidationError};
pub use estimate::{
    AssessmentReport, EfficiencyTier, ProjectInput, ResolvedLocationData, RoofMaterial,
    StructureType,
};
pub use fetch::{load_reference_data, DataSource, ReferenceData};
pub use locate::LocationCatalog;
pub use table::{Dataset, DatasetKind, Row};

/// Validate the input, resolve its location in each reference dataset, and
/// compute the report. Resolution misses in individual datasets are not
/// errors; the engine substitutes defaults for those fields.
pub fn resolve_and_estimate(
    data: &ReferenceData,
    input: &ProjectInput,
) -> Result<AssessmentReport, ValidationError> {
    input.validate()?;

    let resolved = ResolvedLocationData {
        rainfall: locate::resolve(&data.rainfall, &input.location),
        groundwater: locate::resolve(&data.groundwater, &input.location),
        soil: locate::resolve(&data.soil, &input.location),
        aquifer: locate::resolve(&data.aquifer, &input.location),
    };

    Ok(estimate::estimate(&resolved, input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(kind: DatasetKind, text: &str) -> Dataset {
        Dataset::from_text(kind, text)
    }

    fn reference_data() -> ReferenceData {
        let rainfall = dataset(
            DatasetKind::Rainfall,
            "District,Annual_Rainfall_mm\nChennai,1400\nMadurai,850\n",
        );
        let groundwater = dataset(
            DatasetKind::Groundwater,
            "City,Groundwater_Depth_m\nChennai,8.2\n",
        );
        let soil = dataset(DatasetKind::Soil, "Location,Soil_Type\nChennai,Clay\n");
        let aquifer = dataset(
            DatasetKind::Aquifer,
            "Region,Principal_Aquifer,Recharge_Potential\nSalem,Charnockite,High\n",
        );
        let locations =
            LocationCatalog::from_datasets([&rainfall, &groundwater, &soil, &aquifer]);
        ReferenceData {
            rainfall,
            groundwater,
            soil,
            aquifer,
            locations,
        }
    }

    #[test]
    fn resolves_across_datasets_and_estimates() {
        let data = reference_data();
        let input = ProjectInput {
            location: "chennai".to_string(),
            roof_area_m2: 100.0,
            roof_material: RoofMaterial::Concrete,
            occupants: 4,
        };

        let report = resolve_and_estimate(&data, &input).unwrap();
        assert_eq!(report.annual_rainfall_mm, 1400.0);
        assert_eq!(report.groundwater_depth, "8.2");
        assert_eq!(report.soil_type, "Clay");
        // Chennai is absent from the aquifer table; those fields default.
        assert_eq!(report.aquifer, "unknown");
        assert_eq!(report.recharge_potential, "moderate");
    }

    #[test]
    fn location_only_in_one_dataset_still_yields_a_complete_report() {
        let data = reference_data();
        let input = ProjectInput {
            location: "Salem".to_string(),
            roof_area_m2: 80.0,
            roof_material: RoofMaterial::Tile,
            occupants: 3,
        };

        let report = resolve_and_estimate(&data, &input).unwrap();
        assert_eq!(report.aquifer, "Charnockite");
        assert_eq!(report.recharge_potential, "High");
        assert_eq!(report.groundwater_depth, "not available");
        assert_eq!(report.soil_type, "unknown");
        // Rainfall row missing too, so the default rate applies.
        assert_eq!(report.annual_rainfall_mm, 1000.0);
    }

    #[test]
    fn incomplete_input_is_rejected_before_estimation() {
        let data = reference_data();
        let input = ProjectInput {
            location: String::new(),
            roof_area_m2: 100.0,
            roof_material: RoofMaterial::Concrete,
            occupants: 4,
        };
        let err = resolve_and_estimate(&data, &input).unwrap_err();
        assert_eq!(err, ValidationError::MissingLocation);
    }

    #[test]
    fn reestimation_replaces_rather_than_merges() {
        let data = reference_data();
        let mut input = ProjectInput {
            location: "Chennai".to_string(),
            roof_area_m2: 100.0,
            roof_material: RoofMaterial::Concrete,
            occupants: 4,
        };

        let first = resolve_and_estimate(&data, &input).unwrap();
        input.roof_area_m2 = 200.0;
        let second = resolve_and_estimate(&data, &input).unwrap();
        assert!((second.harvest_liters - 2.0 * first.harvest_liters).abs() < 1e-9);
    }
}

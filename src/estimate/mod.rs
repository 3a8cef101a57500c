//! The estimation engine: a pure function from resolved reference rows plus
//! project input to a fixed-shape assessment report. All numeric
//! interpretation of the string-typed table values happens here, at the
//! boundary, never earlier.

use serde::Serialize;
use tracing::warn;

use crate::error::ValidationError;
use crate::table::Row;

/// Acceptable field names per logical value, in priority order. The
/// reference tables have no schema contract, so each value is probed through
/// its alias list (case-insensitive name match).
pub const RAINFALL_FIELDS: [&str; 4] = [
    "Annual_Rainfall_mm",
    "Annual Rainfall (mm)",
    "Rainfall",
    "Avg Annual Rainfall",
];
pub const GROUNDWATER_FIELDS: [&str; 4] = [
    "Groundwater_Depth_m",
    "Groundwater Depth (m)",
    "Depth to Water Table",
    "Depth",
];
pub const SOIL_FIELDS: [&str; 5] = ["Soil_Type", "Soil Type", "Dominant Soil", "Soil", "Type"];
pub const AQUIFER_FIELDS: [&str; 3] = ["Principal_Aquifer", "Principal Aquifer", "Aquifer"];
pub const RECHARGE_FIELDS: [&str; 3] = ["Recharge_Potential", "Recharge Potential", "Recharge"];

/// Assumed annual rainfall when the rainfall dataset has nothing usable for
/// the location.
const DEFAULT_RAINFALL_MM: f64 = 1000.0;

const DEFAULT_GROUNDWATER_DEPTH: &str = "not available";
const DEFAULT_SOIL_TYPE: &str = "unknown";
const DEFAULT_AQUIFER: &str = "unknown";
const DEFAULT_RECHARGE: &str = "moderate";

/// Per-m³ value of stored water used for the savings estimate.
const SAVINGS_PER_M3: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RoofMaterial {
    Concrete,
    Tile,
    Metal,
    Thatched,
    /// Anything the material table does not know; gets a generic coefficient.
    Other,
}

impl RoofMaterial {
    /// Parse a user-facing material name. Unknown names map to `Other`
    /// rather than failing, since the coefficient table has a default.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "concrete" => RoofMaterial::Concrete,
            "tile" => RoofMaterial::Tile,
            "metal" => RoofMaterial::Metal,
            "thatched" => RoofMaterial::Thatched,
            _ => RoofMaterial::Other,
        }
    }

    /// Fraction of incident rainfall assumed collectible from this roof.
    pub fn runoff_coefficient(self) -> f64 {
        match self {
            RoofMaterial::Concrete => 0.85,
            RoofMaterial::Tile => 0.75,
            RoofMaterial::Metal => 0.90,
            RoofMaterial::Thatched => 0.50,
            RoofMaterial::Other => 0.80,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RoofMaterial::Concrete => "Concrete",
            RoofMaterial::Tile => "Tile",
            RoofMaterial::Metal => "Metal",
            RoofMaterial::Thatched => "Thatched",
            RoofMaterial::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EfficiencyTier {
    Excellent,
    Good,
    Moderate,
}

impl EfficiencyTier {
    pub fn name(self) -> &'static str {
        match self {
            EfficiencyTier::Excellent => "Excellent",
            EfficiencyTier::Good => "Good",
            EfficiencyTier::Moderate => "Moderate",
        }
    }
}

/// Recommended recharge structure, sized by harvest volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StructureType {
    Pit,
    Trench,
    Shaft,
}

impl StructureType {
    pub fn name(self) -> &'static str {
        match self {
            StructureType::Pit => "Pit",
            StructureType::Trench => "Trench",
            StructureType::Shaft => "Shaft",
        }
    }
}

/// What the caller supplies for one assessment. Owned by the caller and
/// passed in per request; the engine keeps nothing.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectInput {
    pub location: String,
    pub roof_area_m2: f64,
    pub roof_material: RoofMaterial,
    pub occupants: u32,
}

impl ProjectInput {
    /// Reject incomplete input before any estimation runs. A zero occupant
    /// count in particular must never reach the per-occupant division.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.location.trim().is_empty() {
            return Err(ValidationError::MissingLocation);
        }
        if !(self.roof_area_m2 > 0.0) {
            return Err(ValidationError::InvalidRoofArea);
        }
        if self.occupants == 0 {
            return Err(ValidationError::InvalidOccupants);
        }
        Ok(())
    }
}

/// The location's row in each reference dataset, where one was found. The
/// four lookups are independent; any subset may be missing and the engine
/// falls back to defaults for those.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedLocationData<'a> {
    pub rainfall: Option<&'a Row>,
    pub groundwater: Option<&'a Row>,
    pub soil: Option<&'a Row>,
    pub aquifer: Option<&'a Row>,
}

/// Everything the display layer needs, derived once per request and not
/// mutated afterward.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub location: String,
    pub annual_rainfall_mm: f64,
    pub harvest_liters: f64,
    pub efficiency: EfficiencyTier,
    pub per_occupant_liters: f64,
    pub occupants: u32,
    pub roof_material: RoofMaterial,
    pub runoff_coefficient: f64,
    pub structure: StructureType,
    pub storage_m3: f64,
    pub groundwater_depth: String,
    pub soil_type: String,
    pub aquifer: String,
    pub recharge_potential: String,
    pub installation_cost: f64,
    pub annual_savings: f64,
    /// `None` means "not applicable" (savings were zero or negative).
    pub payback_years: Option<f64>,
}

/// Installation cost and structure type for a given harvest volume.
/// Exactly 50,000 L falls in the Trench band, exactly 200,000 L in Shaft.
fn sizing(harvest_liters: f64) -> (f64, StructureType) {
    if harvest_liters < 50_000.0 {
        (15_000.0, StructureType::Pit)
    } else if harvest_liters < 200_000.0 {
        (30_000.0, StructureType::Trench)
    } else {
        (50_000.0, StructureType::Shaft)
    }
}

fn efficiency(harvest_liters: f64) -> EfficiencyTier {
    if harvest_liters > 100_000.0 {
        EfficiencyTier::Excellent
    } else if harvest_liters > 50_000.0 {
        EfficiencyTier::Good
    } else {
        EfficiencyTier::Moderate
    }
}

/// Annual rainfall for the location. An unparseable value is logged and
/// treated the same as a missing one, rather than letting garbage flow into
/// the arithmetic.
fn rainfall_mm(row: Option<&Row>) -> f64 {
    let Some(raw) = row.and_then(|r| r.lookup(&RAINFALL_FIELDS)) else {
        return DEFAULT_RAINFALL_MM;
    };
    match raw.parse::<f64>() {
        Ok(mm) => mm,
        Err(_) => {
            warn!(value = raw, "unparseable rainfall value, using default");
            DEFAULT_RAINFALL_MM
        }
    }
}

fn text_field(row: Option<&Row>, aliases: &[&str], default: &str) -> String {
    row.and_then(|r| r.lookup(aliases))
        .unwrap_or(default)
        .to_string()
}

/// Compute the assessment report. Pure and deterministic: no I/O, no state.
/// `input` must already have passed [`ProjectInput::validate`].
pub fn estimate(resolved: &ResolvedLocationData, input: &ProjectInput) -> AssessmentReport {
    let rainfall = rainfall_mm(resolved.rainfall);
    let coefficient = input.roof_material.runoff_coefficient();

    // The 0.001 factor and the sizing thresholds are calibrated to each
    // other; change them together or not at all.
    let harvest = input.roof_area_m2 * rainfall * coefficient * 0.001;

    let (cost, structure) = sizing(harvest);
    let storage = harvest / 1000.0;
    let savings = storage * SAVINGS_PER_M3;
    let payback = (savings > 0.0).then(|| cost / savings);

    AssessmentReport {
        location: input.location.clone(),
        annual_rainfall_mm: rainfall,
        harvest_liters: harvest,
        efficiency: efficiency(harvest),
        per_occupant_liters: harvest / f64::from(input.occupants),
        occupants: input.occupants,
        roof_material: input.roof_material,
        runoff_coefficient: coefficient,
        structure,
        storage_m3: storage,
        groundwater_depth: text_field(
            resolved.groundwater,
            &GROUNDWATER_FIELDS,
            DEFAULT_GROUNDWATER_DEPTH,
        ),
        soil_type: text_field(resolved.soil, &SOIL_FIELDS, DEFAULT_SOIL_TYPE),
        aquifer: text_field(resolved.aquifer, &AQUIFER_FIELDS, DEFAULT_AQUIFER),
        recharge_potential: text_field(resolved.aquifer, &RECHARGE_FIELDS, DEFAULT_RECHARGE),
        installation_cost: cost,
        annual_savings: savings,
        payback_years: payback,
    }
}

//! Plain-text rendering of an assessment report. Consumes the report data
//! contract only; everything here is presentation.

use std::fmt::Write;

use crate::estimate::AssessmentReport;

pub fn render(report: &AssessmentReport) -> String {
    let mut out = String::new();

    // write! to a String cannot fail.
    let _ = writeln!(out, "Assessment Report: {}", report.location);
    let _ = writeln!(out);

    let _ = writeln!(out, "Harvest Analysis");
    let _ = writeln!(out, "  Annual Rainfall:    {} mm", report.annual_rainfall_mm);
    let _ = writeln!(out, "  Harvest Potential:  {} L/year", report.harvest_liters);
    let _ = writeln!(out, "  Efficiency Rating:  {}", report.efficiency.name());
    let _ = writeln!(
        out,
        "  Per Person Supply:  {:.0} L/year (for {} people)",
        report.per_occupant_liters, report.occupants
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Infrastructure");
    let _ = writeln!(out, "  Recommended Structure:  {}", report.structure.name());
    let _ = writeln!(out, "  Storage Volume:         {:.2} m³", report.storage_m3);
    let _ = writeln!(
        out,
        "  Roof Type:              {} ({:.0}% efficiency)",
        report.roof_material.name(),
        report.runoff_coefficient * 100.0
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "Local Conditions");
    let _ = writeln!(out, "  Groundwater Depth:   {} m", report.groundwater_depth);
    let _ = writeln!(out, "  Soil Type:           {}", report.soil_type);
    let _ = writeln!(out, "  Principal Aquifer:   {}", report.aquifer);
    let _ = writeln!(out, "  Recharge Potential:  {}", report.recharge_potential);
    let _ = writeln!(out);

    let _ = writeln!(out, "Economic Analysis");
    let _ = writeln!(out, "  Installation Cost:  ₹{}", report.installation_cost);
    let _ = writeln!(out, "  Annual Savings:     ₹{}", report.annual_savings);
    let payback = match report.payback_years {
        Some(years) => format!("{years:.2} years"),
        None => "not applicable".to_string(),
    };
    let _ = writeln!(out, "  Payback Period:     {payback}");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{EfficiencyTier, RoofMaterial, StructureType};

    fn sample() -> AssessmentReport {
        AssessmentReport {
            location: "Chennai".to_string(),
            annual_rainfall_mm: 1400.0,
            harvest_liters: 119.0,
            efficiency: EfficiencyTier::Moderate,
            per_occupant_liters: 29.75,
            occupants: 4,
            roof_material: RoofMaterial::Concrete,
            runoff_coefficient: 0.85,
            structure: StructureType::Pit,
            storage_m3: 0.119,
            groundwater_depth: "8.2".to_string(),
            soil_type: "Clay".to_string(),
            aquifer: "Alluvium".to_string(),
            recharge_potential: "High".to_string(),
            installation_cost: 15_000.0,
            annual_savings: 5.95,
            payback_years: None,
        }
    }

    #[test]
    fn renders_all_four_sections() {
        let text = render(&sample());
        assert!(text.contains("Assessment Report: Chennai"));
        assert!(text.contains("Harvest Analysis"));
        assert!(text.contains("Infrastructure"));
        assert!(text.contains("Local Conditions"));
        assert!(text.contains("Economic Analysis"));
        assert!(text.contains("Concrete (85% efficiency)"));
    }

    #[test]
    fn missing_payback_renders_as_not_applicable() {
        let text = render(&sample());
        assert!(text.contains("Payback Period:     not applicable"));

        let mut with_payback = sample();
        with_payback.payback_years = Some(2.52);
        assert!(render(&with_payback).contains("2.52 years"));
    }
}

//! Solar potential calculator.
//!
//! Pure arithmetic over the usable-area estimate. Malformed or missing
//! numbers never fail here; they coerce to zero and the degenerate result is
//! annotated instead.

use serde::{Deserialize, Serialize};

use crate::analysis::model::RooftopAnalysis;

/// Average residential panel footprint in square meters.
pub const PANEL_AREA_SQM: f64 = 1.7;
/// Average panel nameplate power in watts.
pub const PANEL_PEAK_POWER_W: f64 = 400.0;
/// Combined inverter/wiring/soiling/temperature loss factor.
pub const SYSTEM_DERATE: f64 = 0.85;
/// Location-independent approximation; flagged as such in the notes.
pub const AVG_PEAK_SUN_HOURS_PER_DAY: f64 = 4.5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolarPotential {
    pub estimated_dc_capacity_kw: f64,
    pub num_panels: u32,
    pub estimated_annual_production_kwh: f64,
    pub notes: Vec<String>,
}

impl SolarPotential {
    fn zero(notes: Vec<String>) -> Self {
        Self {
            estimated_dc_capacity_kw: 0.0,
            num_panels: 0,
            estimated_annual_production_kwh: 0.0,
            notes,
        }
    }
}

fn assumption_notes() -> Vec<String> {
    vec![
        format!("Assuming average panel size: {PANEL_AREA_SQM} sqm"),
        format!("Assuming average panel power: {PANEL_PEAK_POWER_W:.0} Wp"),
        format!(
            "Assuming overall system derate factor: {:.0}%",
            SYSTEM_DERATE * 100.0
        ),
        format!(
            "Assuming average peak sun hours per day: {AVG_PEAK_SUN_HOURS_PER_DAY} (location specific data needed for accuracy)"
        ),
    ]
}

/// Derive system sizing and annual production from the analysis.
pub fn calculate_solar_potential(analysis: Option<&RooftopAnalysis>) -> SolarPotential {
    let Some(analysis) = analysis else {
        return SolarPotential::zero(vec![
            "Vision analysis incomplete or missing usable area.".to_string(),
        ]);
    };

    let usable_area = analysis
        .total_estimated_usable_area_sqm
        .filter(|a| a.is_finite())
        .unwrap_or(0.0);

    let mut notes = assumption_notes();

    if usable_area <= 0.0 {
        notes.push("No usable solar area identified.".to_string());
        return SolarPotential::zero(notes);
    }

    let num_panels = (usable_area / PANEL_AREA_SQM).floor() as u32;
    let dc_capacity_kw = num_panels as f64 * PANEL_PEAK_POWER_W / 1000.0;
    let annual_production_kwh =
        dc_capacity_kw * AVG_PEAK_SUN_HOURS_PER_DAY * 365.0 * SYSTEM_DERATE;

    SolarPotential {
        estimated_dc_capacity_kw: round2(dc_capacity_kw),
        num_panels,
        estimated_annual_production_kwh: annual_production_kwh.round(),
        notes,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

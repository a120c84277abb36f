//! ROI estimator.
//!
//! Simple payback arithmetic with fixed national-average assumptions.
//! Savings are capped at the user's annual bill: excess production is not
//! monetized, and net-metering or export credits are deliberately out of
//! scope.

use serde::{Serialize, Serializer};

use crate::analysis::potential::SolarPotential;

/// Installed cost per DC watt, national average.
pub const COST_PER_WATT_USD: f64 = 2.8;
/// Average retail electricity price used to value production.
pub const ELECTRICITY_PRICE_PER_KWH_USD: f64 = 0.15;
/// Federal investment tax credit rate applied to gross cost.
pub const FEDERAL_ITC_RATE: f64 = 0.30;

/// Simple payback period, or `N/A` when annual savings are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaybackPeriod {
    Years(f64),
    NotApplicable,
}

impl Serialize for PaybackPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PaybackPeriod::Years(years) => serializer.serialize_f64(*years),
            PaybackPeriod::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

impl std::fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaybackPeriod::Years(years) => write!(f, "{years:.1}"),
            PaybackPeriod::NotApplicable => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoiEstimate {
    pub gross_system_cost_usd: f64,
    pub net_system_cost_after_itc_usd: f64,
    pub estimated_annual_savings_usd: f64,
    pub simple_payback_years: PaybackPeriod,
    pub notes: Vec<String>,
}

/// Estimate cost, savings, and payback for the sized system.
pub fn estimate_roi(potential: &SolarPotential, avg_monthly_bill_usd: f64) -> RoiEstimate {
    if potential.estimated_dc_capacity_kw <= 0.0 {
        return RoiEstimate {
            gross_system_cost_usd: 0.0,
            net_system_cost_after_itc_usd: 0.0,
            estimated_annual_savings_usd: 0.0,
            simple_payback_years: PaybackPeriod::NotApplicable,
            notes: vec![
                "Cannot calculate ROI without an estimated system capacity.".to_string(),
            ],
        };
    }

    let mut notes = vec![
        format!("Assuming installed cost per Watt: ${COST_PER_WATT_USD:.2}/Wp (DC)"),
        format!(
            "Using average electricity price: ${ELECTRICITY_PRICE_PER_KWH_USD:.2}/kWh for savings calculation (can be inaccurate, use local rates)"
        ),
        format!(
            "Assuming Federal Tax Credit (ITC): {:.0}% applies to system cost",
            FEDERAL_ITC_RATE * 100.0
        ),
    ];

    let monthly_bill = avg_monthly_bill_usd.max(0.0);
    let gross_cost = potential.estimated_dc_capacity_kw * 1000.0 * COST_PER_WATT_USD;
    let net_cost = gross_cost * (1.0 - FEDERAL_ITC_RATE);

    let annual_bill = monthly_bill * 12.0;
    let annual_savings = (potential.estimated_annual_production_kwh
        * ELECTRICITY_PRICE_PER_KWH_USD)
        .min(annual_bill);
    notes.push(format!(
        "Estimated annual savings are capped by your annual electricity bill of ${annual_bill:.0}."
    ));

    let payback = if annual_savings > 0.0 {
        PaybackPeriod::Years(round1(net_cost / annual_savings))
    } else {
        PaybackPeriod::NotApplicable
    };

    RoiEstimate {
        gross_system_cost_usd: gross_cost.round(),
        net_system_cost_after_itc_usd: net_cost.round(),
        estimated_annual_savings_usd: annual_savings.round(),
        simple_payback_years: payback,
        notes,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

//! The analysis pipeline: request construction, response extraction, and the
//! three-stage derivation (area -> capacity/production -> cost/savings).
//!
//! Client and extractor failures are terminal for a run. The calculators
//! never fail; insufficient upstream data degrades to zero results with
//! explanatory notes.

pub mod client;
pub mod error;
pub mod extract;
pub mod image;
pub mod model;
pub mod potential;
pub mod prompt;
pub mod recommend;
pub mod roi;

pub use client::{ImageSource, VisionClient};
pub use error::AnalysisError;
pub use extract::{extract_analysis, strip_code_fence};
pub use model::{RoofPlane, RooftopAnalysis};
pub use potential::{calculate_solar_potential, SolarPotential};
pub use prompt::analysis_prompt;
pub use recommend::generate_recommendations;
pub use roi::{estimate_roi, PaybackPeriod, RoiEstimate};

use serde::Serialize;
use tracing::debug;

/// Everything one analysis run produces. A value object: rebuilt wholesale
/// per request, never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub analysis: RooftopAnalysis,
    pub solar_potential: SolarPotential,
    pub roi_estimate: RoiEstimate,
    pub recommendations: Vec<String>,
    /// Full provider response, kept for debugging display.
    pub raw_response: serde_json::Value,
}

/// Run the whole pipeline for one image: vision call, extraction, then the
/// three calculators.
pub async fn run_pipeline(
    client: &VisionClient,
    source: &ImageSource,
    avg_monthly_bill_usd: f64,
) -> Result<AnalysisOutcome, AnalysisError> {
    let raw_response = client.analyze(source).await?;

    let analysis = match extract_analysis(&raw_response) {
        Ok(analysis) => analysis,
        Err(e) => {
            debug!("Extraction failed; raw response: {raw_response}");
            return Err(e);
        }
    };

    let solar_potential = calculate_solar_potential(Some(&analysis));
    let roi_estimate = estimate_roi(&solar_potential, avg_monthly_bill_usd);
    let recommendations = generate_recommendations(Some(&analysis), Some(&solar_potential));

    Ok(AnalysisOutcome {
        analysis,
        solar_potential,
        roi_estimate,
        recommendations,
        raw_response,
    })
}

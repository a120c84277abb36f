//! Recommendation generator.
//!
//! Maps the analysis and sizing results to an ordered list of guidance
//! strings. Order is fixed: suitability verdict, sizing, orientation, area,
//! conditional shading/obstruction warnings, then four closing items.

use crate::analysis::model::RooftopAnalysis;
use crate::analysis::potential::SolarPotential;

pub fn generate_recommendations(
    analysis: Option<&RooftopAnalysis>,
    potential: Option<&SolarPotential>,
) -> Vec<String> {
    let (Some(analysis), Some(potential)) = (analysis, potential) else {
        return vec!["Awaiting analysis results.".to_string()];
    };

    let mut recs = Vec::new();

    recs.push(match analysis.overall_suitability.trim().to_lowercase().as_str() {
        "high" => "✅ Rooftop appears highly suitable for solar installation.".to_string(),
        "medium" => {
            "⚠️ Rooftop appears moderately suitable. Some factors might need closer inspection."
                .to_string()
        }
        "low" => "❌ Rooftop appears to have low suitability. Significant challenges may exist."
            .to_string(),
        "not suitable" => {
            "⛔ Rooftop does not appear suitable for solar installation based on the image."
                .to_string()
        }
        _ => "ℹ️ Solar suitability assessment from the image is unclear or pending.".to_string(),
    });

    if potential.estimated_dc_capacity_kw > 0.0 {
        recs.push(format!(
            "Estimated system size: {:.2} kW DC, potentially using around {} panels.",
            potential.estimated_dc_capacity_kw, potential.num_panels
        ));
    } else {
        recs.push("No viable system size could be estimated from the usable area.".to_string());
    }

    if analysis.dominant_orientation.eq_ignore_ascii_case("unknown") {
        recs.push(
            "Roof orientation information is important; aim for south-facing in the Northern Hemisphere (or north-facing in the Southern Hemisphere)."
                .to_string(),
        );
    } else {
        recs.push(format!(
            "Dominant usable roof orientation appears to be: {}.",
            analysis.dominant_orientation
        ));
    }

    recs.push(format!(
        "Total estimated usable roof area for solar: {:.1} sqm.",
        analysis.total_estimated_usable_area_sqm.unwrap_or(0.0)
    ));

    let shading: Vec<String> = analysis
        .roof_planes
        .iter()
        .filter(|p| {
            matches!(
                p.shading_level.trim().to_lowercase().as_str(),
                "moderate" | "high"
            )
        })
        .map(|p| format!("Plane {} shows {} shading", p.id, p.shading_level))
        .collect();
    if !shading.is_empty() {
        recs.push(format!(
            "Shading concerns: {}. A detailed on-site shade analysis is crucial.",
            shading.join("; ")
        ));
    }

    let obstructions: Vec<String> = analysis
        .roof_planes
        .iter()
        .filter(|p| !p.obstructions.is_empty())
        .map(|p| format!("Plane {} has obstructions: {}", p.id, p.obstructions.join(", ")))
        .collect();
    if !obstructions.is_empty() {
        recs.push(format!(
            "Obstructions noted: {}. These may reduce usable area or require careful panel placement.",
            obstructions.join("; ")
        ));
    }

    recs.push(
        "Consider using high-efficiency monocrystalline panels for best performance in limited space."
            .to_string(),
    );
    recs.push("Obtain multiple quotes from certified local solar installers.".to_string());
    recs.push(
        "Verify local net metering policies, permitting requirements, and available incentives."
            .to_string(),
    );
    recs.push("A professional on-site survey is essential before making any decisions.".to_string());

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::calculate_solar_potential;
    use crate::analysis::model::RoofPlane;

    fn analysis(json: &str) -> RooftopAnalysis {
        serde_json::from_str(json).unwrap()
    }

    fn recommendations_for(json: &str) -> Vec<String> {
        let a = analysis(json);
        let p = calculate_solar_potential(Some(&a));
        generate_recommendations(Some(&a), Some(&p))
    }

    #[test]
    fn absent_inputs_yield_single_pending_line() {
        assert_eq!(
            generate_recommendations(None, None),
            vec!["Awaiting analysis results.".to_string()]
        );
    }

    #[test]
    fn verdict_matching_is_case_insensitive() {
        for (suitability, marker) in [
            ("High", "✅"),
            ("MEDIUM", "⚠️"),
            ("low", "❌"),
            ("Not Suitable", "⛔"),
            ("whatever", "ℹ️"),
        ] {
            let recs = recommendations_for(&format!(
                r#"{{"overall_suitability": "{suitability}"}}"#
            ));
            assert!(
                recs[0].starts_with(marker),
                "{suitability} should map to {marker}, got {}",
                recs[0]
            );
        }
    }

    #[test]
    fn order_is_stable_and_closing_advice_is_last() {
        let json = r#"{
            "overall_suitability": "High",
            "total_estimated_usable_area_sqm": 34.0,
            "dominant_orientation": "South",
            "roof_planes": [
                {"id": "plane_1", "shading_level": "High", "obstructions": ["chimney", "vent"]}
            ]
        }"#;
        let first = recommendations_for(json);
        let second = recommendations_for(json);
        assert_eq!(first, second);

        assert!(first[0].starts_with("✅"));
        assert!(first[1].starts_with("Estimated system size: 8.00 kW DC"));
        assert!(first[2].contains("South"));
        assert!(first[3].contains("34.0 sqm"));
        assert!(first[4].contains("Plane plane_1 shows High shading"));
        assert!(first[5].contains("chimney, vent"));

        let closing = &first[first.len() - 4..];
        assert!(closing[0].contains("monocrystalline"));
        assert!(closing[1].contains("multiple quotes"));
        assert!(closing[2].contains("net metering"));
        assert!(closing[3].contains("on-site survey"));
    }

    #[test]
    fn zero_capacity_reports_no_viable_system() {
        let recs = recommendations_for(r#"{"overall_suitability": "Low"}"#);
        assert_eq!(
            recs[1],
            "No viable system size could be estimated from the usable area."
        );
        // Unknown orientation produces the hemisphere reminder.
        assert!(recs[2].contains("Northern Hemisphere"));
        assert!(recs[3].contains("0.0 sqm"));
    }

    #[test]
    fn clean_roof_skips_conditional_warnings() {
        let json = r#"{
            "overall_suitability": "High",
            "total_estimated_usable_area_sqm": 20.0,
            "dominant_orientation": "South",
            "roof_planes": [
                {"id": "plane_1", "shading_level": "Low", "obstructions": []}
            ]
        }"#;
        let recs = recommendations_for(json);
        // verdict, sizing, orientation, area, four closing items
        assert_eq!(recs.len(), 8);
        assert!(!recs.iter().any(|r| r.contains("Shading concerns")));
        assert!(!recs.iter().any(|r| r.contains("Obstructions noted")));
    }

    #[test]
    fn shading_sentence_lists_every_affected_plane() {
        let a = RooftopAnalysis {
            roof_planes: vec![
                RoofPlane {
                    id: "plane_1".into(),
                    estimated_area_sqm: Some(10.0),
                    orientation: "South".into(),
                    shading_level: "Moderate".into(),
                    obstructions: vec![],
                },
                RoofPlane {
                    id: "plane_2".into(),
                    estimated_area_sqm: Some(12.0),
                    orientation: "West".into(),
                    shading_level: "High".into(),
                    obstructions: vec![],
                },
            ],
            ..serde_json::from_str("{}").unwrap()
        };
        let p = calculate_solar_potential(Some(&a));
        let recs = generate_recommendations(Some(&a), Some(&p));
        let shading = recs
            .iter()
            .find(|r| r.contains("Shading concerns"))
            .unwrap();
        assert!(shading.contains("plane_1 shows Moderate shading"));
        assert!(shading.contains("plane_2 shows High shading"));
    }
}

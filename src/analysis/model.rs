//! Structured rooftop analysis as returned by the vision model.
//!
//! The model output is loosely typed JSON, so every field deserializes
//! leniently: absent or null numbers become `None`, numeric strings are
//! parsed, absent enum-like strings default to `"Unknown"`, and unknown keys
//! are ignored. The coercion happens once here, at the extractor boundary,
//! so downstream calculators can assume fully-defaulted values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One distinct facet of a roof with its own orientation and shading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoofPlane {
    #[serde(default = "na", deserialize_with = "lenient_string")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub estimated_area_sqm: Option<f64>,

    #[serde(default = "unknown", deserialize_with = "lenient_string")]
    pub orientation: String,

    #[serde(default = "unknown", deserialize_with = "lenient_string")]
    pub shading_level: String,

    #[serde(default, deserialize_with = "lenient_strings")]
    pub obstructions: Vec<String>,
}

/// Full analysis of one rooftop image. Produced once per request by the
/// response extractor and immutable afterwards.
///
/// Invariant: `total_estimated_usable_area_sqm` is already restricted to
/// suitable planes by the model; consumers never re-filter by shading or
/// orientation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RooftopAnalysis {
    #[serde(default = "unknown", deserialize_with = "lenient_string")]
    pub overall_suitability: String,

    #[serde(default, deserialize_with = "lenient_planes")]
    pub roof_planes: Vec<RoofPlane>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_estimated_usable_area_sqm: Option<f64>,

    #[serde(default = "unknown", deserialize_with = "lenient_string")]
    pub dominant_orientation: String,

    /// Roof pitch in degrees; `None` covers both "Unknown" and absent.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub estimated_pitch_degrees: Option<f64>,

    #[serde(default = "unknown", deserialize_with = "lenient_string")]
    pub roof_material_guess: String,

    #[serde(default, deserialize_with = "lenient_string_or_empty")]
    pub general_comments: String,
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn na() -> String {
    "N/A".to_string()
}

/// Accepts a number, a numeric string, or anything else (-> `None`).
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

/// Accepts a string, stringifies scalars, and maps null to "Unknown".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_string(Option::<Value>::deserialize(deserializer)?).unwrap_or_else(unknown))
}

/// Like `lenient_string`, but null/absent maps to an empty string.
fn lenient_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce_string(Option::<Value>::deserialize(deserializer)?).unwrap_or_default())
}

/// Accepts a list with arbitrary scalar elements; non-lists become empty.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(coerce_string_owned).collect(),
        _ => Vec::new(),
    })
}

/// Accepts a list of plane objects; null or non-lists become empty, and
/// elements that are not objects are dropped.
fn lenient_planes<'de, D>(deserializer: D) -> Result<Vec<RoofPlane>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn coerce_string(value: Option<Value>) -> Option<String> {
    value.and_then(coerce_string_owned)
}

fn coerce_string_owned(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_analysis_round_trips() {
        let analysis: RooftopAnalysis = serde_json::from_str(
            r#"{
                "overall_suitability": "High",
                "roof_planes": [
                    {
                        "id": "plane_1",
                        "estimated_area_sqm": 25.5,
                        "orientation": "South",
                        "shading_level": "Low",
                        "obstructions": ["chimney"]
                    }
                ],
                "total_estimated_usable_area_sqm": 25.5,
                "dominant_orientation": "South",
                "estimated_pitch_degrees": 30,
                "roof_material_guess": "Asphalt Shingle",
                "general_comments": "Simple gable roof."
            }"#,
        )
        .unwrap();

        assert_eq!(analysis.overall_suitability, "High");
        assert_eq!(analysis.roof_planes.len(), 1);
        assert_eq!(analysis.roof_planes[0].estimated_area_sqm, Some(25.5));
        assert_eq!(analysis.total_estimated_usable_area_sqm, Some(25.5));
        assert_eq!(analysis.estimated_pitch_degrees, Some(30.0));
    }

    #[test]
    fn missing_fields_default_to_unknown() {
        let analysis: RooftopAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(analysis.overall_suitability, "Unknown");
        assert!(analysis.roof_planes.is_empty());
        assert_eq!(analysis.total_estimated_usable_area_sqm, None);
        assert_eq!(analysis.dominant_orientation, "Unknown");
        assert_eq!(analysis.estimated_pitch_degrees, None);
        assert_eq!(analysis.general_comments, "");
    }

    #[test]
    fn numeric_coercion_tolerates_junk() {
        let analysis: RooftopAnalysis = serde_json::from_str(
            r#"{"total_estimated_usable_area_sqm": null, "estimated_pitch_degrees": "Unknown"}"#,
        )
        .unwrap();
        assert_eq!(analysis.total_estimated_usable_area_sqm, None);
        assert_eq!(analysis.estimated_pitch_degrees, None);

        let analysis: RooftopAnalysis =
            serde_json::from_str(r#"{"total_estimated_usable_area_sqm": "42.5"}"#).unwrap();
        assert_eq!(analysis.total_estimated_usable_area_sqm, Some(42.5));

        let analysis: RooftopAnalysis =
            serde_json::from_str(r#"{"total_estimated_usable_area_sqm": "abc"}"#).unwrap();
        assert_eq!(analysis.total_estimated_usable_area_sqm, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let analysis: RooftopAnalysis = serde_json::from_str(
            r#"{"overall_suitability": "Medium", "confidence": 0.9, "extra": {"a": 1}}"#,
        )
        .unwrap();
        assert_eq!(analysis.overall_suitability, "Medium");
    }

    #[test]
    fn null_roof_planes_degrade_to_empty() {
        let analysis: RooftopAnalysis =
            serde_json::from_str(r#"{"roof_planes": null}"#).unwrap();
        assert!(analysis.roof_planes.is_empty());

        let analysis: RooftopAnalysis =
            serde_json::from_str(r#"{"roof_planes": [{"id": "p1"}, "garbage", 3]}"#).unwrap();
        assert_eq!(analysis.roof_planes.len(), 1);
        assert_eq!(analysis.roof_planes[0].id, "p1");
    }

    #[test]
    fn plane_obstructions_tolerate_non_strings() {
        let plane: RoofPlane = serde_json::from_str(
            r#"{"id": 7, "obstructions": ["chimney", 2, null], "shading_level": null}"#,
        )
        .unwrap();
        assert_eq!(plane.id, "7");
        assert_eq!(plane.obstructions, vec!["chimney".to_string(), "2".to_string()]);
        assert_eq!(plane.shading_level, "Unknown");
        assert_eq!(plane.estimated_area_sqm, None);
    }
}

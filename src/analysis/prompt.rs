//! Instruction text for the vision model.
//!
//! The response extractor depends on the model following this schema, so the
//! key names here must stay in sync with [`crate::analysis::model`].

pub fn analysis_prompt() -> &'static str {
    r#"Analyze the provided rooftop image. Your goal is to assess its solar potential.
Provide your analysis in a structured JSON format with the following keys:
- "overall_suitability": A rating ('High', 'Medium', 'Low', 'Not Suitable', 'Unknown').
- "roof_planes": A list of objects, where each object represents a distinct usable roof plane and has:
    - "id": A unique identifier (e.g., "plane_1").
    - "estimated_area_sqm": Approximate area in square meters (number).
    - "orientation": Estimated cardinal direction (e.g., "South", "South-West", "West", "Unknown").
    - "shading_level": Estimated shading ('None', 'Low', 'Moderate', 'High', 'Unknown').
    - "obstructions": A list of strings describing obstructions (e.g., ["chimney", "vent pipe"], or [] if none).
- "total_estimated_usable_area_sqm": Sum of 'estimated_area_sqm' from suitable 'roof_planes' (number).
- "dominant_orientation": The orientation with the largest usable area ('South', 'South-West', etc., or 'Unknown').
- "estimated_pitch_degrees": Approximate roof pitch in degrees (e.g., 20, 30, 0 for flat, 'Unknown').
- "roof_material_guess": A guess of the roof material (e.g., "Asphalt Shingle", "Tile", "Metal", "Flat Membrane", "Unknown").
- "general_comments": Any other relevant observations (e.g., "Complex roof geometry", "Large trees nearby to the west").

Guidelines:
- If you cannot determine some information, use "Unknown" for strings or null/0 for numbers where appropriate.
- Assume a standard residential solar panel is about 1.7m x 1m (1.7 sqm). Use this to help gauge areas.
- Focus only on the primary building in the image if multiple are present, or the largest roof structure.
- Be conservative with area estimates if the image quality is poor or parts of the roof are obscured.
- Prioritize south-facing (in the northern hemisphere) or north-facing (in the southern hemisphere) planes if not specified, but analyze all visible planes.
- "total_estimated_usable_area_sqm" should only include areas from planes deemed reasonably suitable (e.g., not heavily shaded, not facing directly away from the optimal direction unless it's a large flat roof).
"#
}

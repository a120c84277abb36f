//! Image input handling: byte sniffing for uploads, scheme validation for URLs.
//!
//! Unrecognized formats and extension-less URLs are passed through with a
//! warning rather than rejected; the upstream API may still accept them.

use tracing::warn;

use crate::analysis::AnalysisError;

/// Formats the vision API is known to handle well.
pub const SUPPORTED_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

const IMAGE_URL_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Detect the MIME type of raw image bytes.
pub fn sniff_mime(bytes: &[u8]) -> String {
    match infer::get(bytes) {
        Some(kind) => {
            let mime = kind.mime_type();
            if !SUPPORTED_MIME_TYPES.contains(&mime) {
                warn!("Image format {} may not be optimally supported. Trying anyway.", mime);
            }
            mime.to_string()
        }
        None => {
            warn!("Could not detect image format; defaulting to image/jpeg");
            "image/jpeg".to_string()
        }
    }
}

/// Validate a caller-supplied image URL.
///
/// Only the scheme is a hard requirement. A URL without a recognizable image
/// extension is still attempted, since indirect links sometimes resolve.
pub fn validate_image_url(url: &str) -> Result<(), AnalysisError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AnalysisError::InvalidInput(format!(
            "Image URL must start with http:// or https://: {url}"
        )));
    }

    let lower = url.to_lowercase();
    if !IMAGE_URL_EXTENSIONS.iter().any(|ext| lower.contains(ext)) {
        warn!("URL may not point to a direct image. If analysis fails, try a direct image link.");
    }

    Ok(())
}

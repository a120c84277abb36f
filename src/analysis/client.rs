//! Vision request client.
//!
//! Builds the single-turn multimodal request (prompt text + image reference)
//! and performs exactly one HTTP call against an OpenAI-compatible
//! chat-completions endpoint. No retries, no backoff: a slow or failing
//! upstream surfaces as one classified error.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::analysis::image::validate_image_url;
use crate::analysis::prompt::analysis_prompt;
use crate::analysis::AnalysisError;
use crate::config::ApiConfig;

/// Image input for one analysis request.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Raw bytes with a sniffed MIME type; sent inline as a data URI.
    Bytes { data: Vec<u8>, mime: String },
    /// Externally hosted image; the URL is passed through unchanged.
    Url(String),
}

pub struct VisionClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    api_key: String,
}

impl VisionClient {
    /// Resolves the credential before anything else; without one, no request
    /// is ever constructed.
    pub fn new(config: &ApiConfig, api_key: Option<String>) -> Result<Self, AnalysisError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&config.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or(AnalysisError::MissingCredential)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn image_part(&self, source: &ImageSource) -> Result<Value, AnalysisError> {
        let url = match source {
            ImageSource::Url(url) => {
                validate_image_url(url)?;
                url.clone()
            }
            ImageSource::Bytes { data, mime } => {
                format!("data:{};base64,{}", mime, STANDARD.encode(data))
            }
        };
        Ok(json!({ "type": "image_url", "image_url": { "url": url } }))
    }

    /// Send the rooftop image for analysis and return the decoded provider
    /// response body.
    pub async fn analyze(&self, source: &ImageSource) -> Result<Value, AnalysisError> {
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": analysis_prompt() },
                    self.image_part(source)?
                ]
            }],
            "max_tokens": self.max_tokens,
        });

        debug!("Vision request to {} with model {}", self.endpoint, self.model);

        let response = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("Vision API error {}: {}", status, text);
            return Err(AnalysisError::RequestFailed {
                status: Some(status.as_u16()),
                message: text,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|_| AnalysisError::ResponseMalformed(text))
    }
}

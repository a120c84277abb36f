use thiserror::Error;

/// Classified failures of the analysis pipeline.
///
/// Structural and transport problems are hard failures that abort the run.
/// Numeric gaps in otherwise-parseable analysis data are NOT errors; the
/// calculators coerce them to zero/`Unknown` and annotate the result instead.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("API credential is missing; set the configured key environment variable or pass --api-key")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API request failed: {message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    #[error("API returned a non-JSON body")]
    ResponseMalformed(String),

    #[error("API response contained no usable message content")]
    EmptyResponse,

    #[error("Could not parse analysis JSON from model output: {source}")]
    MalformedAnalysis {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AnalysisError::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw upstream text associated with the failure, for diagnostic display.
    pub fn raw_content(&self) -> Option<&str> {
        match self {
            AnalysisError::ResponseMalformed(body) => Some(body),
            AnalysisError::MalformedAnalysis { raw, .. } => Some(raw),
            AnalysisError::RequestFailed { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        AnalysisError::RequestFailed {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}

//! Model transport: prompt assembly and the Gemini analysis call.

pub mod gemini;
pub mod prompts;
pub mod types;

pub use gemini::analyze_coin;
pub use types::{AnalysisOptions, AnalysisRequest, AnalysisResponse, CoinDetails, GroundingSource};

/// Errors surfaced by the analysis call. Unlike the interactive
/// pipeline there is no fallback payload worth returning here: a failed
/// call means no report, so the caller gets the reason.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("no Gemini API key configured (set GEMINI_API_KEY or store one in the system keyring)")]
    MissingApiKey,

    #[error(transparent)]
    Image(#[from] crate::images::ImageError),

    #[error("request to Gemini failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned an empty response")]
    EmptyResponse,
}

impl LlmError {
    /// Map an error body to something actionable. An invalid key is by
    /// far the most common failure and deserves a plain explanation.
    pub(crate) fn from_api_body(status: u16, body: &str) -> Self {
        let message = if body.contains("API key not valid") || body.contains("API_KEY_INVALID") {
            "API key not valid. Check your GEMINI_API_KEY.".to_string()
        } else {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "no error body".to_string()
            } else {
                trimmed.chars().take(500).collect()
            }
        };
        LlmError::Api { status, message }
    }
}

//! Non-streaming Gemini call for coin analysis.
//!
//! - API key in URL query param, read from the environment
//! - Image parts as `inline_data` with base64 payloads
//! - Google Search tool attached only when sales data is requested
//! - Response text in `candidates[0].content.parts[*].text`
//! - Web sources in `candidates[0].groundingMetadata.groundingChunks`

use super::prompts::build_analysis_prompt;
use super::types::{AnalysisRequest, AnalysisResponse, GroundingSource};
use super::LlmError;
use std::time::Instant;

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Run the full analysis: build the prompt, post it with the image
/// payloads, and pull the report text and grounding sources out of the
/// response.
pub async fn analyze_coin(request: &AnalysisRequest) -> Result<AnalysisResponse, LlmError> {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => return Err(LlmError::MissingApiKey),
    };

    let prompt = build_analysis_prompt(
        &request.details,
        &request.options,
        request.language,
        request.reverse_image.is_some(),
    );

    let mut parts = vec![serde_json::json!({
        "inline_data": {
            "mime_type": request.primary_image.mime_type,
            "data": request.primary_image.data,
        }
    })];
    if let Some(reverse) = &request.reverse_image {
        parts.push(serde_json::json!({
            "inline_data": {
                "mime_type": reverse.mime_type,
                "data": reverse.data,
            }
        }));
    }
    parts.push(serde_json::json!({ "text": prompt }));

    let mut body = serde_json::json!({
        "contents": [{ "parts": parts }],
    });
    if request.options.recent_sales_data {
        log::info!("[LLM] Google Search tool enabled for sales data");
        body["tools"] = serde_json::json!([{ "googleSearch": {} }]);
    }

    log::info!("[LLM] Model: {}", GEMINI_MODEL);
    log::info!("[LLM] Prompt length: {} chars", prompt.len());
    log::info!(
        "[LLM] Image parts: {}",
        if request.reverse_image.is_some() { 2 } else { 1 }
    );

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
        GEMINI_MODEL, api_key
    );

    let start = Instant::now();
    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::error!("[LLM] Gemini API returned {}: {}", status, body);
        return Err(LlmError::from_api_body(status.as_u16(), &body));
    }

    let payload: serde_json::Value = response.json().await?;
    log::info!("[LLM] Response received in {}ms", start.elapsed().as_millis());

    let text = extract_response_text(&payload).ok_or(LlmError::EmptyResponse)?;
    let grounding_sources = collect_grounding_sources(&payload);

    log::info!("[LLM] Response length: {} chars", text.len());
    log::info!("[LLM] Grounding sources: {}", grounding_sources.len());

    Ok(AnalysisResponse {
        text,
        grounding_sources,
    })
}

/// Concatenate the text parts of the first candidate. Returns None when
/// no non-empty text came back (e.g. a safety block).
fn extract_response_text(payload: &serde_json::Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(chunk) = part.get("text").and_then(|t| t.as_str()) {
            text.push_str(chunk);
        }
    }
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Pull web grounding sources out of the first candidate's metadata.
/// Chunks without a `web` entry are skipped.
fn collect_grounding_sources(payload: &serde_json::Value) -> Vec<GroundingSource> {
    let chunks = payload
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("groundingMetadata"))
        .and_then(|m| m.get("groundingChunks"))
        .and_then(|c| c.as_array());

    let Some(chunks) = chunks else {
        return Vec::new();
    };

    chunks
        .iter()
        .filter_map(|chunk| chunk.get("web"))
        .filter_map(|web| {
            let uri = web.get("uri")?.as_str()?;
            let title = web
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("")
                .to_string();
            Some(GroundingSource {
                uri: resolve_grounding_uri(uri),
                title,
            })
        })
        .collect()
}

/// Grounded search results often arrive wrapped in a Google redirect.
/// Unwrap `google.com/url?url=...` down to the target so the report
/// links somewhere readable. Unparseable URIs pass through untouched.
fn resolve_grounding_uri(uri: &str) -> String {
    match reqwest::Url::parse(uri) {
        Ok(parsed) => {
            let is_google_redirect = parsed
                .host_str()
                .map(|h| h.contains("google.com"))
                .unwrap_or(false)
                && parsed.path() == "/url";
            if is_google_redirect {
                if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "url") {
                    return target.into_owned();
                }
            }
            uri.to_string()
        }
        Err(e) => {
            log::warn!("[LLM] Could not parse grounding source URI {}: {}", uri, e);
            uri.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_parts_are_concatenated() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "About Your Coin\n" },
                        { "text": "A 1943 steel cent." }
                    ]
                }
            }]
        });
        assert_eq!(
            extract_response_text(&payload).as_deref(),
            Some("About Your Coin\nA 1943 steel cent.")
        );
    }

    #[test]
    fn blank_or_missing_text_is_empty_response() {
        let payload = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "  \n" }] } }]
        });
        assert!(extract_response_text(&payload).is_none());
        assert!(extract_response_text(&serde_json::json!({})).is_none());
    }

    #[test]
    fn grounding_chunks_without_web_are_skipped() {
        let payload = serde_json::json!({
            "candidates": [{
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com/sale", "title": "Example Sale" } },
                        { "retrievedContext": { "uri": "gs://bucket/doc" } }
                    ]
                }
            }]
        });
        let sources = collect_grounding_sources(&payload);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].uri, "https://example.com/sale");
        assert_eq!(sources[0].title, "Example Sale");
    }

    #[test]
    fn missing_metadata_yields_no_sources() {
        assert!(collect_grounding_sources(&serde_json::json!({})).is_empty());
    }

    #[test]
    fn google_redirects_are_unwrapped() {
        let uri = "https://www.google.com/url?url=https%3A%2F%2Fwww.ebay.com%2Fitm%2F123&sa=U";
        assert_eq!(resolve_grounding_uri(uri), "https://www.ebay.com/itm/123");
    }

    #[test]
    fn plain_uris_pass_through() {
        let uri = "https://www.pcgs.com/coinfacts";
        assert_eq!(resolve_grounding_uri(uri), uri);
        // redirect path without a url param is left alone
        let uri = "https://www.google.com/url?sa=U";
        assert_eq!(resolve_grounding_uri(uri), uri);
    }
}

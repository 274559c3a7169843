use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::http::{self, ApiError};
use crate::services::lang;

const ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

pub struct TranslateConfig<'a> {
    pub api_key: &'a str,
    pub origin_language: &'a str,
    pub target_language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub translated_text: String,
    // Only present when the source was not given and Google detected it.
    pub detected_source_language: Option<String>,
}

#[derive(Deserialize)]
struct TranslationResponse {
    data: TranslationsData,
}

#[derive(Deserialize)]
struct TranslationsData {
    translations: Vec<TranslationItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationItem {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

// Omitting "source" puts the endpoint in detection mode, which is what
// the "Automatic" origin means.
fn build_request_body(text: &str, cfg: &TranslateConfig) -> Value {
    let origin = cfg.origin_language;
    if origin == "Automatic" || origin == "auto" || origin.is_empty() {
        json!({
            "q": text,
            "target": lang::google_code(cfg.target_language),
        })
    } else {
        json!({
            "q": text,
            "source": lang::google_code(origin),
            "target": lang::google_code(cfg.target_language),
        })
    }
}

pub fn translate(text: &str, cfg: &TranslateConfig) -> Result<TranslationOutcome, ApiError> {
    let url = format!("{ENDPOINT}?key={}", cfg.api_key);
    let body = build_request_body(text, cfg);
    let raw = http::post_json(&url, &body)?;
    parse_response(&raw)
}

fn parse_response(raw: &str) -> Result<TranslationOutcome, ApiError> {
    let response: TranslationResponse =
        serde_json::from_str(raw).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    let item = response
        .data
        .translations
        .into_iter()
        .next()
        .ok_or(ApiError::EmptyResult)?;

    // Google returns "&#39;" and friends inside translatedText.
    let decoded = html_escape::decode_html_entities(&item.translated_text).to_string();

    Ok(TranslationOutcome {
        translated_text: decoded,
        detected_source_language: item.detected_source_language,
    })
}

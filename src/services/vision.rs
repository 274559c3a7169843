use serde::Deserialize;
use serde_json::{json, Value};

use crate::services::http::{self, ApiError};
use crate::services::lang;

const ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrResult {
    pub text: String,
    // BCP-47-ish locale Vision attached to the page, when it did.
    pub locale: Option<String>,
}

// Vision autodetects Latin scripts well enough on its own; non-Latin
// origins get an explicit hint or kana/hangul comes back as garbage.
fn build_request_body(image_base64: &str, origin_language: &str) -> Value {
    if lang::uses_non_latin_script(origin_language) {
        json!({
            "requests": [{
                "image": { "content": image_base64 },
                "features": [{ "type": "TEXT_DETECTION" }],
                "imageContext": {
                    "languageHints": [lang::bcp47_code(origin_language)]
                }
            }]
        })
    } else {
        json!({
            "requests": [{
                "image": { "content": image_base64 },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        })
    }
}

#[derive(Deserialize)]
struct VisionResponse {
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    #[serde(default)]
    full_text_annotation: Option<FullTextAnnotation>,
}

// The first annotation covers the whole crop; the per-word ones that
// follow are never needed here.
#[derive(Deserialize)]
struct TextAnnotation {
    description: String,
    #[serde(default)]
    locale: Option<String>,
}

#[derive(Deserialize)]
struct FullTextAnnotation {
    text: String,
}

pub fn recognize(
    image_base64: &str,
    origin_language: &str,
    api_key: &str,
) -> Result<OcrResult, ApiError> {
    let url = format!("{ENDPOINT}?key={api_key}");
    let body = build_request_body(image_base64, origin_language);
    let raw = http::post_json(&url, &body)?;
    parse_response(&raw)
}

fn parse_response(raw: &str) -> Result<OcrResult, ApiError> {
    let response: VisionResponse =
        serde_json::from_str(raw).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    let annotated = response
        .responses
        .into_iter()
        .next()
        .ok_or(ApiError::EmptyResult)?;

    let locale = annotated
        .text_annotations
        .first()
        .and_then(|a| a.locale.clone());

    let text = match annotated.full_text_annotation {
        Some(full) => full.text,
        None => annotated
            .text_annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .unwrap_or_default(),
    };

    if text.trim().is_empty() {
        return Err(ApiError::EmptyResult);
    }

    Ok(OcrResult { text, locale })
}

use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::saved_sub::SavedSub;
use crate::services::memory::TranslationMemory;
use crate::services::translate::{self, TranslateConfig};
use crate::services::{scrub, vision};

const FOOTER_START: &str = "[Detected Source Language:";

pub struct PipelineConfig<'a> {
    pub api_key: &'a str,
    pub origin_language: &'a str,
    pub target_language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub record: SavedSub,
    // What the overlay actually renders.
    pub caption: String,
    pub from_memory: bool,
}

// Full capture-to-caption flow: recognize the crop, scrub the OCR noise,
// translate (memory first), and package the result as a history record.
pub fn run(
    image_base64: &str,
    cfg: &PipelineConfig,
    memory: &mut TranslationMemory,
) -> Result<PipelineOutcome, String> {
    let ocr = vision::recognize(image_base64, cfg.origin_language, cfg.api_key)
        .map_err(|e| e.to_string())?;

    let cleaned = scrub::clean_ocr_text(&ocr.text, cfg.origin_language);
    if cleaned.is_empty() {
        eprintln!("[pipeline] recognized text was all noise, nothing to translate");
        return Err("no subtitle text recognized".to_string());
    }

    translate_text(&cleaned, cfg, memory)
}

// Translation half of the pipeline, also reachable on its own when the
// GUI already has the text. The noise-truncation pass compares against
// the source text, so it runs on network results only; memory hits were
// already truncated when first recorded.
pub fn translate_text(
    text: &str,
    cfg: &PipelineConfig,
    memory: &mut TranslationMemory,
) -> Result<PipelineOutcome, String> {
    if let Some(hit) = memory.lookup(cfg.origin_language, cfg.target_language, text) {
        let record = build_record(text, &hit.translation, &hit.detected_source_language);
        let caption = format_caption(&record);
        return Ok(PipelineOutcome {
            record,
            caption,
            from_memory: true,
        });
    }

    let outcome = translate::translate(
        text,
        &TranslateConfig {
            api_key: cfg.api_key,
            origin_language: cfg.origin_language,
            target_language: cfg.target_language,
        },
    )
    .map_err(|e| e.to_string())?;

    let translated = scrub::truncate_translation(text, &outcome.translated_text);
    let detected = outcome.detected_source_language.unwrap_or_default();

    memory.record(
        cfg.origin_language,
        cfg.target_language,
        text,
        &translated,
        &detected,
    );

    let record = build_record(text, &translated, &detected);
    let caption = format_caption(&record);

    Ok(PipelineOutcome {
        record,
        caption,
        from_memory: false,
    })
}

pub fn format_caption(record: &SavedSub) -> String {
    let mut caption = record.translated_text.clone();
    if !record.detected_source_language.is_empty() {
        caption.push('\n');
        caption.push_str(&format!(
            "{FOOTER_START} {}]",
            record.detected_source_language
        ));
    }
    caption
}

fn build_record(original: &str, translated: &str, detected: &str) -> SavedSub {
    SavedSub {
        original_text: original.to_string(),
        translated_text: translated.to_string(),
        detected_source_language: detected.to_string(),
        timestamp: now_millis(),
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

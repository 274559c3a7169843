use regex::Regex;

use crate::services::lang;

// Cleans raw OCR output of a subtitle crop. The capture region still picks
// up player chrome: watermarks, episode counters, the timeline clock. Rules:
// - leading junk lines are skipped entirely;
// - a "mm:ss" line is the player timeline, and everything after it is UI;
// - inside the subtitle, junk lines are dropped (and when followed by a
//   blank line, the blank is consumed with them);
// - '|' is the classic OCR misread of 'I'.
pub fn clean_ocr_text(text: &str, origin_language: &str) -> String {
    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();
    let mut result = String::new();

    let mut i = 0;
    while i < lines.len() && (lines[i].is_empty() || line_is_noise(lines[i], origin_language)) {
        i += 1;
    }

    while i < lines.len() && !is_timeline_stamp(lines[i]) {
        if !line_is_noise(lines[i], origin_language) {
            result.push_str(&lines[i].replace('|', "I"));
            result.push('\n');
        } else if i + 1 < lines.len() && lines[i + 1].is_empty() {
            i += 1;
        }
        i += 1;
    }

    result.trim_end().to_string()
}

fn line_is_noise(line: &str, origin_language: &str) -> bool {
    line.chars().any(|c| matches!(c, '©' | '®' | '™' | '&'))
        || line.chars().all(|c| c.is_numeric())
        || !has_expected_letters(line, origin_language)
        || (line.len() < 5 && !ends_like_a_sentence(line))
}

// With a known origin language, a subtitle line must contain at least one
// character of that language's script; "Automatic" accepts any letter.
fn has_expected_letters(line: &str, origin_language: &str) -> bool {
    if origin_language == "Automatic" {
        line.chars().any(|c| c.is_alphabetic())
    } else {
        let is_script = lang::script_matcher(origin_language);
        line.chars().any(is_script)
    }
}

fn ends_like_a_sentence(line: &str) -> bool {
    line.ends_with('.') || line.ends_with('!') || line.ends_with('?') || line.ends_with(':')
}

fn is_timeline_stamp(line: &str) -> bool {
    let re = Regex::new(r"^\d{2}:\d{2}$").unwrap();
    re.is_match(line) && line.split(':').all(|part| part.parse::<u32>().is_ok())
}

// Untranslatable OCR garbage survives translation verbatim. A run of four
// translated words that all appear in the source text marks where the
// garbage starts; everything from the beginning of that run is cut.
pub fn truncate_translation(untranslated: &str, translated: &str) -> String {
    const RUN_LIMIT: usize = 4;

    let source_words: Vec<&str> = untranslated.split_whitespace().collect();
    let mut run = 0;
    let mut result = String::new();

    for word in translated.split_whitespace() {
        if source_words.contains(&word) {
            run += 1;
            if run < RUN_LIMIT {
                result.push_str(word);
                result.push(' ');
            } else {
                // The run's first RUN_LIMIT - 1 words were already emitted.
                for _ in 0..(RUN_LIMIT - 1) {
                    if let Some(last) = result.split_whitespace().next_back() {
                        result.truncate(result.len() - last.len() - 1);
                    }
                }
                return result.trim_end().to_string();
            }
        } else {
            run = 0;
            result.push_str(word);
            result.push(' ');
        }
    }

    result.trim_end().to_string()
}

// Language handling for the overlay: the UI works with display names
// ("French"), the Google endpoints want ISO codes ("fr") or BCP-47 tags
// ("fr-FR"). Unknown names fall back the same way the UI choice list does.

pub const LANGUAGES: &[&str] = &[
    "Automatic",
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Dutch",
    "Portuguese",
    "Russian",
    "Japanese",
    "Chinese",
    "Chinese Traditional",
    "Korean",
    "Arabic",
    "Turkish",
    "Polish",
    "Swedish",
    "Danish",
    "Finnish",
    "Norwegian",
    "Greek",
    "Hebrew",
    "Indonesian",
    "Ukrainian",
    "Thai",
    "Czech",
    "Hindi",
    "Bengali",
    "Croatian",
    "Hungarian",
    "Malay",
    "Romanian",
    "Slovak",
    "Vietnamese",
    "Catalan",
    "Filipino",
];

pub fn google_code(lang: &str) -> &'static str {
    match lang {
        "Automatic" => "auto",
        "English" => "en",
        "Spanish" => "es",
        "French" => "fr",
        "German" => "de",
        "Italian" => "it",
        "Dutch" => "nl",
        "Portuguese" => "pt",
        "Russian" => "ru",
        "Japanese" => "ja",
        "Chinese" => "zh",
        "Chinese Traditional" => "zh-TW",
        "Korean" => "ko",
        "Arabic" => "ar",
        "Turkish" => "tr",
        "Polish" => "pl",
        "Swedish" => "sv",
        "Danish" => "da",
        "Finnish" => "fi",
        "Norwegian" => "no",
        "Greek" => "el",
        "Hebrew" => "he",
        "Indonesian" => "id",
        "Ukrainian" => "uk",
        "Thai" => "th",
        "Czech" => "cs",
        "Hindi" => "hi",
        "Bengali" => "bn",
        "Croatian" => "hr",
        "Hungarian" => "hu",
        "Malay" => "ms",
        "Romanian" => "ro",
        "Slovak" => "sk",
        "Vietnamese" => "vi",
        "Catalan" => "ca",
        "Filipino" => "fil",
        _ => "en",
    }
}

// BCP-47 tags are only needed as OCR language hints; "Automatic" has no
// tag, which the caller treats as "send no hint".
pub fn bcp47_code(lang: &str) -> &'static str {
    match lang {
        "English" => "en-US",
        "Spanish" => "es-ES",
        "French" => "fr-FR",
        "German" => "de-DE",
        "Italian" => "it-IT",
        "Dutch" => "nl-NL",
        "Portuguese" => "pt-PT",
        "Russian" => "ru-RU",
        "Japanese" => "ja-JP",
        "Chinese" => "zh-CN",
        "Chinese Traditional" => "zh-TW",
        "Korean" => "ko-KR",
        "Arabic" => "ar-SA",
        "Turkish" => "tr-TR",
        "Polish" => "pl-PL",
        "Swedish" => "sv-SE",
        "Danish" => "da-DK",
        "Finnish" => "fi-FI",
        "Norwegian" => "nb-NO",
        "Greek" => "el-GR",
        "Hebrew" => "he-IL",
        "Indonesian" => "id-ID",
        "Ukrainian" => "uk-UA",
        "Thai" => "th-TH",
        "Czech" => "cs-CZ",
        "Hindi" => "hi-IN",
        "Bengali" => "bn-IN",
        "Croatian" => "hr-HR",
        "Hungarian" => "hu-HU",
        "Malay" => "ms-MY",
        "Romanian" => "ro-RO",
        "Slovak" => "sk-SK",
        "Vietnamese" => "vi-VN",
        "Catalan" => "ca-ES",
        "Filipino" => "fil-PH",
        _ => "",
    }
}

// OCR on subtitles misreads enough that latin-script heuristics mangle
// CJK and RTL text; these languages get script-aware scrubbing and an
// explicit language hint on the Vision request.
pub fn uses_non_latin_script(lang: &str) -> bool {
    matches!(
        lang,
        "Chinese"
            | "Chinese Traditional"
            | "Japanese"
            | "Korean"
            | "Russian"
            | "Arabic"
            | "Greek"
            | "Hebrew"
            | "Ukrainian"
            | "Hindi"
            | "Bengali"
    )
}

// Picks the character class a recognized line must contain to count as
// subtitle text rather than UI chrome picked up by the capture.
pub fn script_matcher(lang: &str) -> fn(char) -> bool {
    match lang {
        "Chinese" | "Chinese Traditional" => is_chinese,
        "Japanese" => is_japanese,
        "Korean" => is_korean,
        "Russian" | "Ukrainian" => is_cyrillic,
        "Greek" => is_greek,
        "Arabic" => is_arabic,
        "Hebrew" => is_hebrew,
        "Hindi" => is_devanagari,
        "Bengali" => is_bengali,
        _ => is_extended_latin,
    }
}

fn is_chinese(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
}

fn is_japanese(c: char) -> bool {
    // Kana plus the Han ranges shared with Chinese.
    ('\u{3040}'..='\u{30FF}').contains(&c) || is_chinese(c)
}

fn is_korean(c: char) -> bool {
    ('\u{AC00}'..='\u{D7AF}').contains(&c)
}

fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{052F}').contains(&c)
}

fn is_greek(c: char) -> bool {
    ('\u{0370}'..='\u{03FF}').contains(&c) || ('\u{1F00}'..='\u{1FFF}').contains(&c)
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c) || ('\u{0750}'..='\u{077F}').contains(&c)
}

fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

fn is_bengali(c: char) -> bool {
    ('\u{0980}'..='\u{09FF}').contains(&c)
}

fn is_extended_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{00C0}'..='\u{024F}').contains(&c)
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_codes_for_known_languages() {
        assert_eq!(google_code("Automatic"), "auto");
        assert_eq!(google_code("French"), "fr");
        assert_eq!(google_code("Filipino"), "fil");
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(google_code("Klingon"), "en");
    }

    #[test]
    fn bcp47_has_no_tag_for_automatic() {
        assert_eq!(bcp47_code("Automatic"), "");
        assert_eq!(bcp47_code("Japanese"), "ja-JP");
    }

    #[test]
    fn every_listed_language_has_a_google_code() {
        for lang in LANGUAGES {
            assert!(!google_code(lang).is_empty(), "no code for {lang}");
        }
    }

    #[test]
    fn script_matchers_accept_their_script() {
        assert!(script_matcher("Japanese")('す'));
        assert!(script_matcher("Japanese")('漢'));
        assert!(script_matcher("Korean")('한'));
        assert!(script_matcher("Russian")('д'));
        assert!(script_matcher("Greek")('λ'));
        assert!(script_matcher("Arabic")('ب'));
        assert!(script_matcher("Hebrew")('ש'));
        assert!(script_matcher("Hindi")('क'));
        assert!(script_matcher("Bengali")('ক'));
        assert!(script_matcher("English")('é'));
    }

    #[test]
    fn script_matchers_reject_other_scripts() {
        assert!(!script_matcher("Korean")('a'));
        assert!(!script_matcher("English")('한'));
        assert!(!script_matcher("Russian")('a'));
    }

    #[test]
    fn non_latin_classification() {
        assert!(uses_non_latin_script("Japanese"));
        assert!(uses_non_latin_script("Ukrainian"));
        assert!(!uses_non_latin_script("French"));
        assert!(!uses_non_latin_script("Automatic"));
    }
}

use sha2::{Digest, Sha256};

// Exact-match reuse of past translations. A paused player makes the
// overlay recapture the same subtitle frame over and over; matching on a
// normalized-text hash per language pair keeps those recaptures off the
// network. Lives and dies with the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEntry {
    pub origin_language: String,
    pub target_language: String,
    pub original: String,
    pub translation: String,
    pub detected_source_language: String,
    key: String,
}

#[derive(Debug, Default)]
pub struct TranslationMemory {
    entries: Vec<MemoryEntry>,
}

impl TranslationMemory {
    pub fn new() -> Self {
        TranslationMemory::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, origin: &str, target: &str, text: &str) -> Option<&MemoryEntry> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let key = cache_key(trimmed);

        self.entries.iter().find(|e| {
            e.origin_language == origin && e.target_language == target && e.key == key
        })
    }

    // First successful translation of a line wins; empty translations are
    // never worth remembering.
    pub fn record(
        &mut self,
        origin: &str,
        target: &str,
        original: &str,
        translation: &str,
        detected_source_language: &str,
    ) {
        if translation.trim().is_empty() || self.lookup(origin, target, original).is_some() {
            return;
        }

        self.entries.push(MemoryEntry {
            origin_language: origin.to_string(),
            target_language: target.to_string(),
            original: original.to_string(),
            translation: translation.to_string(),
            detected_source_language: detected_source_language.to_string(),
            key: cache_key(original.trim()),
        });
    }
}

// OCR output of the same frame drifts in casing, spacing and quote glyphs;
// normalization folds those apart before hashing.
fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .chars()
        .filter(|c| {
            !matches!(
                c,
                '“' | '”' | '’' | '‘' | '…' | '"' | '\'' | '(' | ')' | '「' | '」' | '『' | '』'
            )
        })
        .collect()
}

fn cache_key(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(text).as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_misses_on_empty_memory() {
        let memory = TranslationMemory::new();
        assert!(memory.lookup("Automatic", "English", "Hola").is_none());
    }

    #[test]
    fn recorded_translation_is_found_again() {
        let mut memory = TranslationMemory::new();
        memory.record("Automatic", "English", "Hola", "Hello", "es");

        let hit = memory.lookup("Automatic", "English", "Hola").unwrap();
        assert_eq!(hit.translation, "Hello");
        assert_eq!(hit.detected_source_language, "es");
    }

    #[test]
    fn normalization_folds_ocr_drift_together() {
        let mut memory = TranslationMemory::new();
        memory.record("Automatic", "English", "Hola  amigo", "Hello friend", "es");

        assert!(memory.lookup("Automatic", "English", "HOLA AMIGO").is_some());
        assert!(memory.lookup("Automatic", "English", "\"Hola amigo\"").is_some());
        assert!(memory
            .lookup("Automatic", "English", " Hola\tamigo ")
            .is_some());
    }

    #[test]
    fn language_pairs_do_not_cross() {
        let mut memory = TranslationMemory::new();
        memory.record("Automatic", "English", "Hola", "Hello", "es");

        assert!(memory.lookup("Automatic", "French", "Hola").is_none());
        assert!(memory.lookup("Spanish", "English", "Hola").is_none());
    }

    #[test]
    fn first_recording_wins() {
        let mut memory = TranslationMemory::new();
        memory.record("Automatic", "English", "Hola", "Hello", "es");
        memory.record("Automatic", "English", "hola", "Howdy", "es");

        assert_eq!(memory.len(), 1);
        let hit = memory.lookup("Automatic", "English", "Hola").unwrap();
        assert_eq!(hit.translation, "Hello");
    }

    #[test]
    fn empty_translations_are_not_recorded() {
        let mut memory = TranslationMemory::new();
        memory.record("Automatic", "English", "Hola", "   ", "es");
        assert!(memory.is_empty());
    }

    #[test]
    fn blank_lookups_never_match() {
        let mut memory = TranslationMemory::new();
        memory.record("Automatic", "English", "Hola", "Hello", "es");
        assert!(memory.lookup("Automatic", "English", "   ").is_none());
    }
}

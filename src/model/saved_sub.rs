use serde::{Deserialize, Serialize};

// One completed translation, as kept in the overlay history.
// All four fields must be present on the wire; empty strings are allowed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SavedSub {
    pub original_text: String,

    pub translated_text: String,

    pub detected_source_language: String,

    // Unix milliseconds, same unit the frontend's Date.now() used.
    pub timestamp: u64,
}

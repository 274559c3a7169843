use serde::{Deserialize, Serialize};

fn default_origin_language() -> String {
    "Automatic".to_string()
}

fn default_target_language() -> String {
    "English".to_string()
}

fn default_platform() -> String {
    "Default".to_string()
}

fn default_shortcut() -> String {
    "Ctrl+T".to_string()
}

// The four scalar cells of the overlay store, as one bundle for the
// settings file and the prefs.get response. Fields missing from an older
// settings file fall back to their defaults individually.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default = "default_origin_language")]
    pub origin_language: String,

    #[serde(default = "default_target_language")]
    pub target_language: String,

    #[serde(default = "default_platform")]
    pub platform: String,

    #[serde(default = "default_shortcut")]
    pub shortcut: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            origin_language: default_origin_language(),
            target_language: default_target_language(),
            platform: default_platform(),
            shortcut: default_shortcut(),
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::preferences::Preferences;

const SETTINGS_FILE: &str = "settings.json";

pub fn settings_base_dir() -> PathBuf {
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return PathBuf::from(local).join("FlashMem");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("FlashMem")
}

// A missing or unreadable settings file is not an error: the overlay
// starts on defaults and the user never notices.
pub fn load_from(dir: &Path) -> Preferences {
    let path = dir.join(SETTINGS_FILE);

    let data = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Preferences::default(),
    };

    match serde_json::from_str(&data) {
        Ok(prefs) => prefs,
        Err(e) => {
            eprintln!("[settings] failed to parse {}: {e}", path.display());
            Preferences::default()
        }
    }
}

pub fn save_to(dir: &Path, prefs: &Preferences) -> Result<(), String> {
    let json = serde_json::to_string_pretty(prefs).map_err(|e| e.to_string())?;
    write_atomic(&dir.join(SETTINGS_FILE), json.as_bytes())
}

// Temp file plus rename, so a crash mid-write leaves the old settings
// intact instead of a truncated file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let mut tmp = path.to_path_buf();
    tmp.set_extension("json.tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    fs::write(&tmp, bytes).map_err(|e| e.to_string())?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    fs::rename(&tmp, path).map_err(|e| e.to_string())
}

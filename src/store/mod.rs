use serde_json::{json, Value};

use crate::model::preferences::Preferences;
use crate::model::saved_sub::SavedSub;

mod cell;
use cell::Cell;

// The five observable cells the overlay UI binds to. Each is independent:
// writing one never touches or notifies the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellId {
    SavedSubs,
    OriginLanguage,
    TargetLanguage,
    Platform,
    Shortcut,
}

impl CellId {
    pub fn from_name(name: &str) -> Option<CellId> {
        match name {
            "saved_subs" => Some(CellId::SavedSubs),
            "origin_language" => Some(CellId::OriginLanguage),
            "target_language" => Some(CellId::TargetLanguage),
            "platform" => Some(CellId::Platform),
            "shortcut" => Some(CellId::Shortcut),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellId::SavedSubs => "saved_subs",
            CellId::OriginLanguage => "origin_language",
            CellId::TargetLanguage => "target_language",
            CellId::Platform => "platform",
            CellId::Shortcut => "shortcut",
        }
    }
}

// Explicit state container for the overlay's process-wide UI state.
// Built once per session and handed to whoever needs it; nothing global.
pub struct OverlayStore {
    saved_subs: Cell<Vec<SavedSub>>,
    origin_language: Cell<String>,
    target_language: Cell<String>,
    platform: Cell<String>,
    shortcut: Cell<String>,
    next_subscription: u64,
}

impl OverlayStore {
    pub fn new() -> Self {
        let defaults = Preferences::default();
        OverlayStore {
            saved_subs: Cell::new(Vec::new()),
            origin_language: Cell::new(defaults.origin_language),
            target_language: Cell::new(defaults.target_language),
            platform: Cell::new(defaults.platform),
            shortcut: Cell::new(defaults.shortcut),
            next_subscription: 1,
        }
    }

    pub fn saved_subs(&self) -> &[SavedSub] {
        self.saved_subs.get()
    }

    // History is append-only: insertion order is preserved, nothing is
    // deduplicated, and subscribers receive the full new sequence.
    pub fn append_saved_sub(&mut self, sub: SavedSub) {
        self.saved_subs.update(|subs| subs.push(sub));
    }

    pub fn origin_language(&self) -> &str {
        self.origin_language.get()
    }

    pub fn set_origin_language(&mut self, value: String) {
        self.origin_language.set(value);
    }

    pub fn target_language(&self) -> &str {
        self.target_language.get()
    }

    pub fn set_target_language(&mut self, value: String) {
        self.target_language.set(value);
    }

    pub fn platform(&self) -> &str {
        self.platform.get()
    }

    pub fn set_platform(&mut self, value: String) {
        self.platform.set(value);
    }

    pub fn shortcut(&self) -> &str {
        self.shortcut.get()
    }

    pub fn set_shortcut(&mut self, value: String) {
        self.shortcut.set(value);
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            origin_language: self.origin_language.get().clone(),
            target_language: self.target_language.get().clone(),
            platform: self.platform.get().clone(),
            shortcut: self.shortcut.get().clone(),
        }
    }

    // Applies a whole bundle, one cell at a time; each cell notifies its
    // own subscribers as usual.
    pub fn apply_preferences(&mut self, prefs: Preferences) {
        self.origin_language.set(prefs.origin_language);
        self.target_language.set(prefs.target_language);
        self.platform.set(prefs.platform);
        self.shortcut.set(prefs.shortcut);
    }

    pub fn snapshot(&self) -> Value {
        json!({
            "saved_subs": self.saved_subs.get(),
            "origin_language": self.origin_language.get(),
            "target_language": self.target_language.get(),
            "platform": self.platform.get(),
            "shortcut": self.shortcut.get(),
        })
    }

    // JSON-level subscription used by the protocol layer. The callback
    // receives (subscription_id, serialized value): once immediately with
    // the current value, then on every change to that cell.
    pub fn subscribe_json<F>(&mut self, cell: CellId, mut f: F) -> u64
    where
        F: FnMut(u64, Value) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;

        match cell {
            CellId::SavedSubs => self
                .saved_subs
                .subscribe(id, Box::new(move |v| f(id, json!(v)))),
            CellId::OriginLanguage => self
                .origin_language
                .subscribe(id, Box::new(move |v| f(id, json!(v)))),
            CellId::TargetLanguage => self
                .target_language
                .subscribe(id, Box::new(move |v| f(id, json!(v)))),
            CellId::Platform => self
                .platform
                .subscribe(id, Box::new(move |v| f(id, json!(v)))),
            CellId::Shortcut => self
                .shortcut
                .subscribe(id, Box::new(move |v| f(id, json!(v)))),
        }

        id
    }

    pub fn unsubscribe(&mut self, cell: CellId, id: u64) -> bool {
        match cell {
            CellId::SavedSubs => self.saved_subs.unsubscribe(id),
            CellId::OriginLanguage => self.origin_language.unsubscribe(id),
            CellId::TargetLanguage => self.target_language.unsubscribe(id),
            CellId::Platform => self.platform.unsubscribe(id),
            CellId::Shortcut => self.shortcut.unsubscribe(id),
        }
    }
}

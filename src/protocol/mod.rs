use std::path::PathBuf;

use serde_json::{json, Value};

use crate::model::saved_sub::SavedSub;
use crate::services::memory::TranslationMemory;
use crate::services::pipeline::{self, PipelineConfig};
use crate::services::{lang, platform, scrub, settings, vision};
use crate::store::{CellId, OverlayStore};
use crate::theme;

mod command;
mod events;

use command::Command;
pub use events::EventSink;

// Everything one GUI connection owns: the observable store, the in-memory
// translation reuse, and the queue of pending store-update events.
pub struct Session {
    pub store: OverlayStore,
    pub memory: TranslationMemory,
    pub events: EventSink,
}

impl Session {
    pub fn new() -> Self {
        Session {
            store: OverlayStore::new(),
            memory: TranslationMemory::new(),
            events: EventSink::new(),
        }
    }
}

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

// Required, non-empty string field.
fn require_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str, String> {
    match payload.get(field).and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(format!("payload.{field} is required")),
    }
}

// Present string field; empty values are accepted as-is (a cell can be
// set to "" and must read back as "").
fn value_str<'a>(payload: &'a Value) -> Result<&'a str, String> {
    payload
        .get("value")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "payload.value is required".to_string())
}

fn settings_dir(payload: &Value) -> PathBuf {
    match payload.get("dir").and_then(|v| v.as_str()) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => settings::settings_base_dir(),
    }
}

pub fn handle(input: &str, session: &mut Session) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "flashmem-core alive" })),

        Command::StoreSnapshot => ok(id, session.store.snapshot()),

        Command::StoreSubscribe => {
            let cell_name = match require_str(payload, "cell") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let cell = match CellId::from_name(cell_name) {
                Some(c) => c,
                None => return err(id, format!("unknown cell: {cell_name}")),
            };

            let sink = session.events.clone();
            let name = cell.name();
            let subscription_id = session
                .store
                .subscribe_json(cell, move |sid, value| sink.emit_update(name, sid, value));

            ok(
                id,
                json!({ "cell": name, "subscription_id": subscription_id }),
            )
        }

        Command::StoreUnsubscribe => {
            let cell_name = match require_str(payload, "cell") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let cell = match CellId::from_name(cell_name) {
                Some(c) => c,
                None => return err(id, format!("unknown cell: {cell_name}")),
            };

            let subscription_id = match payload.get("subscription_id").and_then(|v| v.as_u64()) {
                Some(v) => v,
                None => return err(id, "payload.subscription_id is required"),
            };

            let removed = session.store.unsubscribe(cell, subscription_id);
            ok(id, json!({ "removed": removed }))
        }

        Command::HistoryList => ok(id, json!({ "saved_subs": session.store.saved_subs() })),

        Command::HistoryAppend => {
            let record_val = payload.get("record").cloned().unwrap_or(Value::Null);
            if record_val.is_null() {
                return err(id, "payload.record is required");
            }

            let record: SavedSub = match serde_json::from_value(record_val) {
                Ok(r) => r,
                Err(e) => return err(id, format!("invalid payload.record: {e}")),
            };

            session.store.append_saved_sub(record);
            ok(id, json!({ "count": session.store.saved_subs().len() }))
        }

        Command::PrefsGet => ok(
            id,
            serde_json::to_value(session.store.preferences()).unwrap_or(json!({})),
        ),

        Command::PrefsSetOriginLanguage => match value_str(payload) {
            Ok(v) => {
                session.store.set_origin_language(v.to_string());
                ok(id, json!({ "origin_language": session.store.origin_language() }))
            }
            Err(e) => err(id, e),
        },

        Command::PrefsSetTargetLanguage => match value_str(payload) {
            Ok(v) => {
                session.store.set_target_language(v.to_string());
                ok(id, json!({ "target_language": session.store.target_language() }))
            }
            Err(e) => err(id, e),
        },

        Command::PrefsSetPlatform => match value_str(payload) {
            Ok(v) => {
                session.store.set_platform(v.to_string());
                ok(id, json!({ "platform": session.store.platform() }))
            }
            Err(e) => err(id, e),
        },

        Command::PrefsSetShortcut => match value_str(payload) {
            Ok(v) => {
                session.store.set_shortcut(v.to_string());
                ok(id, json!({ "shortcut": session.store.shortcut() }))
            }
            Err(e) => err(id, e),
        },

        Command::SettingsLoad => {
            let prefs = settings::load_from(&settings_dir(payload));
            session.store.apply_preferences(prefs.clone());
            ok(id, serde_json::to_value(prefs).unwrap_or(json!({})))
        }

        Command::SettingsSave => {
            let dir = settings_dir(payload);
            match settings::save_to(&dir, &session.store.preferences()) {
                Ok(()) => ok(id, json!({ "dir": dir.to_string_lossy() })),
                Err(e) => err(id, e),
            }
        }

        Command::LangList => ok(id, json!({ "languages": lang::LANGUAGES })),

        Command::PlatformList => ok(id, json!({ "platforms": platform::PLATFORMS })),

        Command::PlatformCropRegion => {
            let name = match payload.get("platform").and_then(|v| v.as_str()) {
                Some(p) if !p.is_empty() => p.to_string(),
                _ => session.store.platform().to_string(),
            };
            let region = platform::crop_region(&name);
            ok(id, json!({ "platform": name, "region": region }))
        }

        Command::ThemePalette => ok(
            id,
            json!({
                "palette": theme::palette(),
                "frontend_content_glob": theme::FRONTEND_CONTENT_GLOB
            }),
        ),

        Command::OcrScrub => {
            let text = match payload.get("text").and_then(|v| v.as_str()) {
                Some(t) => t,
                None => return err(id, "payload.text is required"),
            };
            let origin = match payload.get("origin_language").and_then(|v| v.as_str()) {
                Some(l) if !l.is_empty() => l.to_string(),
                _ => session.store.origin_language().to_string(),
            };

            ok(id, json!({ "text": scrub::clean_ocr_text(text, &origin) }))
        }

        Command::OcrRecognize => {
            let image = match require_str(payload, "image_base64") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let api_key = match require_str(payload, "api_key") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let origin = session.store.origin_language().to_string();
            match vision::recognize(image, &origin, api_key) {
                Ok(result) => ok(id, json!({ "text": result.text, "locale": result.locale })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::TranslateText => {
            let text = match require_str(payload, "text") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let api_key = match require_str(payload, "api_key") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let origin = session.store.origin_language().to_string();
            let target = session.store.target_language().to_string();
            let cfg = PipelineConfig {
                api_key,
                origin_language: &origin,
                target_language: &target,
            };

            match pipeline::translate_text(text, &cfg, &mut session.memory) {
                Ok(outcome) => {
                    session.store.append_saved_sub(outcome.record.clone());
                    ok(
                        id,
                        json!({
                            "record": outcome.record,
                            "caption": outcome.caption,
                            "from_memory": outcome.from_memory
                        }),
                    )
                }
                Err(e) => err(id, e),
            }
        }

        Command::PipelineRun => {
            let image = match require_str(payload, "image_base64") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let api_key = match require_str(payload, "api_key") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let origin = session.store.origin_language().to_string();
            let target = session.store.target_language().to_string();
            let cfg = PipelineConfig {
                api_key,
                origin_language: &origin,
                target_language: &target,
            };

            match pipeline::run(image, &cfg, &mut session.memory) {
                Ok(outcome) => {
                    session.store.append_saved_sub(outcome.record.clone());
                    ok(
                        id,
                        json!({
                            "record": outcome.record,
                            "caption": outcome.caption,
                            "from_memory": outcome.from_memory
                        }),
                    )
                }
                Err(e) => err(id, e),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send(session: &mut Session, request: Value) -> Value {
        let raw = handle(&request.to_string(), session);
        serde_json::from_str(&raw).unwrap()
    }

    fn send_ok(session: &mut Session, request: Value) -> Value {
        let resp = send(session, request);
        assert_eq!(resp["status"], "ok", "unexpected error: {}", resp["message"]);
        resp["payload"].clone()
    }

    fn drained(session: &Session) -> Vec<Value> {
        session
            .events
            .drain()
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn ping_answers_alive() {
        let mut session = Session::new();
        let payload = send_ok(&mut session, json!({ "id": 1, "cmd": "ping" }));
        assert_eq!(payload["message"], "flashmem-core alive");
    }

    #[test]
    fn invalid_json_is_reported_without_an_id() {
        let mut session = Session::new();
        let resp: Value = serde_json::from_str(&handle("{nope", &mut session)).unwrap();
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid json");
    }

    #[test]
    fn unknown_command_is_an_error_echoing_the_id() {
        let mut session = Session::new();
        let resp = send(&mut session, json!({ "id": 7, "cmd": "history.clear" }));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["id"], 7);
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn prefs_start_on_defaults() {
        let mut session = Session::new();
        let payload = send_ok(&mut session, json!({ "id": 1, "cmd": "prefs.get" }));
        assert_eq!(payload["origin_language"], "Automatic");
        assert_eq!(payload["target_language"], "English");
        assert_eq!(payload["platform"], "Default");
        assert_eq!(payload["shortcut"], "Ctrl+T");
    }

    #[test]
    fn setting_a_pref_changes_only_that_pref() {
        let mut session = Session::new();
        send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "prefs.set_target_language", "payload": { "value": "French" } }),
        );

        let payload = send_ok(&mut session, json!({ "id": 2, "cmd": "prefs.get" }));
        assert_eq!(payload["target_language"], "French");
        assert_eq!(payload["origin_language"], "Automatic");
        assert_eq!(payload["platform"], "Default");
    }

    #[test]
    fn set_without_a_value_is_rejected() {
        let mut session = Session::new();
        let resp = send(&mut session, json!({ "id": 1, "cmd": "prefs.set_shortcut" }));
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "payload.value is required");
    }

    #[test]
    fn history_appends_in_order() {
        let mut session = Session::new();

        let first = send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "history.append", "payload": { "record": {
                "original_text": "Hola", "translated_text": "Hello",
                "detected_source_language": "es", "timestamp": 1000
            }}}),
        );
        assert_eq!(first["count"], 1);

        send_ok(
            &mut session,
            json!({ "id": 2, "cmd": "history.append", "payload": { "record": {
                "original_text": "Adios", "translated_text": "Goodbye",
                "detected_source_language": "es", "timestamp": 2000
            }}}),
        );

        let listed = send_ok(&mut session, json!({ "id": 3, "cmd": "history.list" }));
        let subs = listed["saved_subs"].as_array().unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0]["timestamp"], 1000);
        assert_eq!(subs[1]["timestamp"], 2000);
    }

    #[test]
    fn appending_an_incomplete_record_is_rejected() {
        let mut session = Session::new();
        let resp = send(
            &mut session,
            json!({ "id": 1, "cmd": "history.append", "payload": { "record": {
                "original_text": "Hola", "timestamp": 1000
            }}}),
        );
        assert_eq!(resp["status"], "error");
        assert!(resp["message"]
            .as_str()
            .unwrap()
            .starts_with("invalid payload.record"));

        let listed = send_ok(&mut session, json!({ "id": 2, "cmd": "history.list" }));
        assert!(listed["saved_subs"].as_array().unwrap().is_empty());
    }

    #[test]
    fn snapshot_covers_all_five_cells() {
        let mut session = Session::new();
        let snap = send_ok(&mut session, json!({ "id": 1, "cmd": "store.snapshot" }));
        assert!(snap["saved_subs"].as_array().unwrap().is_empty());
        assert_eq!(snap["origin_language"], "Automatic");
        assert_eq!(snap["target_language"], "English");
        assert_eq!(snap["platform"], "Default");
        assert_eq!(snap["shortcut"], "Ctrl+T");
    }

    #[test]
    fn subscribe_emits_the_current_value_then_every_change() {
        let mut session = Session::new();

        let sub = send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "store.subscribe", "payload": { "cell": "target_language" } }),
        );
        let sub_id = sub["subscription_id"].as_u64().unwrap();

        let events = drained(&session);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["cell"], "target_language");
        assert_eq!(events[0]["subscription_id"], sub_id);
        assert_eq!(events[0]["value"], "English");

        send_ok(
            &mut session,
            json!({ "id": 2, "cmd": "prefs.set_target_language", "payload": { "value": "French" } }),
        );
        // Unrelated cell: no event for the target_language subscriber.
        send_ok(
            &mut session,
            json!({ "id": 3, "cmd": "prefs.set_platform", "payload": { "value": "Netflix" } }),
        );

        let events = drained(&session);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["value"], "French");
    }

    #[test]
    fn history_subscriber_gets_the_full_sequence() {
        let mut session = Session::new();
        send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "store.subscribe", "payload": { "cell": "saved_subs" } }),
        );
        session.events.drain();

        send_ok(
            &mut session,
            json!({ "id": 2, "cmd": "history.append", "payload": { "record": {
                "original_text": "Hola", "translated_text": "Hello",
                "detected_source_language": "es", "timestamp": 1000
            }}}),
        );

        let events = drained(&session);
        assert_eq!(events.len(), 1);
        let value = events[0]["value"].as_array().unwrap();
        assert_eq!(value.len(), 1);
        assert_eq!(value[0]["original_text"], "Hola");
    }

    #[test]
    fn unsubscribe_stops_the_event_stream() {
        let mut session = Session::new();
        let sub = send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "store.subscribe", "payload": { "cell": "shortcut" } }),
        );
        let sub_id = sub["subscription_id"].as_u64().unwrap();
        session.events.drain();

        let resp = send_ok(
            &mut session,
            json!({ "id": 2, "cmd": "store.unsubscribe", "payload": {
                "cell": "shortcut", "subscription_id": sub_id
            }}),
        );
        assert_eq!(resp["removed"], true);

        send_ok(
            &mut session,
            json!({ "id": 3, "cmd": "prefs.set_shortcut", "payload": { "value": "Ctrl+G" } }),
        );
        assert_eq!(session.events.pending(), 0);
    }

    #[test]
    fn subscribing_to_an_unknown_cell_fails() {
        let mut session = Session::new();
        let resp = send(
            &mut session,
            json!({ "id": 1, "cmd": "store.subscribe", "payload": { "cell": "volume" } }),
        );
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "unknown cell: volume");
    }

    #[test]
    fn lang_list_feeds_the_choice_dropdowns() {
        let mut session = Session::new();
        let payload = send_ok(&mut session, json!({ "id": 1, "cmd": "lang.list" }));
        let languages = payload["languages"].as_array().unwrap();
        assert_eq!(languages[0], "Automatic");
        assert!(languages.iter().any(|l| l == "French"));
    }

    #[test]
    fn crop_region_defaults_to_the_stored_platform() {
        let mut session = Session::new();
        send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "prefs.set_platform", "payload": { "value": "YouTube" } }),
        );

        let payload =
            send_ok(&mut session, json!({ "id": 2, "cmd": "platform.crop_region" }));
        assert_eq!(payload["platform"], "YouTube");
        assert_eq!(payload["region"]["top"], 0.7);

        let explicit = send_ok(
            &mut session,
            json!({ "id": 3, "cmd": "platform.crop_region", "payload": { "platform": "Hulu" } }),
        );
        assert_eq!(explicit["platform"], "Hulu");
        assert_eq!(explicit["region"]["left"], 0.29);
    }

    #[test]
    fn theme_palette_matches_the_frontend_tokens() {
        let mut session = Session::new();
        let payload = send_ok(&mut session, json!({ "id": 1, "cmd": "theme.palette" }));
        assert_eq!(payload["palette"]["dark"], "#121212");
        assert_eq!(payload["palette"]["customGreen"], "#10B981");
        assert_eq!(
            payload["frontend_content_glob"],
            "./src/**/*.{html,js,svelte,ts}"
        );
    }

    #[test]
    fn ocr_scrub_uses_the_stored_origin_language() {
        let mut session = Session::new();
        send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "prefs.set_origin_language", "payload": { "value": "Japanese" } }),
        );

        let payload = send_ok(
            &mut session,
            json!({ "id": 2, "cmd": "ocr.scrub", "payload": {
                "text": "字幕はここにある\nAudio and subtitles"
            }}),
        );
        assert_eq!(payload["text"], "字幕はここにある");
    }

    #[test]
    fn translate_text_requires_an_api_key() {
        let mut session = Session::new();
        let resp = send(
            &mut session,
            json!({ "id": 1, "cmd": "translate.text", "payload": { "text": "Hola" } }),
        );
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "payload.api_key is required");
    }

    #[test]
    fn translate_text_from_memory_appends_to_history() {
        let mut session = Session::new();
        session
            .memory
            .record("Automatic", "English", "Hola", "Hello", "es");

        let payload = send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "translate.text", "payload": {
                "text": "Hola", "api_key": "k"
            }}),
        );
        assert_eq!(payload["from_memory"], true);
        assert_eq!(payload["record"]["translated_text"], "Hello");
        assert_eq!(payload["caption"], "Hello\n[Detected Source Language: es]");

        let listed = send_ok(&mut session, json!({ "id": 2, "cmd": "history.list" }));
        assert_eq!(listed["saved_subs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn settings_round_trip_through_a_custom_dir() {
        let mut session = Session::new();
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_string_lossy().to_string();

        send_ok(
            &mut session,
            json!({ "id": 1, "cmd": "prefs.set_platform", "payload": { "value": "Netflix" } }),
        );
        send_ok(
            &mut session,
            json!({ "id": 2, "cmd": "settings.save", "payload": { "dir": dir_str.clone() } }),
        );

        // A fresh session starts on defaults, then restores the saved file.
        let mut fresh = Session::new();
        let loaded = send_ok(
            &mut fresh,
            json!({ "id": 1, "cmd": "settings.load", "payload": { "dir": dir_str } }),
        );
        assert_eq!(loaded["platform"], "Netflix");
        assert_eq!(fresh.store.platform(), "Netflix");
    }
}

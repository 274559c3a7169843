#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    StoreSnapshot,
    StoreSubscribe,
    StoreUnsubscribe,
    HistoryList,
    HistoryAppend,
    PrefsGet,
    PrefsSetOriginLanguage,
    PrefsSetTargetLanguage,
    PrefsSetPlatform,
    PrefsSetShortcut,
    SettingsLoad,
    SettingsSave,
    LangList,
    PlatformList,
    PlatformCropRegion,
    ThemePalette,
    OcrScrub,
    OcrRecognize,
    TranslateText,
    PipelineRun,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "store.snapshot" => Command::StoreSnapshot,
            "store.subscribe" => Command::StoreSubscribe,
            "store.unsubscribe" => Command::StoreUnsubscribe,
            "history.list" => Command::HistoryList,
            "history.append" => Command::HistoryAppend,
            "prefs.get" => Command::PrefsGet,
            "prefs.set_origin_language" => Command::PrefsSetOriginLanguage,
            "prefs.set_target_language" => Command::PrefsSetTargetLanguage,
            "prefs.set_platform" => Command::PrefsSetPlatform,
            "prefs.set_shortcut" => Command::PrefsSetShortcut,
            "settings.load" => Command::SettingsLoad,
            "settings.save" => Command::SettingsSave,
            "lang.list" => Command::LangList,
            "platform.list" => Command::PlatformList,
            "platform.crop_region" => Command::PlatformCropRegion,
            "theme.palette" => Command::ThemePalette,
            "ocr.scrub" => Command::OcrScrub,
            "ocr.recognize" => Command::OcrRecognize,
            "translate.text" => Command::TranslateText,
            "pipeline.run" => Command::PipelineRun,
            _ => Command::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_commands_map_to_variants() {
        assert_eq!(Command::from("ping"), Command::Ping);
        assert_eq!(Command::from("store.subscribe"), Command::StoreSubscribe);
        assert_eq!(
            Command::from("prefs.set_target_language"),
            Command::PrefsSetTargetLanguage
        );
        assert_eq!(Command::from("pipeline.run"), Command::PipelineRun);
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(Command::from(""), Command::Unknown);
        assert_eq!(Command::from("history.clear"), Command::Unknown);
    }
}

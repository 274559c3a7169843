use serde::Serialize;

// Color tokens the overlay frontend extends its base palette with. These
// mirror the values in the frontend's styling config; the GUI asks for
// them over theme.palette so both sides render from one source.
pub const DARK: &str = "#121212";
pub const CUSTOM_GREEN: &str = "#10B981";

// Source glob the frontend's styling build scans for class usage.
pub const FRONTEND_CONTENT_GLOB: &str = "./src/**/*.{html,js,svelte,ts}";

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub dark: &'static str,
    #[serde(rename = "customGreen")]
    pub custom_green: &'static str,
}

pub fn palette() -> ThemePalette {
    ThemePalette {
        dark: DARK,
        custom_green: CUSTOM_GREEN,
    }
}

use serde::Serialize;

// Where the subtitles live on screen, per streaming platform, as fractions
// of the capture dimensions: (left, top) offset plus (width, height) span.
// The GUI crops the screenshot to this region before OCR so player chrome
// never reaches the recognizer.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub const PLATFORMS: &[&str] = &[
    "Default",
    "Netflix",
    "Hulu",
    "Amazon Prime Video",
    "Disney+",
    "Max",
    "YouTube",
    "VLC",
    "AppleTV",
];

pub fn crop_region(platform: &str) -> CropRegion {
    let (left, top, width, height) = match platform {
        "Netflix" => (0.1, 0.04, 0.8, 0.84),
        "Hulu" => (0.29, 0.6, 0.42, 0.37),
        "Amazon Prime Video" => (0.25, 0.04, 0.50, 0.92),
        "Disney+" => (0.15, 0.03, 0.7, 0.94),
        "Max" => (0.15, 0.03, 0.7, 0.91),
        "YouTube" => (0.24, 0.7, 0.52, 0.3),
        "VLC" => (0.20, 0.7, 0.60, 0.22),
        "AppleTV" => (0.23, 0.03, 0.54, 0.90),
        _ => (0.15, 0.03, 0.7, 0.94),
    };

    CropRegion {
        left,
        top,
        width,
        height,
    }
}

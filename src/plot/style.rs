use std::path::Path;

use plotters::style::{Color, RGBColor, ShapeStyle};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PlotStyle – fixed rendering parameters, optionally overridden from JSON
// ---------------------------------------------------------------------------

/// Name of the optional style override file, looked up in the working
/// directory. A missing or unreadable file silently falls back to the
/// defaults, so the command line stays a single positional argument.
pub const STYLE_FILE: &str = "profplot.json";

/// Rendering parameters for the profile plot.
///
/// The defaults reproduce the instrument workflow's fixed output: a 640×480
/// canvas, a 1 px pure-blue trace, 12 pt axis labels, transparent background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    /// Trace colour as an RGB triple.
    pub line_color: [u8; 3],
    pub stroke_width: u32,
    pub label_size: f64,
    pub x_label: String,
    pub y_label: String,
    pub margin: u32,
    pub x_label_area_size: u32,
    pub y_label_area_size: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            width: 640,
            height: 480,
            line_color: [0, 0, 255],
            stroke_width: 1,
            label_size: 12.0,
            x_label: String::from("Position (microns)"),
            y_label: String::from("Height (nm)"),
            margin: 10,
            x_label_area_size: 40,
            y_label_area_size: 60,
        }
    }
}

impl PlotStyle {
    /// Load the style from a JSON file, falling back to the defaults when the
    /// file is absent or does not parse.
    pub fn load_or_default(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    pub fn line_color(&self) -> RGBColor {
        let [r, g, b] = self.line_color;
        RGBColor(r, g, b)
    }

    /// Stroke style of the trace line.
    pub fn line_style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.line_color().mix(1.0),
            filled: true,
            stroke_width: self.stroke_width,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_output() {
        let style = PlotStyle::default();
        assert_eq!((style.width, style.height), (640, 480));
        assert_eq!(style.line_color, [0, 0, 255]);
        assert_eq!(style.stroke_width, 1);
        assert_eq!(style.label_size, 12.0);
        assert_eq!(style.x_label, "Position (microns)");
        assert_eq!(style.y_label, "Height (nm)");
    }

    #[test]
    fn partial_json_keeps_the_remaining_defaults() {
        let style: PlotStyle =
            serde_json::from_str(r#"{"line_color": [255, 0, 0], "stroke_width": 3}"#).unwrap();
        assert_eq!(style.line_color, [255, 0, 0]);
        assert_eq!(style.stroke_width, 3);
        assert_eq!(style.width, 640);
        assert_eq!(style.x_label, "Position (microns)");
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        let missing = Path::new("does-not-exist-profplot.json");
        assert_eq!(PlotStyle::load_or_default(missing), PlotStyle::default());

        let broken = std::env::temp_dir().join(format!("profplot-style-{}.json", std::process::id()));
        std::fs::write(&broken, "{ not json").unwrap();
        assert_eq!(PlotStyle::load_or_default(&broken), PlotStyle::default());
        let _ = std::fs::remove_file(&broken);
    }

    #[test]
    fn style_file_overrides() {
        let path = std::env::temp_dir().join(format!("profplot-style-ok-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"width": 800, "height": 600}"#).unwrap();
        let style = PlotStyle::load_or_default(&path);
        assert_eq!((style.width, style.height), (800, 600));
        let _ = std::fs::remove_file(&path);
    }
}

//! Text exports of a finished palette: CSS custom properties, SCSS
//! variables and a JSON document.

use crate::color::Color;
use crate::error::PaletteError;
use crate::generator::GenerationMode;
use crate::palette::Palette;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::str::FromStr;

const FORMAT_NAMES: &[&str] = &["css", "scss", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Css,
    Scss,
    Json,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Result<Self, PaletteError> {
        match name {
            "css" => Ok(ExportFormat::Css),
            "scss" => Ok(ExportFormat::Scss),
            "json" => Ok(ExportFormat::Json),
            _ => Err(PaletteError::UnknownFormat(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Scss => "scss",
            ExportFormat::Json => "json",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        FORMAT_NAMES
    }

    /// File extension for downloads.
    pub fn extension(self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[derive(Serialize)]
struct ExportDocument<'a> {
    palette: &'a [Color],
    generated: DateTime<Utc>,
    mode: GenerationMode,
}

/// Renders `palette` in `format`. `mode` and `generated` only appear in the
/// JSON document.
pub fn export(
    palette: &Palette,
    format: ExportFormat,
    mode: GenerationMode,
    generated: DateTime<Utc>,
) -> Result<String, PaletteError> {
    match format {
        ExportFormat::Css => Ok(to_css(palette)),
        ExportFormat::Scss => Ok(to_scss(palette)),
        ExportFormat::Json => to_json(palette, mode, generated),
    }
}

pub fn to_css(palette: &Palette) -> String {
    let mut css = String::from("/* Color palette */\n\n:root {\n");
    for (i, color) in palette.iter().enumerate() {
        let _ = writeln!(css, "  --color-{}: {};", i + 1, color.hex());
    }
    css.push_str("}\n\n");
    for (i, color) in palette.iter().enumerate() {
        let n = i + 1;
        let _ = writeln!(css, "/* Color {n}: {} */", color.name());
        let _ = writeln!(css, ".color-{n} {{ background: {}; }}\n", color.hex());
    }
    css
}

pub fn to_scss(palette: &Palette) -> String {
    let mut scss = String::from("// Color palette\n\n");
    for (i, color) in palette.iter().enumerate() {
        let _ = writeln!(scss, "$color-{}: {}; // {}", i + 1, color.hex(), color.name());
    }
    scss.push_str("\n// Utility classes\n");
    for n in 1..=palette.len() {
        let _ = writeln!(scss, ".bg-color-{n} {{ background: $color-{n}; }}");
        let _ = writeln!(scss, ".text-color-{n} {{ color: $color-{n}; }}");
    }
    scss
}

pub fn to_json(
    palette: &Palette,
    mode: GenerationMode,
    generated: DateTime<Utc>,
) -> Result<String, PaletteError> {
    let doc = ExportDocument {
        palette: palette.colors(),
        generated,
        mode,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn two_colors() -> Palette {
        Palette::new(vec![Color::from_hsl(0, 100, 50), Color::from_hsl(210, 50, 40)])
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn format_names_resolve() {
        for name in ExportFormat::list_names() {
            assert_eq!(ExportFormat::from_name(name).unwrap().extension(), *name);
        }
        assert!(matches!(
            ExportFormat::from_name("png"),
            Err(PaletteError::UnknownFormat(_))
        ));
    }

    #[test]
    fn display_and_from_str_agree() {
        for name in ExportFormat::list_names() {
            let format: ExportFormat = name.parse().unwrap();
            assert_eq!(format.to_string(), *name);
        }
        assert!("PNG".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn css_declares_custom_properties_and_classes() {
        let css = to_css(&two_colors());
        assert!(css.contains(":root {\n  --color-1: #ff0000;\n  --color-2: #336699;\n}"));
        assert!(css.contains("/* Color 1: vivid red */"));
        assert!(css.contains(".color-2 { background: #336699; }"));
    }

    #[test]
    fn scss_declares_variables_with_names_and_utilities() {
        let scss = to_scss(&two_colors());
        assert!(scss.contains("$color-1: #ff0000; // vivid red"));
        assert!(scss.contains(".bg-color-2 { background: $color-2; }"));
        assert!(scss.contains(".text-color-1 { color: $color-1; }"));
    }

    #[test]
    fn json_document_has_palette_timestamp_and_mode() {
        let json = export(&two_colors(), ExportFormat::Json, GenerationMode::Analogous, noon()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["mode"], "analogous");
        assert_eq!(v["generated"], "2024-06-01T12:00:00Z");
        let palette = v["palette"].as_array().unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[1]["hex"], "#336699");
        assert_eq!(palette[1]["rgb"], "rgb(51, 102, 153)");
    }

    #[test]
    fn empty_palette_exports_skeletons() {
        let empty = Palette::default();
        assert!(to_css(&empty).contains(":root {\n}"));
        assert!(!to_scss(&empty).contains("$color-"));
    }
}

//! Descriptive color names from banded hue/saturation/lightness rules.
//!
//! Rules are checked in order and the first match wins: near-white,
//! near-black, very dark, very light, then a hue family snapped to the
//! nearest 15° and qualified by at most one of pale / vivid / dark / light.

/// Hue families in 15° steps, starting at 0°.
const HUE_NAMES: [&str; 24] = [
    "red",
    "red-orange",
    "orange",
    "yellow-orange",
    "yellow",
    "yellow-green",
    "green-yellow",
    "green",
    "green-blue",
    "cyan",
    "blue-cyan",
    "blue",
    "blue-violet",
    "violet",
    "magenta",
    "pink",
    "magenta-pink",
    "red-magenta",
    "violet",
    "blue-violet",
    "magenta",
    "red-magenta",
    "red",
    "red-orange",
];

const BAND_WIDTH: f64 = 15.0;

/// Returns the base hue family for `h`, snapping to the nearest 15° band.
///
/// Snapped hues of 360 and beyond wrap around the table, so every hue has a
/// family.
pub fn hue_family(h: u16) -> &'static str {
    let band = (f64::from(h) / BAND_WIDTH).round() as usize;
    HUE_NAMES
        .get(band % HUE_NAMES.len())
        .copied()
        .unwrap_or("unknown")
}

/// Names an HSL color. Deterministic: the same triple always yields the
/// same name.
pub fn color_name(h: u16, s: u8, l: u8) -> String {
    if s < 10 && l > 90 {
        return "white".to_string();
    }
    if s < 10 && l < 10 {
        return "black".to_string();
    }
    if l < 20 {
        return "very dark".to_string();
    }
    if l > 90 {
        return "very light".to_string();
    }

    let base = hue_family(h);
    if s < 30 {
        format!("pale {base}")
    } else if s > 80 {
        format!("vivid {base}")
    } else if l < 40 {
        format!("dark {base}")
    } else if l > 70 {
        format!("light {base}")
    } else {
        base.to_string()
    }
}

//! Color types and conversion functions between HSL, RGB and hex.
//!
//! HSL is stored as integers (hue in degrees, saturation and lightness in
//! percent) and is the source of truth for a [`Color`]. The RGB triple, the
//! hex code and the display name are derived from it once, at construction,
//! so re-deriving them from the stored HSL always yields the same values.
//!
//! The free functions are pure and total over their documented domains.

use crate::error::PaletteError;
use crate::naming::color_name;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Integer HSL triple: hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Six-digit hex color code.
///
/// Stored as raw bytes, so two codes differing only in letter case compare
/// equal. Displays (and serializes) in the canonical lowercase `#rrggbb`
/// form; [`Hex::digits`] gives the bare six digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex([u8; 3]);

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Hex {
    /// Builds the hex code for an RGB triple.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Hex([rgb.r, rgb.g, rgb.b])
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `PaletteError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn parse(hex: &str) -> Result<Hex, PaletteError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, label: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| PaletteError::InvalidColor(format!("invalid {label} component: {e}")))
        };
        Ok(Hex([
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ]))
    }

    /// The RGB triple this code encodes.
    pub fn rgb(self) -> Rgb {
        let [r, g, b] = self.0;
        Rgb { r, g, b }
    }

    /// The six lowercase hex digits, without the leading `#`.
    pub fn digits(self) -> String {
        let [r, g, b] = self.0;
        format!("{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits())
    }
}

impl FromStr for Hex {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hex::parse(s)
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hex::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Quantizes a unit-interval channel to 8 bits, rounding to nearest.
fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Converts HSL to RGB with the chroma / intermediate / match formula.
///
/// Sectors are half-open 60° slices of `[0, 360)`. A hue outside that
/// interval matches no sector, so the chroma terms stay zero and the result
/// is the gray at the match value (black for `s = 100, l = 50`). Callers
/// reduce hues into `[0, 360)` beforehand.
pub fn hsl_to_rgb(h: u16, s: u8, l: u8) -> Rgb {
    let h = f64::from(h);
    let s = f64::from(s) / 100.0;
    let l = f64::from(l) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if (0.0..60.0).contains(&h) {
        (c, x, 0.0)
    } else if (60.0..120.0).contains(&h) {
        (x, c, 0.0)
    } else if (120.0..180.0).contains(&h) {
        (0.0, c, x)
    } else if (180.0..240.0).contains(&h) {
        (0.0, x, c)
    } else if (240.0..300.0).contains(&h) {
        (x, 0.0, c)
    } else if (300.0..360.0).contains(&h) {
        (c, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    Rgb {
        r: channel(r + m),
        g: channel(g + m),
        b: channel(b + m),
    }
}

/// Converts HSL to a hex code.
///
/// Goes through [`hsl_to_rgb`] after the same normalization as
/// [`Color::from_hsl`], so the result always equals the hex of the
/// corresponding `Color`. Hues past 360 wrap.
pub fn hsl_to_hex(h: u16, s: u8, l: u8) -> Hex {
    Hex::from_rgb(hsl_to_rgb(h % 360, s.min(100), l.min(100)))
}

/// Formats an RGB triple as a hex code (no alpha).
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> Hex {
    Hex([r, g, b])
}

/// Converts RGB to integer HSL.
///
/// Hue, saturation and lightness are each rounded independently after the
/// full-precision computation, so the hue can come out as 360 and a round
/// trip through [`hsl_to_rgb`] may drift by one unit per channel.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

/// Parses `rgb(R, G, B)`, returning `None` unless the whole string matches.
///
/// Components are decimal integers in `[0, 255]`; whitespace is allowed
/// after each comma and nowhere else.
pub fn try_parse_rgb_string(s: &str) -> Option<Rgb> {
    let body = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = body.split(',');
    let mut next = |first: bool| -> Option<u8> {
        let part = parts.next()?;
        let part = if first { part } else { part.trim_start() };
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    let rgb = Rgb {
        r: next(true)?,
        g: next(false)?,
        b: next(false)?,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(rgb)
}

/// Parses `rgb(R, G, B)`, yielding a zero triple when the string does not
/// match. Never fails.
pub fn parse_rgb_string(s: &str) -> Rgb {
    try_parse_rgb_string(s).unwrap_or_default()
}

/// An immutable palette color.
///
/// Construct with [`Color::from_hsl`] (or the RGB/hex helpers, which go
/// through [`rgb_to_hsl`] first). Hue is reduced into `[0, 360)` and
/// saturation/lightness are capped at 100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    hsl: Hsl,
    rgb: Rgb,
    hex: Hex,
    name: String,
}

impl Color {
    pub fn from_hsl(h: u16, s: u8, l: u8) -> Self {
        let hsl = Hsl {
            h: h % 360,
            s: s.min(100),
            l: l.min(100),
        };
        let rgb = hsl_to_rgb(hsl.h, hsl.s, hsl.l);
        Self {
            hsl,
            rgb,
            hex: Hex::from_rgb(rgb),
            name: color_name(hsl.h, hsl.s, hsl.l),
        }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let hsl = rgb_to_hsl(rgb.r, rgb.g, rgb.b);
        Self::from_hsl(hsl.h, hsl.s, hsl.l)
    }

    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        Hex::parse(hex).map(|h| Self::from_rgb(h.rgb()))
    }

    /// Parses either a hex code (`#rrggbb` / `rrggbb`) or `rgb(R, G, B)`.
    pub fn parse(text: &str) -> Result<Self, PaletteError> {
        let text = text.trim();
        if text.starts_with("rgb(") {
            try_parse_rgb_string(text)
                .map(Self::from_rgb)
                .ok_or_else(|| PaletteError::InvalidColor(format!("malformed rgb string: {text}")))
        } else {
            Self::from_hex(text)
        }
    }

    pub fn hue(&self) -> u16 {
        self.hsl.h
    }

    pub fn saturation(&self) -> u8 {
        self.hsl.s
    }

    pub fn lightness(&self) -> u8 {
        self.hsl.l
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hex(&self) -> Hex {
        self.hex
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.hex, self.name)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Color", 7)?;
        st.serialize_field("name", &self.name)?;
        st.serialize_field("hex", &self.hex)?;
        st.serialize_field("hsl", &self.hsl.to_string())?;
        st.serialize_field("rgb", &self.rgb.to_string())?;
        st.serialize_field("hue", &self.hsl.h)?;
        st.serialize_field("saturation", &self.hsl.s)?;
        st.serialize_field("lightness", &self.hsl.l)?;
        st.end()
    }
}

/// Stored form of a color. Only the HSL fields are trusted; `hex` is a
/// fallback for records written without them. Everything else is ignored
/// and re-derived.
///
/// HSL fields are read as floats and rounded, since older records may hold
/// fractional hues.
#[derive(Deserialize)]
struct ColorRecord {
    hue: Option<f64>,
    saturation: Option<f64>,
    lightness: Option<f64>,
    hex: Option<String>,
}

fn stored_hue(h: f64) -> u16 {
    h.round().rem_euclid(360.0) as u16
}

fn stored_percent(v: f64) -> u8 {
    v.round().clamp(0.0, 100.0) as u8
}

impl TryFrom<ColorRecord> for Color {
    type Error = PaletteError;

    fn try_from(rec: ColorRecord) -> Result<Self, Self::Error> {
        match (rec.hue, rec.saturation, rec.lightness, rec.hex) {
            (Some(h), Some(s), Some(l), _) => Ok(Color::from_hsl(
                stored_hue(h),
                stored_percent(s),
                stored_percent(l),
            )),
            (_, _, _, Some(hex)) => Color::from_hex(&hex),
            _ => Err(PaletteError::InvalidColor(
                "record has neither hue/saturation/lightness nor hex".to_string(),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rec = ColorRecord::deserialize(deserializer)?;
        Color::try_from(rec).map_err(serde::de::Error::custom)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RenderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` (leading `#` optional). Malformed input yields `None`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self::rgb(r, g, b))
    }

    /// Hex constant used in tables; malformed input maps to black.
    pub fn hex(s: &str) -> Self {
        Self::from_hex(s).unwrap_or(Self::BLACK)
    }

    /// Parse a matplotlib-style color: single-letter shorthand, a known name,
    /// or `#rrggbb`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let named = match s.to_ascii_lowercase().as_str() {
            "b" | "blue" => "#0000ff",
            "g" | "green" => "#008000",
            "r" | "red" => "#ff0000",
            "c" | "cyan" => "#00bfbf",
            "m" | "magenta" => "#bf00bf",
            "y" | "yellow" => "#bfbf00",
            "k" | "black" => "#000000",
            "w" | "white" => "#ffffff",
            "gray" | "grey" => "#808080",
            "orange" => "#ffa500",
            "purple" => "#800080",
            "steelblue" => "#4682b4",
            "navy" => "#000080",
            "crimson" => "#dc143c",
            "darkgreen" => "#006400",
            _ => return Self::from_hex(s),
        };
        Self::from_hex(named)
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    /// Linear interpolation between two colors (for colormaps).
    pub fn lerp(a: Color, b: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: (a.r as f64 * (1.0 - t) + b.r as f64 * t).round() as u8,
            g: (a.g as f64 * (1.0 - t) + b.g as f64 * t).round() as u8,
            b: (a.b as f64 * (1.0 - t) + b.b as f64 * t).round() as u8,
            a: a.a * (1.0 - t) + b.a * t,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown color: {s}")))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// --- Colormaps ---

/// Diverging red/blue, ColorBrewer 11-class (low values red).
const RDBU: &[&str] = &[
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
    "#4393c3", "#2166ac", "#053061",
];

const VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const MAGMA: &[&str] = &[
    "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f", "#cd4071", "#f1605d", "#fd9668",
    "#feca8d", "#fcfdbf",
];

const GREYS: &[&str] = &["#ffffff", "#000000"];

const COOLWARM: &[&str] = &["#3b4cc0", "#7396f5", "#b0cbfc", "#dddddd", "#f6bfa6", "#ea7b60", "#b40426"];

/// Piecewise-linear colormap over evenly spaced anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    anchors: Vec<Color>,
}

impl Colormap {
    /// Look up a colormap by matplotlib name; a `_r` suffix reverses it.
    pub fn by_name(name: &str) -> crate::Result<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let table = match base.to_ascii_lowercase().as_str() {
            "rdbu" => RDBU,
            "viridis" => VIRIDIS,
            "magma" => MAGMA,
            "greys" | "gray" => GREYS,
            "coolwarm" => COOLWARM,
            _ => return Err(RenderError::Config(format!("unknown colormap: {name}"))),
        };
        let mut anchors: Vec<Color> = table.iter().map(|s| Color::hex(s)).collect();
        if reversed {
            anchors.reverse();
        }
        Ok(Self { name: name.to_string(), anchors })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at position `t` in [0, 1] (clamped).
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
        let segments = (self.anchors.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(self.anchors.len() - 2);
        Color::lerp(self.anchors[i], self.anchors[i + 1], pos - i as f64)
    }

    /// Color for `value` normalized to `[vmin, vmax]`; values outside are clipped.
    /// A degenerate range maps everything to the middle of the map.
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> Color {
        // Halved so that ranges near f64::MAX do not overflow.
        let half_span = vmax / 2.0 - vmin / 2.0;
        let t = if half_span.abs() < f64::EPSILON / 2.0 {
            0.5
        } else {
            (value / 2.0 - vmin / 2.0) / half_span
        };
        self.sample(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::hex("#1D4ED8");
        assert_eq!(c.r, 0x1D);
        assert_eq!(c.g, 0x4E);
        assert_eq!(c.b, 0xD8);
        assert!((c.a - 1.0).abs() < 1e-9);
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::hex("zzzzzz"), Color::BLACK);
    }

    #[test]
    fn matplotlib_shorthands() {
        assert_eq!(Color::parse("b"), Some(Color::rgb(0, 0, 255)));
        assert_eq!(Color::parse("k"), Some(Color::BLACK));
        assert_eq!(Color::parse("steelblue"), Some(Color::rgb(70, 130, 180)));
        assert_eq!(Color::parse("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::parse("not-a-color"), None);
    }

    #[test]
    fn svg_fill_alpha() {
        let c = Color::rgb(29, 78, 216).with_alpha(0.5);
        assert_eq!(c.to_svg_fill(), "rgba(29,78,216,0.500)");
        assert_eq!(Color::rgb(29, 78, 216).to_svg_fill(), "#1d4ed8");
    }

    #[test]
    fn rdbu_r_runs_blue_to_red() {
        let cmap = Colormap::by_name("RdBu_r").unwrap();
        assert_eq!(cmap.sample(0.0), Color::hex("#053061"));
        assert_eq!(cmap.sample(1.0), Color::hex("#67001f"));
        assert_eq!(cmap.sample(0.5), Color::hex("#f7f7f7"));
        let plain = Colormap::by_name("RdBu").unwrap();
        assert_eq!(plain.sample(0.0), Color::hex("#67001f"));
    }

    #[test]
    fn map_clips_to_range() {
        let cmap = Colormap::by_name("viridis").unwrap();
        assert_eq!(cmap.map(-5.0, 0.0, 1.0), cmap.sample(0.0));
        assert_eq!(cmap.map(5.0, 0.0, 1.0), cmap.sample(1.0));
        assert_eq!(cmap.map(0.3, 0.3, 0.3), cmap.sample(0.5));
        assert_eq!(cmap.map(1e308, -1e308, 1e308), cmap.sample(1.0));
        assert_eq!(cmap.map(0.0, -1e308, 1e308), cmap.sample(0.5));
    }

    #[test]
    fn unknown_colormap_is_config_error() {
        assert!(matches!(Colormap::by_name("jet"), Err(RenderError::Config(_))));
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::Color;
use crate::primitives::LineKind;
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub colors: ColorsConfig,
    pub matrix: MatrixConfig,
    pub slice: SliceConfig,
    pub output: OutputConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::Classic.base_config()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 460.8,  // 6.4" * 72
            height: 345.6, // 4.8" * 72
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
    pub title_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 10.0, tick_size: 8.5, title_size: 12.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub target_ticks: usize,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 3.5,
            target_ticks: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: false, color: Color::hex("#b0b0b0"), alpha: 0.5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Stimulus-onset reference lines.
    pub onset: Color,
    /// Chance-level reference line.
    pub chance: Color,
    pub chance_line: LineKind,
    pub text: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            onset: Color::BLACK,
            chance: Color::BLACK,
            chance_line: LineKind::Dashed,
            text: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    pub cmap: String,
    pub colorbar_width: f64,
    pub colorbar_steps: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self { cmap: "RdBu_r".into(), colorbar_width: 12.0, colorbar_steps: 64 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    pub color: String,
    pub line_width: f64,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self { color: "b".into(), line_width: 1.5 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub dpi: u32,
    /// Where `Figure::show` writes. Unset means there is nowhere to show.
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "svg".into(), dpi: 150, path: None }
    }
}

/// Resolve a VizConfig from an optional theme name and optional YAML string.
/// Priority: user YAML overrides → theme base config.
///
/// The YAML `theme` key selects the base when no theme name is passed.
pub fn resolve_config(user_yaml: Option<&str>, theme: Option<&str>) -> crate::Result<VizConfig> {
    let Some(yaml) = user_yaml else {
        return Ok(theme.map(BuiltinTheme::parse).unwrap_or(BuiltinTheme::Classic).base_config());
    };
    let value: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(yaml).map_err(|e| crate::RenderError::Config(e.to_string()))?;
    let yaml_theme = value.get("theme").and_then(|t| t.as_str()).map(str::to_string);
    let base = theme
        .or(yaml_theme.as_deref())
        .map(BuiltinTheme::parse)
        .unwrap_or(BuiltinTheme::Classic)
        .base_config();
    merge_yaml(base, value)
}

/// Overlay the keys present in `overrides` on top of `base`.
fn merge_yaml(base: VizConfig, overrides: serde_yaml_ng::Value) -> crate::Result<VizConfig> {
    let mut merged =
        serde_yaml_ng::to_value(&base).map_err(|e| crate::RenderError::Config(e.to_string()))?;
    overlay(&mut merged, overrides);
    serde_yaml_ng::from_value(merged).map_err(|e| crate::RenderError::Config(e.to_string()))
}

fn overlay(dst: &mut serde_yaml_ng::Value, src: serde_yaml_ng::Value) {
    match (dst, src) {
        (serde_yaml_ng::Value::Mapping(d), serde_yaml_ng::Value::Mapping(s)) => {
            for (k, v) in s {
                match d.get_mut(&k) {
                    Some(slot) => overlay(slot, v),
                    None => {
                        d.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

use crate::color::Color;
use crate::config::*;
use crate::primitives::LineKind;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTheme {
    Classic,
    Paper,
    Minimal,
}

impl BuiltinTheme {
    /// Unknown names fall back to the classic look.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "paper" => Self::Paper,
            "minimal" => Self::Minimal,
            _ => Self::Classic,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Classic => classic(),
            Self::Paper => paper(),
            Self::Minimal => minimal(),
        }
    }
}

fn classic() -> VizConfig {
    VizConfig {
        theme: "classic".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        colors: ColorsConfig::default(),
        matrix: MatrixConfig::default(),
        slice: SliceConfig::default(),
        output: OutputConfig::default(),
    }
}

fn paper() -> VizConfig {
    VizConfig {
        theme: "paper".into(),
        figure: FigureConfig { width: 345.6, height: 259.2 },
        font: FontConfig { size: 8.0, label_size: 8.5, tick_size: 7.0, title_size: 9.5 },
        axes: AxesConfig {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 3.0,
            target_ticks: 5,
        },
        slice: SliceConfig { color: "k".into(), line_width: 1.0 },
        output: OutputConfig { dpi: 300, ..OutputConfig::default() },
        ..classic()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        font: FontConfig { size: 9.0, label_size: 9.5, tick_size: 8.0, title_size: 11.0 },
        axes: AxesConfig { tick_length: 2.0, ..AxesConfig::default() },
        grid: GridConfig { show: true, color: Color::hex("#dddddd"), alpha: 0.8 },
        colors: ColorsConfig {
            onset: Color::hex("#808080"),
            chance: Color::hex("#808080"),
            chance_line: LineKind::Dotted,
            text: Color::hex("#333333"),
        },
        matrix: MatrixConfig { cmap: "viridis".into(), ..MatrixConfig::default() },
        slice: SliceConfig { color: "steelblue".into(), line_width: 1.5 },
        ..classic()
    }
}

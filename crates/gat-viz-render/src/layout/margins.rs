use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Space reserved around a plot area inside its panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorations {
    pub title: bool,
    /// Extra room on the right, e.g. for a colorbar.
    pub right: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Compute auto-margins for a plot drawn inside `panel` from the axis
    /// labels and config.
    pub fn auto(
        canvas: &Canvas,
        panel: &PlotArea,
        y_axis: &Axis,
        x_axis: &Axis,
        deco: Decorations,
        config: &VizConfig,
    ) -> Self {
        let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
        let outward = if config.axes.tick_direction == "in" { 0.0 } else { config.axes.tick_length };

        // Left margin: y-axis tick labels + axis label + padding
        let max_tick_w = y_axis
            .tick_labels
            .iter()
            .map(|l| canvas.measure_text(l, &tick_style).width)
            .fold(0.0_f64, f64::max);
        let mut left = 10.0 + outward + max_tick_w + 4.0;
        if !y_axis.label.is_empty() {
            left += config.font.label_size + 6.0;
        }

        // Bottom margin: x-axis tick labels + axis label + padding
        let mut bottom = 10.0 + outward + config.font.tick_size + 4.0;
        if !x_axis.label.is_empty() {
            bottom += config.font.label_size + 6.0;
        }

        let top = if deco.title { config.font.title_size * 1.3 + 10.0 } else { 12.0 };
        let right = 15.0 + deco.right;

        let width = panel.width - left - right;
        let height = panel.height - top - bottom;

        Self {
            left: panel.left + left,
            top: panel.top + top,
            width: width.max(20.0),
            height: height.max(20.0),
        }
    }

    /// Manual margins (for multi-panel layouts).
    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

use crate::canvas::Canvas;
use crate::color::Colormap;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

const GAP: f64 = 10.0;

fn tick_style(config: &VizConfig) -> TextStyle {
    TextStyle {
        size: config.font.tick_size,
        color: config.colors.text,
        anchor: TextAnchor::Start,
        baseline: TextBaseline::Central,
        ..Default::default()
    }
}

fn axis(vmin: f64, vmax: f64) -> Axis {
    Axis::fixed(vmin, vmax, 5)
}

/// Horizontal room a colorbar for `[vmin, vmax]` needs right of the plot area.
pub fn reserved_width(canvas: &Canvas, vmin: f64, vmax: f64, config: &VizConfig) -> f64 {
    let style = tick_style(config);
    let widest = axis(vmin, vmax)
        .tick_labels
        .iter()
        .map(|l| canvas.measure_text(l, &style).width)
        .fold(0.0_f64, f64::max);
    GAP + config.matrix.colorbar_width + config.axes.tick_length + 3.0 + widest
}

/// Vertical colorbar to the right of `area`, spanning its height.
pub fn draw_colorbar(
    canvas: &mut Canvas,
    area: &PlotArea,
    cmap: &Colormap,
    vmin: f64,
    vmax: f64,
    config: &VizConfig,
) {
    let x = area.right() + GAP;
    let w = config.matrix.colorbar_width;
    let steps = config.matrix.colorbar_steps.max(2);
    let step_h = area.height / steps as f64;

    // Top step is vmax.
    for i in 0..steps {
        let t = 1.0 - (i as f64 + 0.5) / steps as f64;
        let y = area.top + i as f64 * step_h;
        canvas.rect(x, y, w, step_h + 0.5, &Style::filled(cmap.sample(t)));
    }
    canvas.rect(x, area.top, w, area.height, &Style::stroked(config.colors.text, 0.6));

    let ax = axis(vmin, vmax);
    let tick_line = LineStyle::solid(config.colors.text, 0.6);
    let label_style = tick_style(config);
    let tl = config.axes.tick_length;
    for (val, label) in ax.tick_positions.iter().zip(&ax.tick_labels) {
        let py = ax.data_to_pixel(*val, area.bottom(), area.top);
        canvas.line(x + w, py, x + w + tl, py, &tick_line);
        canvas.text(x + w + tl + 3.0, py, label, &label_style);
    }
}

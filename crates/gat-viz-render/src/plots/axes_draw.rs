use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw a box frame with ticks, optional grid, tick labels and axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
) {
    let frame_color = config.colors.text;
    let frame_style = LineStyle::solid(frame_color, 0.8);
    let tick_line = LineStyle::solid(frame_color, 0.6);
    let grid_style = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    let inward = config.axes.tick_direction == "in";
    let tl = config.axes.tick_length;
    // Signed tick offset away from the frame: negative points into the area.
    let out = if inward { -tl } else { tl };

    canvas.line(area.left, area.top, area.right(), area.top, &frame_style);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &frame_style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &frame_style);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &frame_style);

    let x_label_style = TextStyle {
        size: config.font.tick_size,
        color: frame_color,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    let x_label_y = area.bottom() + out.max(0.0) + 3.0;

    for (val, label) in x_axis.tick_positions.iter().zip(&x_axis.tick_labels) {
        let px = x_axis.data_to_pixel(*val, area.left, area.right());
        if config.grid.show {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }
        canvas.line(px, area.bottom(), px, area.bottom() + out, &tick_line);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top - out, &tick_line);
        }
        canvas.text(px, x_label_y, label, &x_label_style);
    }

    let y_label_style = TextStyle {
        size: config.font.tick_size,
        color: frame_color,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let y_label_x = area.left - out.max(0.0) - 3.0;
    let mut widest = 0.0_f64;

    for (val, label) in y_axis.tick_positions.iter().zip(&y_axis.tick_labels) {
        let py = y_axis.data_to_pixel(*val, area.bottom(), area.top);
        if config.grid.show {
            canvas.line(area.left, py, area.right(), py, &grid_style);
        }
        canvas.line(area.left, py, area.left - out, py, &tick_line);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() + out, py, &tick_line);
        }
        canvas.text(y_label_x, py, label, &y_label_style);
        widest = widest.max(canvas.measure_text(label, &y_label_style).width);
    }

    let label_style = TextStyle {
        size: config.font.label_size,
        color: frame_color,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };

    if !x_axis.label.is_empty() {
        let y = x_label_y + config.font.tick_size + 4.0 + config.font.label_size;
        canvas.text(area.center_x(), y, &x_axis.label, &label_style);
    }

    if !y_axis.label.is_empty() {
        let x = y_label_x - widest - 6.0;
        let y = area.top + area.height / 2.0;
        canvas.text_rotated(x, y, &y_axis.label, &label_style, -90.0);
    }
}

/// Title centred above the plot area.
pub fn draw_title(canvas: &mut Canvas, area: &PlotArea, title: &str, config: &VizConfig) {
    let style = TextStyle {
        size: config.font.title_size,
        color: config.colors.text,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    canvas.text(area.center_x(), area.top - 6.0, title, &style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_frame_ticks_and_labels() {
        let config = VizConfig::default();
        let mut canvas = Canvas::new(300.0, 200.0).unwrap();
        let area = PlotArea::manual(50.0, 20.0, 200.0, 140.0);
        let x = Axis::fixed(0.0, 1.0, 3).with_label("Time (s)");
        let y = Axis::fixed(0.0, 1.0, 3).with_label("Classif. score (%)");
        draw_axes(&mut canvas, &area, &x, &y, &config);
        let svg = canvas.finish_svg();
        assert!(svg.contains("Time (s)"));
        assert!(svg.contains("Classif. score (%)"));
        assert!(svg.contains("rotate(-90.0"));
        // 4 frame lines + 3 ticks and 3 labels per axis + 2 axis labels
        assert_eq!(canvas.element_count(), 4 + 6 + 6 + 2);
    }
}

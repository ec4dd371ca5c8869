use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub line: LineStyle,
}

/// Legend corner inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

const CORNERS: [Corner; 4] =
    [Corner::UpperRight, Corner::UpperLeft, Corner::LowerLeft, Corner::LowerRight];

/// Pick the corner whose legend box covers the fewest of `points` (pixels).
/// Ties go to the earlier corner in upper-right, upper-left, lower-left,
/// lower-right order.
pub fn best_corner(area: &PlotArea, size: (f64, f64), points: &[(f64, f64)]) -> Corner {
    let mut best = Corner::UpperRight;
    let mut best_hits = usize::MAX;
    for corner in CORNERS {
        let (lx, ly) = origin(area, size, corner);
        let hits = points
            .iter()
            .filter(|(x, y)| *x >= lx && *x <= lx + size.0 && *y >= ly && *y <= ly + size.1)
            .count();
        if hits < best_hits {
            best = corner;
            best_hits = hits;
        }
    }
    best
}

fn origin(area: &PlotArea, size: (f64, f64), corner: Corner) -> (f64, f64) {
    const INSET: f64 = 5.0;
    let left = area.left + INSET;
    let right = area.right() - size.0 - INSET;
    let top = area.top + INSET;
    let bottom = area.bottom() - size.1 - INSET;
    match corner {
        Corner::UpperRight => (right, top),
        Corner::UpperLeft => (left, top),
        Corner::LowerLeft => (left, bottom),
        Corner::LowerRight => (right, bottom),
    }
}

struct Metrics {
    row_height: f64,
    swatch_w: f64,
    gap: f64,
    padding: f64,
    text_style: TextStyle,
}

fn metrics(font_size: f64) -> Metrics {
    Metrics {
        row_height: font_size + 4.0,
        swatch_w: 18.0,
        gap: 6.0,
        padding: 6.0,
        text_style: TextStyle {
            size: font_size * 0.85,
            baseline: TextBaseline::Central,
            ..Default::default()
        },
    }
}

/// Box size of a legend with these entries.
pub fn legend_size(canvas: &Canvas, entries: &[LegendEntry], font_size: f64) -> (f64, f64) {
    let m = metrics(font_size);
    let max_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &m.text_style).width)
        .fold(0.0_f64, f64::max);
    (
        m.padding + m.swatch_w + m.gap + max_w + m.padding,
        m.padding + entries.len() as f64 * m.row_height + m.padding,
    )
}

/// Draw a legend in the plot area, placed in the corner that hides the fewest
/// data points. Returns the corner used.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[LegendEntry],
    data_points: &[(f64, f64)],
    font_size: f64,
    text_color: Color,
) -> Option<Corner> {
    if entries.is_empty() {
        return None;
    }
    let m = metrics(font_size);
    let size = legend_size(canvas, entries, font_size);
    let corner = best_corner(area, size, data_points);
    let (lx, ly) = origin(area, size, corner);

    let bg_style = Style {
        fill: Some(Color::rgba(255, 255, 255, 0.8)),
        stroke: Some(Color::rgb(204, 204, 204)),
        stroke_width: 0.5,
        opacity: 1.0,
    };
    canvas.rect(lx, ly, size.0, size.1, &bg_style);

    let text_style = TextStyle { color: text_color, ..m.text_style };
    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + m.padding + i as f64 * m.row_height + m.row_height / 2.0;
        let sx = lx + m.padding;
        canvas.line(sx, ey, sx + m.swatch_w, ey, &entry.line);
        canvas.text(sx + m.swatch_w + m.gap, ey, &entry.label, &text_style);
    }
    Some(corner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_corner_avoids_data() {
        let area = PlotArea::manual(0.0, 0.0, 200.0, 100.0);
        // A rising line crowds the lower-left and upper-right corners.
        let pts: Vec<(f64, f64)> =
            (0..=20).map(|i| (i as f64 * 10.0, 100.0 - i as f64 * 5.0)).collect();
        let c = best_corner(&area, (60.0, 30.0), &pts);
        assert!(matches!(c, Corner::UpperLeft | Corner::LowerRight));
    }

    #[test]
    fn empty_data_prefers_upper_right() {
        let area = PlotArea::manual(0.0, 0.0, 200.0, 100.0);
        assert_eq!(best_corner(&area, (60.0, 30.0), &[]), Corner::UpperRight);
    }

    #[test]
    fn empty_legend_draws_nothing() {
        let mut canvas = Canvas::new(200.0, 100.0).unwrap();
        let area = PlotArea::manual(0.0, 0.0, 200.0, 100.0);
        assert!(draw_legend(&mut canvas, &area, &[], &[], 10.0, Color::BLACK).is_none());
        assert_eq!(canvas.element_count(), 0);
    }
}

use std::borrow::Cow;

use gat_viz::GatResults;

use crate::color::Colormap;
use crate::config::VizConfig;
use crate::figure::{Artist, Figure, MatrixArtist};
use crate::layout::axes::Axis;
use crate::layout::margins::{Decorations, PlotArea};
use crate::plots::axes_draw::{draw_axes, draw_title};
use crate::plots::colorbar;
use crate::plots::{draw_on, finite_limit, lerp};
use crate::primitives::*;

pub const XLABEL: &str = "Testing Time (s)";
pub const YLABEL: &str = "Training Time (s)";

/// Options of [`plot_gat_matrix`]. Unset limits come from the data.
#[derive(Debug, Clone)]
pub struct MatrixOptions {
    pub title: Option<String>,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// `[test_min, test_max, train_min, train_max]`.
    pub tlim: Option<[f64; 4]>,
    /// Colormap name; `None` uses `matrix.cmap` from the config.
    pub cmap: Option<String>,
    pub show: bool,
    pub colorbar: bool,
    pub xlabel: bool,
    pub ylabel: bool,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            title: None,
            vmin: None,
            vmax: None,
            tlim: None,
            cmap: None,
            show: true,
            colorbar: true,
            xlabel: true,
            ylabel: true,
        }
    }
}

/// Draw the train x test score grid as a heatmap.
///
/// Row `i` of the grid is drawn at training time, bottom row first, and its
/// cells split the testing range evenly, so ragged rows keep their own
/// resolution. Values are clipped to `[vmin, vmax]`; non-finite cells stay
/// blank. Draws into the selected panel of `target`, or a new figure; on error
/// `target` is left as it was.
pub fn plot_gat_matrix<'a>(
    results: &GatResults,
    opts: &MatrixOptions,
    target: Option<&'a mut Figure>,
    config: &VizConfig,
) -> crate::Result<Cow<'a, Figure>> {
    let scores = results.scores()?;

    let (vmin, vmax) = match (opts.vmin, opts.vmax) {
        (Some(lo), Some(hi)) => (lo, hi),
        (lo, hi) => {
            let (data_lo, data_hi) = results.score_range()?;
            (lo.unwrap_or(data_lo), hi.unwrap_or(data_hi))
        }
    };
    let (vmin, vmax) = (finite_limit("vmin", vmin)?, finite_limit("vmax", vmax)?);
    let mut tlim = match opts.tlim {
        Some(t) => t,
        None => results.default_tlim()?,
    };
    for t in &mut tlim {
        *t = finite_limit("tlim", *t)?;
    }
    let cmap_name = opts.cmap.as_deref().unwrap_or(config.matrix.cmap.as_str());
    let cmap = Colormap::by_name(cmap_name)?;
    tracing::debug!(vmin, vmax, ?tlim, cmap = cmap.name(), "plot_gat_matrix");

    let xlabel = opts.xlabel.then(|| XLABEL.to_string());
    let ylabel = opts.ylabel.then(|| YLABEL.to_string());
    let target_ticks = config.axes.target_ticks;
    let x_axis = Axis::fixed(tlim[0], tlim[1], target_ticks)
        .with_label(xlabel.clone().unwrap_or_default());
    let y_axis = Axis::fixed(tlim[2], tlim[3], target_ticks)
        .with_label(ylabel.clone().unwrap_or_default());

    let fig = draw_on(target, config, |fig| {
        let panel = fig.current_area();
        let canvas = fig.canvas_mut();
        let deco = Decorations {
            title: opts.title.is_some(),
            right: if opts.colorbar {
                colorbar::reserved_width(canvas, vmin, vmax, config)
            } else {
                0.0
            },
        };
        let area = PlotArea::auto(canvas, &panel, &y_axis, &x_axis, deco, config);

        canvas.push_clip(area.left, area.top, area.width, area.height);

        // Image extent follows tlim as given, so reversed limits flip the image.
        let to_px = |t: f64| x_axis.data_to_pixel(t, area.left, area.right());
        let to_py = |t: f64| y_axis.data_to_pixel(t, area.bottom(), area.top);
        let n_rows = scores.len();
        let mut painted = 0usize;
        for (i, row) in scores.iter().enumerate() {
            let y0 = lerp(tlim[2], tlim[3], i as f64 / n_rows as f64);
            let y1 = lerp(tlim[2], tlim[3], (i + 1) as f64 / n_rows as f64);
            let (py0, py1) = (to_py(y0), to_py(y1));
            let n_cols = row.len();
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    continue;
                }
                let x0 = lerp(tlim[0], tlim[1], j as f64 / n_cols as f64);
                let x1 = lerp(tlim[0], tlim[1], (j + 1) as f64 / n_cols as f64);
                let (px0, px1) = (to_px(x0), to_px(x1));
                // Cells overlap by a hair so anti-aliasing leaves no seams.
                canvas.rect(
                    px0.min(px1),
                    py0.min(py1),
                    (px1 - px0).abs() + 0.3,
                    (py1 - py0).abs() + 0.3,
                    &Style::filled(cmap.map(value, vmin, vmax)),
                );
                painted += 1;
            }
        }

        // Stimulus onset.
        let onset = LineStyle::solid(config.colors.onset, 1.0);
        if x_axis.contains(0.0) {
            let px = to_px(0.0);
            canvas.line(px, area.top, px, area.bottom(), &onset);
        }
        if y_axis.contains(0.0) {
            let py = to_py(0.0);
            canvas.line(area.left, py, area.right(), py, &onset);
        }
        canvas.pop_clip();

        draw_axes(canvas, &area, &x_axis, &y_axis, config);
        if let Some(title) = &opts.title {
            draw_title(canvas, &area, title, config);
        }
        if opts.colorbar {
            colorbar::draw_colorbar(canvas, &area, &cmap, vmin, vmax, config);
        }

        let panel_index = fig.current_panel();
        fig.push_artist(Artist::Matrix(MatrixArtist {
            panel: panel_index,
            vmin,
            vmax,
            tlim,
            cmap: cmap.name().to_string(),
            painted_cells: painted,
            colorbar: opts.colorbar,
            title: opts.title.clone(),
            xlabel,
            ylabel,
        }));
    })?;

    if opts.show {
        fig.show()?;
    }
    Ok(fig)
}

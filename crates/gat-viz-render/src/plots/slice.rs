use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use gat_viz::{ChanceLevel, GatResults, ScorerKind, TrainTimeSelector, chance_level, gat_slice};

use crate::RenderError;
use crate::color::Color;
use crate::config::VizConfig;
use crate::figure::{Artist, Figure, SliceArtist};
use crate::layout::axes::{Axis, padded_limits};
use crate::layout::legend::{self, LegendEntry};
use crate::layout::margins::{Decorations, PlotArea};
use crate::plots::axes_draw::{draw_axes, draw_title};
use crate::plots::{draw_on, finite_limit};
use crate::primitives::*;

pub const XLABEL: &str = "Time (s)";
pub const SCORE_LABEL: &str = "Classif. score";
pub const CHANCE_LABEL: &str = "Chance level";

/// Chance-level reference line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ChanceOption {
    /// Derive it from the scorer.
    #[default]
    Auto,
    Off,
    Level(f64),
}

impl FromStr for ChanceOption {
    type Err = RenderError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "true" => Ok(Self::Auto),
            "off" | "false" | "none" => Ok(Self::Off),
            other => other
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Level)
                .ok_or_else(|| {
                    RenderError::Config(format!("chance must be auto, off or a number, got {s:?}"))
                }),
        }
    }
}

impl fmt::Display for ChanceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Off => f.write_str("off"),
            Self::Level(v) => write!(f, "{v}"),
        }
    }
}

/// Options of [`plot_gat_slice`].
#[derive(Debug, Clone)]
pub struct SliceOptions {
    pub train_time: TrainTimeSelector,
    pub title: Option<String>,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
    pub show: bool,
    /// Line color; `None` uses `slice.color` from the config.
    pub color: Option<String>,
    pub xlabel: bool,
    pub ylabel: bool,
    pub legend: bool,
    pub chance: ChanceOption,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            train_time: TrainTimeSelector::Diagonal,
            title: None,
            xmin: None,
            xmax: None,
            ymin: None,
            ymax: None,
            show: true,
            color: None,
            xlabel: true,
            ylabel: true,
            legend: true,
            chance: ChanceOption::Auto,
        }
    }
}

/// Y label for the scorer: AUC scorers say so, everything else reads as a
/// percentage.
pub fn score_label(kind: ScorerKind) -> String {
    match kind {
        ScorerKind::AucRoc => format!("{SCORE_LABEL} (AUC)"),
        _ => format!("{SCORE_LABEL} (%)"),
    }
}

/// Draw one slice of the score grid (the diagonal or one classifier's row) as
/// a line, with the chance level as a dashed reference.
///
/// The y range defaults to the finite extent of the slice. The x range is
/// `[xmin, xmax]` only when both are given. On error `target` is left as it was.
pub fn plot_gat_slice<'a>(
    results: &GatResults,
    opts: &SliceOptions,
    target: Option<&'a mut Figure>,
    config: &VizConfig,
) -> crate::Result<Cow<'a, Figure>> {
    results.scores()?;
    let slice = gat_slice(results, opts.train_time)?;

    let color_name = opts.color.as_deref().unwrap_or(config.slice.color.as_str());
    let line_color = Color::parse(color_name)
        .ok_or_else(|| RenderError::Config(format!("unknown color: {color_name}")))?;

    let user_limit = |name: &str, v: Option<f64>| v.map(|v| finite_limit(name, v)).transpose();
    let (xmin, xmax) = (user_limit("xmin", opts.xmin)?, user_limit("xmax", opts.xmax)?);
    let (ymin, ymax) = (user_limit("ymin", opts.ymin)?, user_limit("ymax", opts.ymax)?);

    let mut warning = None;
    let chance = match opts.chance {
        ChanceOption::Off => None,
        ChanceOption::Level(v) => Some(v).filter(|v| v.is_finite()),
        ChanceOption::Auto => match chance_level(results) {
            ChanceLevel::Known { value } => Some(value),
            unknown => {
                warning = unknown.warning();
                None
            }
        },
    };

    let (data_lo, data_hi) = slice.score_range().unwrap_or((0.0, 1.0));
    let ylim = padded_limits(ymin.unwrap_or(data_lo), ymax.unwrap_or(data_hi));
    let xlim = match (xmin, xmax) {
        (Some(lo), Some(hi)) => padded_limits(lo, hi),
        _ => {
            let ax = Axis::spanning(&slice.times, 2);
            (ax.min, ax.max)
        }
    };
    tracing::debug!(
        selector = %opts.train_time,
        points = slice.scores.len(),
        ?chance,
        ?xlim,
        ?ylim,
        "plot_gat_slice"
    );

    let xlabel = opts.xlabel.then(|| XLABEL.to_string());
    let ylabel = opts.ylabel.then(|| score_label(results.scorer.kind));
    let target_ticks = config.axes.target_ticks;
    let x_axis =
        Axis::fixed(xlim.0, xlim.1, target_ticks).with_label(xlabel.clone().unwrap_or_default());
    let y_axis =
        Axis::fixed(ylim.0, ylim.1, target_ticks).with_label(ylabel.clone().unwrap_or_default());

    let fig = draw_on(target, config, |fig| {
        if let Some(w) = warning {
            tracing::warn!("{w}");
            fig.push_warning(w);
        }
        let panel = fig.current_area();
        let canvas = fig.canvas_mut();
        let deco = Decorations { title: opts.title.is_some(), right: 0.0 };
        let area = PlotArea::auto(canvas, &panel, &y_axis, &x_axis, deco, config);

        let points: Vec<(f64, f64)> = slice
            .times
            .iter()
            .zip(&slice.scores)
            .map(|(&t, &s)| {
                (
                    x_axis.data_to_pixel(t, area.left, area.right()),
                    y_axis.data_to_pixel(s, area.bottom(), area.top),
                )
            })
            .collect();

        canvas.push_clip(area.left, area.top, area.width, area.height);
        let score_style = LineStyle::solid(line_color, config.slice.line_width);
        canvas.polyline(&points, &score_style);
        let chance_style =
            LineStyle::of_kind(config.colors.chance, 1.0, config.colors.chance_line);
        if let Some(level) = chance {
            let py = y_axis.data_to_pixel(level, area.bottom(), area.top);
            canvas.line(area.left, py, area.right(), py, &chance_style);
        }
        canvas.pop_clip();

        draw_axes(canvas, &area, &x_axis, &y_axis, config);
        if let Some(title) = &opts.title {
            draw_title(canvas, &area, title, config);
        }

        let mut entries = vec![LegendEntry { label: SCORE_LABEL.to_string(), line: score_style }];
        if chance.is_some() {
            entries.push(LegendEntry { label: CHANCE_LABEL.to_string(), line: chance_style });
        }
        let legend_labels = if opts.legend {
            legend::draw_legend(
                canvas,
                &area,
                &entries,
                &points,
                config.font.size,
                config.colors.text,
            );
            entries.into_iter().map(|e| e.label).collect()
        } else {
            Vec::new()
        };

        let panel_index = fig.current_panel();
        fig.push_artist(Artist::Slice(SliceArtist {
            panel: panel_index,
            slice: slice.kind,
            times: slice.times,
            scores: slice.scores,
            color: color_name.to_string(),
            chance,
            xlim,
            ylim,
            title: opts.title.clone(),
            xlabel,
            ylabel,
            legend: legend_labels,
        }));
    })?;

    if opts.show {
        fig.show()?;
    }
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use gat_viz::{Label, Scorer, SliceKind, TestTimes, TrainTimes, Warning};

    fn results(scorer: &str, labels: &[i64]) -> GatResults {
        let times = vec![-0.1, 0.0, 0.1, 0.2];
        GatResults {
            scores: Some(vec![
                vec![0.50, 0.52, 0.48, 0.51],
                vec![0.49, 0.70, 0.60, 0.55],
                vec![0.51, 0.62, 0.80, 0.66],
                vec![0.50, 0.58, 0.64, 0.75],
            ]),
            train_times: TrainTimes { times: times.clone(), step: 0.1 },
            test_times: TestTimes { times: vec![times; 4] },
            scorer: Scorer::named(scorer),
            y_train: labels.iter().map(|&l| Label::Int(l)).collect(),
        }
    }

    fn quiet() -> SliceOptions {
        SliceOptions { show: false, ..Default::default() }
    }

    fn slice_artist(fig: &Figure) -> &SliceArtist {
        match fig.artists().last() {
            Some(Artist::Slice(s)) => s,
            other => panic!("expected a slice artist, got {other:?}"),
        }
    }

    #[test]
    fn diagonal_with_accuracy_chance() {
        let r = results("accuracy_score", &[0, 1, 2, 3, 0, 1]);
        let fig = plot_gat_slice(&r, &quiet(), None, &VizConfig::default()).unwrap();
        let s = slice_artist(&fig);
        assert_eq!(s.slice, SliceKind::Diagonal);
        assert_eq!(s.scores, vec![0.50, 0.70, 0.80, 0.75]);
        assert_abs_diff_eq!(s.chance.unwrap(), 0.25, epsilon = 1e-12);
        assert_eq!(s.ylim, (0.50, 0.80));
        assert_eq!(s.xlim, (-0.1, 0.2));
        assert_eq!(s.ylabel.as_deref(), Some("Classif. score (%)"));
        assert_eq!(s.legend, vec![SCORE_LABEL, CHANCE_LABEL]);
        assert!(fig.warnings().is_empty());
        let svg = fig.to_svg();
        assert!(svg.contains(r#"stroke-dasharray="6 3""#));
    }

    #[test]
    fn auc_scorer_labels_and_chance() {
        let r = results("roc_auc_score", &[0, 1]);
        let fig = plot_gat_slice(&r, &quiet(), None, &VizConfig::default()).unwrap();
        let s = slice_artist(&fig);
        assert_eq!(s.chance, Some(0.5));
        assert_eq!(s.ylabel.as_deref(), Some("Classif. score (AUC)"));
    }

    #[test]
    fn unknown_scorer_warns_and_skips_chance() {
        let r = results("my_custom_scorer", &[0, 1]);
        let fig = plot_gat_slice(&r, &quiet(), None, &VizConfig::default()).unwrap();
        let s = slice_artist(&fig);
        assert_eq!(s.chance, None);
        assert_eq!(s.legend, vec![SCORE_LABEL]);
        assert_eq!(
            fig.warnings(),
            &[Warning::ChanceLevelUnknown { scorer: "my_custom_scorer".into() }]
        );
        assert!(!fig.to_svg().contains(CHANCE_LABEL));
    }

    #[test]
    fn explicit_and_disabled_chance() {
        let r = results("my_custom_scorer", &[]);
        let opts = SliceOptions { chance: ChanceOption::Level(0.6), ..quiet() };
        let fig = plot_gat_slice(&r, &opts, None, &VizConfig::default()).unwrap();
        assert_eq!(slice_artist(&fig).chance, Some(0.6));
        assert!(fig.warnings().is_empty());

        let r = results("accuracy_score", &[0, 1]);
        let opts = SliceOptions { chance: ChanceOption::Off, ..quiet() };
        let fig = plot_gat_slice(&r, &opts, None, &VizConfig::default()).unwrap();
        assert_eq!(slice_artist(&fig).chance, None);
    }

    #[test]
    fn classifier_row() {
        let r = results("accuracy_score", &[0, 1]);
        let opts = SliceOptions { train_time: TrainTimeSelector::Time(0.1), ..quiet() };
        let fig = plot_gat_slice(&r, &opts, None, &VizConfig::default()).unwrap();
        let s = slice_artist(&fig);
        assert_eq!(s.slice, SliceKind::Classifier { index: 2, train_time: 0.1 });
        assert_eq!(s.scores, vec![0.51, 0.62, 0.80, 0.66]);
    }

    #[test]
    fn first_classifier_is_not_found() {
        let r = results("accuracy_score", &[0, 1]);
        let opts = SliceOptions { train_time: TrainTimeSelector::Time(-0.1), ..quiet() };
        let err = plot_gat_slice(&r, &opts, None, &VizConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Gat(gat_viz::Error::NoClassifierAtTime(t)) if t == -0.1));
    }

    #[test]
    fn failed_call_leaves_target_untouched() {
        let config = VizConfig::default();
        let r = results("accuracy_score", &[0, 1]);
        let mut target = Figure::subplots(config.clone(), 1, 2).unwrap();
        plot_gat_slice(&r, &quiet(), Some(&mut target), &config).unwrap();
        target.select(1).unwrap();
        let before = target.to_svg();

        let first = SliceOptions { train_time: TrainTimeSelector::Time(-0.1), ..quiet() };
        assert!(plot_gat_slice(&r, &first, Some(&mut target), &config).is_err());
        let mut unscored = r.clone();
        unscored.scores = None;
        assert!(plot_gat_slice(&unscored, &quiet(), Some(&mut target), &config).is_err());

        assert_eq!(target.to_svg(), before);
        assert_eq!(target.artists().len(), 1);

        plot_gat_slice(&r, &quiet(), Some(&mut target), &config).unwrap();
        assert_eq!(slice_artist(&target).panel, 1);
    }

    #[test]
    fn extreme_scores_render() {
        let times = vec![0.0, 0.1];
        let r = GatResults {
            scores: Some(vec![vec![-1e308, 0.0], vec![0.0, 1e308]]),
            train_times: TrainTimes { times: times.clone(), step: 0.1 },
            test_times: TestTimes { times: vec![times; 2] },
            scorer: Scorer::named("roc_auc_score"),
            y_train: Vec::new(),
        };
        let fig = plot_gat_slice(&r, &quiet(), None, &VizConfig::default()).unwrap();
        let s = slice_artist(&fig);
        assert_eq!(s.scores, vec![-1e308, 1e308]);
        assert_eq!(s.ylim, (-1e308, 1e308));
    }

    #[test]
    fn non_finite_limits_are_rejected() {
        let r = results("accuracy_score", &[0, 1]);
        let config = VizConfig::default();
        for opts in [
            SliceOptions { ymax: Some(f64::INFINITY), ..quiet() },
            SliceOptions { ymin: Some(f64::NAN), ..quiet() },
            SliceOptions { xmin: Some(0.0), xmax: Some(f64::NAN), ..quiet() },
        ] {
            let err = plot_gat_slice(&r, &opts, None, &config).unwrap_err();
            assert!(matches!(err, RenderError::Layout(_)), "{err}");
        }
    }

    #[test]
    fn unscored_fails() {
        let mut r = results("accuracy_score", &[0, 1]);
        r.scores = None;
        let err = plot_gat_slice(&r, &quiet(), None, &VizConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Gat(gat_viz::Error::NotScored)));
    }

    #[test]
    fn limits_and_toggles() {
        let r = results("accuracy_score", &[0, 1]);
        let opts = SliceOptions {
            xmin: Some(0.0),
            ymin: Some(0.0),
            ymax: Some(1.0),
            legend: false,
            ylabel: false,
            color: Some("r".into()),
            ..quiet()
        };
        let fig = plot_gat_slice(&r, &opts, None, &VizConfig::default()).unwrap();
        let s = slice_artist(&fig);
        // xmin alone does not set the x range.
        assert_eq!(s.xlim, (-0.1, 0.2));
        assert_eq!(s.ylim, (0.0, 1.0));
        assert!(s.legend.is_empty());
        assert!(s.ylabel.is_none());
        assert!(fig.to_svg().contains(r##"stroke="#ff0000""##));

        let opts = SliceOptions { xmin: Some(0.0), xmax: Some(0.1), ..quiet() };
        let fig = plot_gat_slice(&r, &opts, None, &VizConfig::default()).unwrap();
        assert_eq!(slice_artist(&fig).xlim, (0.0, 0.1));
    }

    #[test]
    fn unknown_color_is_config_error() {
        let r = results("accuracy_score", &[0, 1]);
        let opts = SliceOptions { color: Some("chartreuse-ish".into()), ..quiet() };
        assert!(matches!(
            plot_gat_slice(&r, &opts, None, &VizConfig::default()),
            Err(RenderError::Config(_))
        ));
    }

    #[test]
    fn chance_option_parsing() {
        assert_eq!("auto".parse::<ChanceOption>().unwrap(), ChanceOption::Auto);
        assert_eq!("OFF".parse::<ChanceOption>().unwrap(), ChanceOption::Off);
        assert_eq!("0.33".parse::<ChanceOption>().unwrap(), ChanceOption::Level(0.33));
        assert!("maybe".parse::<ChanceOption>().is_err());
    }
}

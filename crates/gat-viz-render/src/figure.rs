use std::path::{Path, PathBuf};

use gat_viz::{SliceKind, Warning};
use serde::Serialize;

use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::layout::multi_panel::PanelGrid;
use crate::output;

/// What a renderer drew on a panel, with every limit resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artist {
    Matrix(MatrixArtist),
    Slice(SliceArtist),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixArtist {
    pub panel: usize,
    pub vmin: f64,
    pub vmax: f64,
    /// `[test_min, test_max, train_min, train_max]`.
    pub tlim: [f64; 4],
    pub cmap: String,
    pub painted_cells: usize,
    pub colorbar: bool,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceArtist {
    pub panel: usize,
    pub slice: SliceKind,
    pub times: Vec<f64>,
    pub scores: Vec<f64>,
    pub color: String,
    /// Height of the chance line, if one was drawn.
    pub chance: Option<f64>,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub legend: Vec<String>,
}

/// A drawing surface split into panels, plus a record of what was drawn.
///
/// Renderers draw into the selected panel and hand the figure back, so one
/// figure can be threaded through several calls.
#[derive(Debug, Clone)]
pub struct Figure {
    config: VizConfig,
    canvas: Canvas,
    grid: PanelGrid,
    current: usize,
    artists: Vec<Artist>,
    warnings: Vec<Warning>,
}

impl Figure {
    /// Single-panel figure sized from `config.figure`.
    pub fn new(config: VizConfig) -> crate::Result<Self> {
        Self::subplots(config, 1, 1)
    }

    /// `rows x cols` panels; each panel has the configured figure size.
    pub fn subplots(config: VizConfig, rows: usize, cols: usize) -> crate::Result<Self> {
        let width = config.figure.width * cols as f64;
        let height = config.figure.height * rows as f64;
        let grid = PanelGrid::new(width, height, rows, cols)?;
        let canvas = Canvas::new(width, height)?;
        Ok(Self { config, canvas, grid, current: 0, artists: Vec::new(), warnings: Vec::new() })
    }

    /// Make `panel` (row-major index) the target of the next renderer call.
    pub fn select(&mut self, panel: usize) -> crate::Result<()> {
        if panel >= self.grid.len() {
            return Err(crate::RenderError::Layout(format!(
                "panel {panel} out of range for a {}x{} figure",
                self.grid.rows, self.grid.cols
            )));
        }
        self.current = panel;
        Ok(())
    }

    pub fn current_panel(&self) -> usize {
        self.current
    }

    pub fn n_panels(&self) -> usize {
        self.grid.len()
    }

    /// Canvas region of the selected panel.
    pub fn current_area(&self) -> PlotArea {
        self.grid.cell(self.current).copied().unwrap_or(PlotArea::manual(
            0.0,
            0.0,
            self.canvas.width,
            self.canvas.height,
        ))
    }

    pub fn size(&self) -> (f64, f64) {
        (self.canvas.width, self.canvas.height)
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub(crate) fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub(crate) fn push_artist(&mut self, artist: Artist) {
        self.artists.push(artist);
    }

    pub(crate) fn push_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn to_svg(&self) -> String {
        self.canvas.finish_svg()
    }

    /// Encode in `format` (`svg`, `png`, `pdf`).
    pub fn to_bytes(&self, format: &str) -> crate::Result<Vec<u8>> {
        output::encode(&self.to_svg(), format, &self.config)
    }

    /// Write to `path`; the format comes from the extension, falling back to
    /// `output.format`.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(self.config.output.format.as_str())
            .to_ascii_lowercase();
        if format == "svg" {
            return output::svg::save_svg(&self.to_svg(), path);
        }
        let bytes = self.to_bytes(&format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Show the figure: write it to `output.path` when one is configured.
    /// Returns the path written, if any.
    pub fn show(&self) -> crate::Result<Option<PathBuf>> {
        match &self.config.output.path {
            Some(path) => {
                self.save(path)?;
                tracing::info!(path = %path.display(), "figure written");
                Ok(Some(path.clone()))
            }
            None => {
                tracing::debug!(artists = self.artists.len(), "no output path configured, nothing to show");
                Ok(None)
            }
        }
    }
}

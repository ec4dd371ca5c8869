//! # gat-viz-render
//!
//! SVG rendering of generalization-across-time results: the train x test
//! score matrix ([`plot_gat_matrix`]) and 1-D slices of it
//! ([`plot_gat_slice`]). Drawing goes through a [`Figure`] that can hold a
//! grid of panels, so both plots can share one output.

pub mod canvas;
pub mod color;
pub mod config;
pub mod figure;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use thiserror::Error;

pub use config::{VizConfig, resolve_config};
pub use figure::{Artist, Figure, MatrixArtist, SliceArtist};
pub use plots::matrix::{MatrixOptions, plot_gat_matrix};
pub use plots::slice::{ChanceOption, SliceOptions, plot_gat_slice};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Gat(#[from] gat_viz::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

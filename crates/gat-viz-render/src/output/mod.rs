#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "png")]
pub mod png;
pub mod svg;

use crate::RenderError;
use crate::config::VizConfig;

/// Encode a finished SVG document in `format` (`svg`, `png`, `pdf`).
pub fn encode(svg: &str, format: &str, config: &VizConfig) -> crate::Result<Vec<u8>> {
    match format.to_ascii_lowercase().as_str() {
        "svg" => Ok(svg.as_bytes().to_vec()),
        #[cfg(feature = "png")]
        "png" => png::svg_to_png(svg, config.output.dpi),
        #[cfg(feature = "pdf")]
        "pdf" => pdf::svg_to_pdf(svg),
        other => {
            let _ = config;
            Err(RenderError::UnknownFormat(other.to_string()))
        }
    }
}

pub mod colorbar;
pub mod matrix;
pub mod slice;

mod axes_draw;

use std::borrow::Cow;

use crate::RenderError;
use crate::config::VizConfig;
use crate::figure::Figure;

/// Run `draw` on `target`, or on a new figure when there is none.
///
/// Renderers resolve every fallible parameter before calling this, so a
/// borrowed target is only touched once drawing can no longer fail.
pub(crate) fn draw_on<'a>(
    target: Option<&'a mut Figure>,
    config: &VizConfig,
    draw: impl FnOnce(&mut Figure),
) -> crate::Result<Cow<'a, Figure>> {
    match target {
        Some(fig) => {
            draw(&mut *fig);
            Ok(Cow::Borrowed(fig))
        }
        None => {
            let mut fig = Figure::new(config.clone())?;
            draw(&mut fig);
            Ok(Cow::Owned(fig))
        }
    }
}

/// User-supplied plot limits must be finite.
pub(crate) fn finite_limit(name: &str, value: f64) -> crate::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RenderError::Layout(format!("{name} must be finite, got {value}")))
    }
}

/// Point at fraction `f` between `a` and `b`, without forming `b - a`.
pub(crate) fn lerp(a: f64, b: f64, f: f64) -> f64 {
    a * (1.0 - f) + b * f
}

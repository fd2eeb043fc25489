//! Chart files.
//!
//! Both renderers draw through a generic `DrawingBackend`, so the same code
//! produces SVG (`OutputFormat::Vector`) and PNG (`OutputFormat::Raster`).

use std::ops::Range;
use std::path::Path;

use plotters::drawing::DrawingAreaErrorKind;

use crate::error::{PlotError, Result};

pub mod alpha;
pub mod beta;

/// Run `$draw` on an SVG or PNG root area for `$path`, mapping backend errors.
macro_rules! render_to {
    ($format:expr, $path:expr, $size:expr, |$root:ident| $draw:expr) => {{
        use plotters::prelude::{BitMapBackend, IntoDrawingArea, SVGBackend};
        let path: &std::path::Path = $path;
        $crate::render::prepare_output(path)?;
        match $format {
            $crate::config::OutputFormat::Vector => {
                let $root = SVGBackend::new(path, $size).into_drawing_area();
                $draw.map_err(|e| $crate::render::render_error(path, e))
            }
            $crate::config::OutputFormat::Raster => {
                let $root = BitMapBackend::new(path, $size).into_drawing_area();
                $draw.map_err(|e| $crate::render::render_error(path, e))
            }
        }
    }};
}
pub(crate) use render_to;

pub use alpha::render_alpha_chart;
pub use beta::render_beta_chart;

pub(crate) fn prepare_output(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PlotError::io(parent, e))?;
    }
    Ok(())
}

pub(crate) fn render_error<E>(path: &Path, e: DrawingAreaErrorKind<E>) -> PlotError
where
    E: std::error::Error + Send + Sync,
{
    PlotError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// `[min, max]` of `values` widened by `pad` of the span on each side.
/// Degenerate spans are widened by `fallback` instead.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64, fallback: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON * hi.abs().max(1.0) {
        return (lo - fallback)..(hi + fallback);
    }
    (lo - span * pad)..(hi + span * pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range(Vec::<f64>::new(), 0.05, 1.0), 0.0..1.0);
        assert_eq!(padded_range([3.0], 0.05, 1.0), 2.0..4.0);
        let r = padded_range([0.0, 10.0, 5.0], 0.1, 1.0);
        assert_eq!(r, -1.0..11.0);
    }
}

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use super::{padded_range, render_to};
use crate::color::generate_palette;
use crate::config::AlphaConfig;
use crate::data::model::{AlphaSeriesSet, Method};
use crate::error::Result;

// ---------------------------------------------------------------------------
// α(r) chart: one line per file-count
// ---------------------------------------------------------------------------

/// Draw every series of `method` into `path`.
///
/// The title comes from `cfg.titles`; a method without one fails before
/// anything is written. Series are drawn in ascending file-count order and
/// each series keeps its file order.
pub fn render_alpha_chart(
    series: &AlphaSeriesSet,
    method: Method,
    cfg: &AlphaConfig,
    path: &Path,
) -> Result<()> {
    let title = cfg.title_for(method)?;
    render_to!(cfg.format, path, (cfg.width, cfg.height), |root| {
        draw_alpha(root, series, title, cfg)
    })?;
    log::info!("{method}: wrote {} ({} series)", path.display(), series.len());
    Ok(())
}

fn draw_alpha<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &AlphaSeriesSet,
    title: &str,
    cfg: &AlphaConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let all_points = || series.values().flat_map(|s| s.points.iter());
    let x_range = padded_range(all_points().map(|p| p.r as f64), 0.0, 1.0);
    let y_range = padded_range(all_points().map(|p| p.alpha), 0.05, 0.5);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(cfg.x_label.as_str())
        .y_desc(cfg.y_label.as_str())
        .x_label_formatter(&|r| format!("{r:.0}"))
        .draw()?;

    let palette = generate_palette(series.len());
    for (s, color) in series.values().zip(palette) {
        let style = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|p| (p.r as f64, p.alpha)),
                style,
            ))?
            .label(cfg.legend_for(s.file_count))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

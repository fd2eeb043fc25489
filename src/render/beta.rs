use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use super::render_to;
use crate::color::{ERROR_COLOR, MEAN_COLOR};
use crate::config::{BetaConfig, MarkerStyle};
use crate::data::model::AggregatedBetaPoint;
use crate::error::Result;

// ---------------------------------------------------------------------------
// β(m, 0) chart: mean with population-σ error bars
// ---------------------------------------------------------------------------

/// Draw the aggregated β points into `path` using `cfg`'s format and policy.
///
/// The y-axis is fixed to `cfg.y_range`; points whose error bar leaves it are
/// logged but not rescaled. Every sampled m gets its own x tick.
pub fn render_beta_chart(points: &[AggregatedBetaPoint], cfg: &BetaConfig, path: &Path) -> Result<()> {
    let outside = points_outside(points, cfg.y_range);
    if !outside.is_empty() {
        log::warn!(
            "beta: error bars for m = {outside:?} extend beyond y-range {:?}",
            cfg.y_range
        );
    }

    render_to!(cfg.format, path, (cfg.width, cfg.height), |root| {
        draw_beta(root, points, cfg)
    })?;
    log::info!("beta: wrote {} ({} points)", path.display(), points.len());
    Ok(())
}

/// Memory sizes whose `mean ± stddev` does not fit in `[lo, hi]`.
pub fn points_outside(points: &[AggregatedBetaPoint], [lo, hi]: [f64; 2]) -> Vec<u32> {
    points
        .iter()
        .filter(|p| {
            let (low, high) = p.bar();
            low < lo || high > hi
        })
        .map(|p| p.m)
        .collect()
}

fn draw_beta<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    points: &[AggregatedBetaPoint],
    cfg: &BetaConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let ms: Vec<i64> = points.iter().map(|p| i64::from(p.m)).collect();
    let x_range = key_range(&ms);
    let [y_lo, y_hi] = cfg.y_range;

    let mut chart = ChartBuilder::on(&root)
        .caption(cfg.title.as_str(), ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.with_key_points(ms), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(cfg.x_label.as_str())
        .y_desc(cfg.y_label.as_str())
        .draw()?;

    let markers = points
        .iter()
        .map(|p| Circle::new((i64::from(p.m), p.mean), 4, MEAN_COLOR.filled()));

    match cfg.marker {
        MarkerStyle::Line => {
            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|p| (i64::from(p.m), p.mean)),
                    MEAN_COLOR.stroke_width(2),
                ))?
                .label(cfg.mean_label.as_str())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MEAN_COLOR.stroke_width(2)));
            chart.draw_series(markers)?;
        }
        MarkerStyle::Scatter => {
            chart
                .draw_series(markers)?
                .label(cfg.mean_label.as_str())
                .legend(|(x, y)| Circle::new((x + 10, y), 4, MEAN_COLOR.filled()));
        }
    }

    if cfg.error_bars {
        chart
            .draw_series(points.iter().map(|p| {
                let (low, high) = p.bar();
                ErrorBar::new_vertical(i64::from(p.m), low, p.mean, high, ERROR_COLOR.stroke_width(2), 12)
            }))?
            .label(cfg.error_label.as_str())
            .legend(|(x, y)| PathElement::new(vec![(x + 10, y - 6), (x + 10, y + 6)], ERROR_COLOR.stroke_width(2)));
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

/// Integer x-range around the sampled memory sizes, padded by 5 % (at least 1).
fn key_range(ms: &[i64]) -> Range<i64> {
    let lo = ms.iter().copied().min().unwrap_or(0);
    let hi = ms.iter().copied().max().unwrap_or(1);
    let pad = ((hi - lo) / 20).max(1);
    (lo - pad)..(hi + pad)
}

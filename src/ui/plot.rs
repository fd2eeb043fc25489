use eframe::egui::Ui;
use egui_plot::{GridMark, Line, Plot, PlotBounds, PlotPoints, Points};

use crate::color::{to_color32, ERROR_COLOR, MEAN_COLOR};
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// β plot (central panel)
// ---------------------------------------------------------------------------

/// Render the β chart in the central panel: same policy as the file renderer,
/// with one x grid mark per sampled m. The y-axis stays pinned to
/// `policy.y_range`; bars reaching past it are clipped.
///
/// Returns the bounds shown, or `None` when there is nothing to plot.
pub fn beta_plot(ui: &mut Ui, state: &ViewerState) -> Option<PlotBounds> {
    if state.points.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a β file to view it  (File → Open…)");
        });
        return None;
    }

    let policy = &state.policy;
    let [y_lo, y_hi] = policy.y_range;

    let ticks: Vec<f64> = state.points.iter().map(|p| p.m as f64).collect();
    let step = min_gap(&ticks);
    let cap = step * 0.08;

    let mean_color = to_color32(MEAN_COLOR);
    let error_color = to_color32(ERROR_COLOR);

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(policy.title.as_str());
    });

    let response = Plot::new("beta_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(policy.x_label.clone())
        .y_axis_label(policy.y_label.clone())
        .include_y(y_lo)
        .include_y(y_hi)
        .auto_bounds([true, false])
        .x_grid_spacer(move |_input| {
            ticks
                .iter()
                .map(|&value| GridMark { value, step_size: step })
                .collect()
        })
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let means: Vec<[f64; 2]> = state.points.iter().map(|p| [p.m as f64, p.mean]).collect();

            if state.connect_points {
                plot_ui.line(
                    Line::new(PlotPoints::from(means.clone()))
                        .name(&policy.mean_label)
                        .color(mean_color)
                        .width(2.0),
                );
            }
            plot_ui.points(
                Points::new(PlotPoints::from(means))
                    .name(&policy.mean_label)
                    .color(mean_color)
                    .radius(4.0),
            );

            if state.show_error_bars {
                for p in &state.points {
                    let x = p.m as f64;
                    let (low, high) = p.bar();
                    for segment in [
                        vec![[x, low], [x, high]],
                        vec![[x - cap, low], [x + cap, low]],
                        vec![[x - cap, high], [x + cap, high]],
                    ] {
                        plot_ui.line(
                            Line::new(PlotPoints::from(segment))
                                .name(&policy.error_label)
                                .color(error_color)
                                .width(1.5),
                        );
                    }
                }
            }
        });

    Some(*response.transform.bounds())
}

/// Smallest distance between neighbouring ticks, 1.0 when undefined.
fn min_gap(ticks: &[f64]) -> f64 {
    let mut sorted = ticks.to_vec();
    sorted.sort_by(f64::total_cmp);
    let gap = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| *d > 0.0)
        .fold(f64::INFINITY, f64::min);
    if gap.is_finite() {
        gap
    } else {
        1.0
    }
}

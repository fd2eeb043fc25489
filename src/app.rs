use std::path::PathBuf;

use eframe::egui;

use crate::config::BetaConfig;
use crate::data::model::AggregatedBetaPoint;
use crate::error::{PlotError, Result};
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BetaViewerApp {
    pub state: ViewerState,
}

impl eframe::App for BetaViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::beta_plot(ui, &self.state);
        });
    }
}

/// Open the β viewer and block until its window is closed.
pub fn show_beta(
    points: Vec<AggregatedBetaPoint>,
    policy: BetaConfig,
    source: Option<PathBuf>,
) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([policy.width as f32, policy.height as f32 + 40.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = ViewerState::new(points, policy, source);
    eframe::run_native(
        "Sortplot – β(m, 0)",
        options,
        Box::new(|_cc| Ok(Box::new(BetaViewerApp { state }))),
    )
    .map_err(|e| PlotError::Viewer(e.to_string()))
}

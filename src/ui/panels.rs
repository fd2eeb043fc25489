use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let source = state
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no file".to_string());
        ui.label(format!("{} memory sizes  ({source})", state.points.len()));

        ui.separator();

        if ui
            .selectable_label(state.connect_points, "Connect points")
            .clicked()
        {
            state.connect_points = !state.connect_points;
        }
        if ui
            .selectable_label(state.show_error_bars, "Error bars")
            .clicked()
        {
            state.show_error_bars = !state.show_error_bars;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut ViewerState) {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open β measurements")
        .add_filter("Text", &["txt"]);
    if let Some(dir) = state.source.as_ref().and_then(|p| p.parent()) {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.pick_file() {
        state.load_file(&path);
    }
}

pub fn export_file_dialog(state: &mut ViewerState) {
    let file = rfd::FileDialog::new()
        .set_title("Export β chart")
        .add_filter("PNG", &["png"])
        .add_filter("SVG", &["svg"])
        .set_file_name(format!("beta.{}", state.policy.format.extension()))
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}

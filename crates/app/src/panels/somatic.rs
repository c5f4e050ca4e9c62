//! Somatic heatmap tab: pick a body region, set an intensity, log it.

use eframe::egui;

use shared::journal::BODY_REGIONS;

use crate::types::AppState;

pub fn draw(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Somatic Heatmap");
    ui.label("Where does it live in the body right now?");
    ui.add_space(8.0);

    ui.horizontal_wrapped(|ui| {
        for region in BODY_REGIONS {
            let selected = state.selected_region == Some(region);
            if ui.selectable_label(selected, region).clicked() {
                state.selected_region = Some(region);
            }
        }
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Intensity");
        ui.add(egui::Slider::new(&mut state.somatic_intensity, 0..=10));
    });

    if ui.button("Log Sensation").clicked() {
        state.log_somatic();
    }
    if let Some(status) = &state.somatic_status {
        ui.label(status);
    }

    ui.add_space(12.0);
    ui.heading("Recent Logs");
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if state.somatic_logs.is_empty() {
                ui.weak("Nothing logged yet.");
                return;
            }
            for log in &state.somatic_logs {
                let date = log
                    .created_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M");
                ui.label(format!("{} | {} at {}/10", date, log.region, log.intensity));
            }
        });
}

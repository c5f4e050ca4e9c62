//! Audio Void tab: record into the vault, play back with the system
//! player.

use eframe::egui;

use crate::types::AppState;

pub fn draw(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Audio Void");
    ui.label("Speak what cannot be written.");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if state.recorder.is_some() {
            if ui.button("⏹ Stop").clicked() {
                state.stop_recording();
            }
            ui.colored_label(egui::Color32::LIGHT_RED, "Recording...");
        } else if ui.button("⏺ Record").clicked() {
            state.start_recording();
        }
    });
    if let Some(status) = &state.audio_status {
        ui.colored_label(egui::Color32::LIGHT_RED, status);
    }

    ui.add_space(12.0);
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if state.audio_entries.is_empty() {
                ui.weak("The void is silent.");
                return;
            }
            let mut play_index = None;
            for (i, entry) in state.audio_entries.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let date = entry
                            .created_at
                            .with_timezone(&chrono::Local)
                            .format("%Y-%m-%d %H:%M");
                        ui.label(format!("Recorded: {}", date));
                        if ui.button("▶ Play").clicked() {
                            play_index = Some(i);
                        }
                    });
                });
                ui.add_space(4.0);
            }
            if let Some(i) = play_index {
                state.play_recording(i);
            }
        });
}

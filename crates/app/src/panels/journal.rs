//! Journal tab: compose form, catharsis burner, archetype draw, and the
//! saved-entry list (newest first).

use eframe::egui;

use crate::types::AppState;

pub fn draw(ui: &mut egui::Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            compose_form(ui, state);
            ui.add_space(12.0);
            archetype_card(ui, state);
            ui.add_space(12.0);
            catharsis_burner(ui, state);
            ui.add_space(12.0);
            entry_list(ui, state);
        });
}

fn compose_form(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("New Entry");
    ui.add(
        egui::TextEdit::singleline(&mut state.journal_title)
            .hint_text("Title")
            .desired_width(f32::INFINITY),
    );
    ui.add(
        egui::TextEdit::singleline(&mut state.journal_tags)
            .hint_text("Tags (comma separated)")
            .desired_width(f32::INFINITY),
    );
    ui.add(
        egui::TextEdit::multiline(&mut state.journal_body)
            .hint_text("What surfaced today?")
            .desired_rows(6)
            .desired_width(f32::INFINITY),
    );
    ui.horizontal(|ui| {
        if ui.button("Commit to Vault").clicked() {
            state.save_journal_entry();
        }
        if let Some(status) = &state.journal_status {
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
    });
}

fn archetype_card(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Synchronicity Draw");
    ui.horizontal(|ui| {
        if ui.button("🃏 Draw Card").clicked() {
            state.draw_archetype();
        }
        match state.current_archetype {
            Some(card) => {
                ui.vertical(|ui| {
                    ui.strong(card.name);
                    ui.label(card.description);
                });
            }
            None => {
                ui.weak("No card drawn this session.");
            }
        }
    });
}

fn catharsis_burner(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Catharsis Burner");
    ui.weak("Nothing written here is kept.");
    ui.add(
        egui::TextEdit::multiline(&mut state.burner_text)
            .hint_text("Write it. Burn it.")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if ui.button("🔥 Burn").clicked() {
        state.burn_catharsis();
    }
}

fn entry_list(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Vault");
    if state.journal_entries.is_empty() {
        ui.weak("No entries yet.");
        return;
    }
    for entry in &state.journal_entries {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            let date = entry
                .created_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d");
            ui.strong(format!("{} ({})", entry.title, date));
            // A blank tag field is stored as a single empty tag; hide the
            // row in that case.
            if entry.tags.first().map(|t| t.as_str()) != Some("") {
                ui.weak(entry.tags.join(" | "));
            }
            ui.label(&entry.body);
        });
        ui.add_space(6.0);
    }
}

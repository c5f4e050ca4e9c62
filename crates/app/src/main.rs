use eframe::egui;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use agent::Persona;
use shared::chat::ChatRole;
use vault::Vault;

mod metronome;
mod panels;
mod recorder;
mod reveal;
mod tag_graph;
mod types;

use types::{AppScreen, AppState, FoundryTab};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let state = match Vault::open().and_then(AppState::new) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to open the vault");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "The Shadow Foundry",
        options,
        Box::new(|cc| {
            apply_theme(&cc.egui_ctx, state.settings.dark_mode);
            Box::new(FoundryApp {
                state: Arc::new(Mutex::new(state)),
            })
        }),
    )
}

fn apply_theme(ctx: &egui::Context, dark: bool) {
    ctx.set_visuals(if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}

struct FoundryApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for FoundryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut s = self.state.lock();

        // Non-blocking poll for the in-flight chat turn, then advance the
        // typing reveal.
        s.poll_turn();
        s.advance_reveal(Instant::now());
        if s.is_chat_busy() {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        match s.screen {
            AppScreen::Locked => draw_lock_screen(ctx, &mut s),
            AppScreen::Foundry => {
                draw_header(ctx, &mut s);
                draw_chat_panel(ctx, &mut s);
                egui::CentralPanel::default().show(ctx, |ui| match s.tab {
                    FoundryTab::Journal => panels::journal::draw(ui, &mut s),
                    FoundryTab::Somatic => panels::somatic::draw(ui, &mut s),
                    FoundryTab::Audio => panels::audio::draw(ui, &mut s),
                    FoundryTab::Constellation => panels::constellation::draw(ui, &mut s),
                });
                draw_settings_window(ctx, &mut s);
            }
        }
    }
}

/// The six-breath metronome gate. Hold the circle to inhale, release to
/// exhale; six cycles open the Foundry.
fn draw_lock_screen(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.2);
            ui.heading("THE SHADOW FOUNDRY");
            ui.add_space(24.0);

            let radius = if state.breath.is_holding() { 90.0 } else { 70.0 };
            let (response, painter) =
                ui.allocate_painter(egui::Vec2::splat(200.0), egui::Sense::drag());
            let center = response.rect.center();
            let fill = if state.breath.is_holding() {
                egui::Color32::from_rgb(48, 195, 195)
            } else {
                egui::Color32::from_rgb(55, 23, 110)
            };
            painter.circle(
                center,
                radius,
                fill,
                egui::Stroke::new(2.0, egui::Color32::from_rgb(176, 38, 255)),
            );

            state.breath.set_held(response.is_pointer_button_down_on());

            ui.add_space(12.0);
            ui.label(state.breath.instruction());
            ui.label(format!(
                "{} / {}",
                state.breath.cycles(),
                metronome::REQUIRED_CYCLES
            ));

            if state.breath.is_complete() {
                state.screen = AppScreen::Foundry;
            }
        });
    });
}

fn draw_header(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("THE SHADOW FOUNDRY");
            ui.separator();
            for tab in FoundryTab::all() {
                if ui
                    .selectable_label(state.tab == tab, tab.label())
                    .clicked()
                {
                    state.tab = tab;
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙").on_hover_text("Settings").clicked() {
                    state.settings_open = !state.settings_open;
                    if state.settings_open {
                        // Pre-fill with the stored key, as the settings
                        // dialog edits it in place.
                        if let Ok(Some(key)) = state.vault.api_key() {
                            state.api_key_input = key;
                        }
                    }
                }
                if ui
                    .button("🔒 Lock Session")
                    .on_hover_text("Return to the breath gate")
                    .clicked()
                {
                    state.lock_session();
                }
            });
        });
    });
}

fn draw_chat_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::right("chat")
        .default_width(380.0)
        .min_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!(
                    "{} {}",
                    state.persona.glyph(),
                    state.persona.display_name()
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut selected = state.persona;
                    egui::ComboBox::from_id_source("persona")
                        .selected_text(selected.display_name())
                        .show_ui(ui, |ui| {
                            for persona in Persona::all() {
                                ui.selectable_value(
                                    &mut selected,
                                    persona,
                                    format!("{} {}", persona.glyph(), persona.display_name()),
                                );
                            }
                        });
                    if selected != state.persona {
                        state.set_persona(selected);
                    }
                });
            });
            ui.separator();

            let input_height = 40.0;
            let history_height = ui.available_height() - input_height;
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false; 2])
                .max_height(history_height)
                .show(ui, |ui| {
                    for msg in &state.chat_messages {
                        draw_chat_bubble(ui, msg.role, &msg.content);
                    }
                    // Thinking bubble while the turn is still on the wire.
                    if state.turn_rx.is_some() {
                        let dots = ".".repeat((ui.input(|i| i.time * 2.0) as usize % 3) + 1);
                        draw_chat_bubble(ui, ChatRole::Agent, &dots);
                    }
                });

            ui.separator();
            let enabled = !state.is_chat_busy();
            ui.horizontal(|ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut state.chat_input)
                            .hint_text("Speak into the dark...")
                            .desired_width(ui.available_width() - 60.0),
                    );
                    let enter_pressed = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Send").clicked() || enter_pressed {
                        state.send_message();
                        response.request_focus();
                    }
                });
            });
        });
}

fn draw_chat_bubble(ui: &mut egui::Ui, role: ChatRole, content: &str) {
    match role {
        ChatRole::System => {
            ui.colored_label(egui::Color32::LIGHT_RED, content);
        }
        ChatRole::User => {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                egui::Frame::none()
                    .fill(ui.visuals().faint_bg_color)
                    .rounding(6.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.label(content);
                    });
            });
        }
        ChatRole::Agent => {
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .rounding(6.0)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.label(content);
                });
        }
    }
    ui.add_space(4.0);
}

fn draw_settings_window(ctx: &egui::Context, state: &mut AppState) {
    if !state.settings_open {
        return;
    }
    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Gemini API Key");
            ui.add(
                egui::TextEdit::singleline(&mut state.api_key_input)
                    .password(true)
                    .hint_text("Paste your key")
                    .desired_width(280.0),
            );
            if ui.button("Save").clicked() {
                state.save_api_key();
            }
            if let Some(status) = &state.settings_status {
                ui.colored_label(egui::Color32::LIGHT_RED, status);
            }

            ui.separator();
            let mut dark = state.settings.dark_mode;
            if ui.checkbox(&mut dark, "Dark mode").changed() {
                state.settings.dark_mode = dark;
                apply_theme(ctx, dark);
                if let Err(e) = state.vault.save_settings(&state.settings) {
                    tracing::warn!(error = %e, "could not persist settings");
                }
            }
        });
    if !open {
        state.settings_open = false;
    }
}

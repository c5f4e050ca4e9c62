//! Application state and the chat session state machine.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use anyhow::Result;
use eframe::egui;

use agent::{assemble_instruction, run_chat_turn, ArchetypeCard, Persona, TurnOutcome};
use shared::chat::{ChatMessage, ChatRole};
use shared::journal::{AudioEntry, JournalEntry, SomaticLogEntry};
use shared::settings::AppSettings;
use vault::Vault;

use crate::metronome::BreathLock;
use crate::recorder::VoiceRecorder;
use crate::reveal::RevealState;
use crate::tag_graph::TagGraphLayout;

pub const MISSING_KEY_MESSAGE: &str =
    "Neural Link Failed. Please configure your API Key via the settings gear (⚙️) top right.";
pub const KEY_STORED_MESSAGE: &str = "Neural Link Established. API Key securely stored.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Locked,
    Foundry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundryTab {
    Journal,
    Somatic,
    Audio,
    Constellation,
}

impl FoundryTab {
    pub fn all() -> [FoundryTab; 4] {
        [
            FoundryTab::Journal,
            FoundryTab::Somatic,
            FoundryTab::Audio,
            FoundryTab::Constellation,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoundryTab::Journal => "📓 Journal",
            FoundryTab::Somatic => "🫀 Body Map",
            FoundryTab::Audio => "🎙 Audio Void",
            FoundryTab::Constellation => "✨ Constellation",
        }
    }
}

/// Whether a turn is in flight. The reveal animation keeps the input
/// gated after the turn itself finishes, see [`AppState::is_chat_busy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Sending,
}

pub struct AppState {
    pub vault: Vault,
    pub settings: AppSettings,
    pub screen: AppScreen,
    pub breath: BreathLock,
    pub tab: FoundryTab,

    // Collection caches, newest first; mirror what the vault holds.
    pub journal_entries: Vec<JournalEntry>,
    pub somatic_logs: Vec<SomaticLogEntry>,
    pub audio_entries: Vec<AudioEntry>,
    /// Bumped on every journal save; invalidates the constellation layout.
    pub journal_revision: u64,

    pub current_archetype: Option<&'static ArchetypeCard>,
    pub persona: Persona,

    pub chat_messages: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_phase: ChatPhase,
    pub reveal: Option<RevealState>,
    pub turn_rx: Option<Receiver<TurnOutcome>>,

    // Journal compose form
    pub journal_title: String,
    pub journal_tags: String,
    pub journal_body: String,
    pub journal_status: Option<String>,

    pub burner_text: String,

    // Somatic form
    pub selected_region: Option<&'static str>,
    pub somatic_intensity: u8,
    pub somatic_status: Option<String>,

    pub recorder: Option<VoiceRecorder>,
    pub audio_status: Option<String>,

    // Settings dialog
    pub settings_open: bool,
    pub api_key_input: String,
    pub settings_status: Option<String>,

    /// (journal revision, surface size, layout) for the constellation.
    pub constellation_cache: Option<(u64, egui::Vec2, TagGraphLayout)>,
}

impl AppState {
    pub fn new(vault: Vault) -> Result<Self> {
        let settings = vault.load_settings();
        let journal_entries = vault.load_journal()?;
        let somatic_logs = vault.load_somatic_logs()?;
        let audio_entries = vault.load_audio_entries()?;
        Ok(Self {
            vault,
            settings,
            screen: AppScreen::Locked,
            breath: BreathLock::default(),
            tab: FoundryTab::Journal,
            journal_entries,
            somatic_logs,
            audio_entries,
            journal_revision: 0,
            current_archetype: None,
            persona: Persona::default(),
            chat_messages: Vec::new(),
            chat_input: String::new(),
            chat_phase: ChatPhase::Idle,
            reveal: None,
            turn_rx: None,
            journal_title: String::new(),
            journal_tags: String::new(),
            journal_body: String::new(),
            journal_status: None,
            burner_text: String::new(),
            selected_region: None,
            somatic_intensity: 5,
            somatic_status: None,
            recorder: None,
            audio_status: None,
            settings_open: false,
            api_key_input: String::new(),
            settings_status: None,
            constellation_cache: None,
        })
    }

    pub fn push_chat(&mut self, role: ChatRole, content: impl Into<String>) {
        self.chat_messages.push(ChatMessage::new(role, content));
    }

    /// Input and send stay disabled while a turn is in flight or a reply
    /// is still being revealed.
    pub fn is_chat_busy(&self) -> bool {
        self.chat_phase == ChatPhase::Sending || self.reveal.is_some()
    }

    // --- Chat session controller ---

    pub fn send_message(&mut self) {
        if self.is_chat_busy() {
            return;
        }
        let text = self.chat_input.trim().to_string();
        if text.is_empty() {
            return;
        }
        self.chat_input.clear();
        self.push_chat(ChatRole::User, &text);

        // Credential check comes before any network activity. The
        // thinking bubble only appears once the turn is actually running.
        let key = match self.vault.api_key() {
            Ok(Some(key)) => key,
            Ok(None) => {
                self.push_chat(ChatRole::System, MISSING_KEY_MESSAGE);
                return;
            }
            Err(e) => {
                self.push_chat(ChatRole::System, format!("Error establishing link: {}", e));
                return;
            }
        };

        let instruction = assemble_instruction(
            self.persona.system_prompt(),
            self.current_archetype.map(|card| card.name),
            self.journal_entries.first(),
        );

        let (tx, rx) = std::sync::mpsc::channel();
        self.turn_rx = Some(rx);
        self.chat_phase = ChatPhase::Sending;
        run_chat_turn(
            tx,
            key,
            self.settings.gemini_model.clone(),
            instruction,
            text,
        );
    }

    /// Called once per frame while a turn is in flight.
    pub fn poll_turn(&mut self) {
        let Some(rx) = &self.turn_rx else { return };
        match rx.try_recv() {
            Ok(TurnOutcome::Reply(text)) => {
                self.turn_rx = None;
                // The reveal fills this bubble in as it ticks.
                self.push_chat(ChatRole::Agent, "");
                self.reveal = Some(RevealState::new(&text));
            }
            Ok(TurnOutcome::Failure(detail)) => {
                self.turn_rx = None;
                self.chat_phase = ChatPhase::Idle;
                self.push_chat(
                    ChatRole::System,
                    format!("Error establishing link: {}", detail),
                );
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.turn_rx = None;
                self.chat_phase = ChatPhase::Idle;
                self.push_chat(
                    ChatRole::System,
                    "Error establishing link: worker thread exited unexpectedly",
                );
            }
        }
    }

    pub fn advance_reveal(&mut self, now: Instant) {
        let Some(reveal) = &mut self.reveal else { return };
        if reveal.tick(now) {
            let visible = reveal.visible();
            if let Some(msg) = self.chat_messages.last_mut() {
                msg.content = visible;
            }
        }
        if self.reveal.as_ref().is_some_and(|r| r.is_done()) {
            self.reveal = None;
            self.chat_phase = ChatPhase::Idle;
        }
    }

    pub fn set_persona(&mut self, persona: Persona) {
        if persona == self.persona {
            return;
        }
        self.persona = persona;
        self.push_chat(
            ChatRole::System,
            format!(
                "Interface switched to {}. Context loaded.",
                persona.display_name()
            ),
        );
    }

    // --- Settings ---

    pub fn save_api_key(&mut self) {
        let key = self.api_key_input.trim().to_string();
        if key.is_empty() {
            self.settings_status = Some("Please enter a valid API key.".to_string());
            return;
        }
        match self.vault.set_api_key(&key) {
            Ok(()) => {
                self.settings_status = None;
                self.settings_open = false;
                self.push_chat(ChatRole::System, KEY_STORED_MESSAGE);
            }
            Err(e) => self.settings_status = Some(format!("Could not store key: {}", e)),
        }
    }

    // --- Journal ---

    pub fn save_journal_entry(&mut self) {
        let title = self.journal_title.trim().to_string();
        let body = self.journal_body.trim().to_string();
        if title.is_empty() || body.is_empty() {
            self.journal_status = Some("Title and Body required.".to_string());
            return;
        }
        let tags = shared::journal::parse_tags(&self.journal_tags);
        let entry = JournalEntry::text(title, tags, body);
        match self.vault.save_journal_entry(entry.clone()) {
            Ok(()) => {
                self.journal_entries.insert(0, entry);
                self.journal_revision += 1;
                self.journal_title.clear();
                self.journal_tags.clear();
                self.journal_body.clear();
                self.journal_status = None;
            }
            Err(e) => self.journal_status = Some(format!("Save failed: {}", e)),
        }
    }

    pub fn burn_catharsis(&mut self) {
        if self.burner_text.trim().is_empty() {
            return;
        }
        self.burner_text.clear();
    }

    // --- Somatic ---

    pub fn log_somatic(&mut self) {
        let Some(region) = self.selected_region else {
            self.somatic_status = Some("Select a region on the body map first.".to_string());
            return;
        };
        let entry = SomaticLogEntry::new(region, self.somatic_intensity);
        match self.vault.save_somatic_log(entry.clone()) {
            Ok(()) => {
                self.somatic_logs.insert(0, entry);
                self.somatic_status = Some(format!(
                    "Logged: Intensity {}/10 in the {}.",
                    self.somatic_intensity, region
                ));
            }
            Err(e) => self.somatic_status = Some(format!("Save failed: {}", e)),
        }
    }

    // --- Audio ---

    pub fn start_recording(&mut self) {
        match VoiceRecorder::start() {
            Ok(recorder) => {
                self.recorder = Some(recorder);
                self.audio_status = None;
            }
            Err(e) => {
                self.audio_status = Some(format!("Microphone access denied or unavailable: {}", e));
            }
        }
    }

    pub fn stop_recording(&mut self) {
        let Some(recorder) = self.recorder.take() else { return };
        let result = recorder
            .stop()
            .and_then(|wav| self.vault.save_audio_recording(&wav));
        match result {
            Ok(entry) => {
                self.audio_entries.insert(0, entry);
                self.audio_status = None;
            }
            Err(e) => self.audio_status = Some(format!("Recording failed: {}", e)),
        }
    }

    pub fn play_recording(&mut self, index: usize) {
        let Some(entry) = self.audio_entries.get(index) else { return };
        let path = self.vault.audio_path(entry);
        if let Err(e) = open::that(path) {
            self.audio_status = Some(format!("Could not open recording: {}", e));
        }
    }

    // --- Archetypes / lock ---

    pub fn draw_archetype(&mut self) {
        self.current_archetype = Some(agent::draw_card());
    }

    pub fn lock_session(&mut self) {
        self.breath.reset();
        self.screen = AppScreen::Locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let vault = Vault::with_base(dir.path()).unwrap();
        let state = AppState::new(vault).unwrap();
        (dir, state)
    }

    #[test]
    fn test_whitespace_send_is_a_noop() {
        let (_dir, mut state) = temp_state();
        state.chat_input = "   \n ".to_string();
        state.send_message();
        assert!(state.chat_messages.is_empty());
        assert!(state.turn_rx.is_none());
        assert_eq!(state.chat_phase, ChatPhase::Idle);
    }

    #[test]
    fn test_send_without_key_stops_before_network() {
        let (_dir, mut state) = temp_state();
        state.chat_input = "who am I".to_string();
        state.send_message();

        assert_eq!(state.chat_messages.len(), 2);
        assert_eq!(state.chat_messages[0].role, ChatRole::User);
        assert_eq!(state.chat_messages[0].content, "who am I");
        assert_eq!(state.chat_messages[1].role, ChatRole::System);
        assert_eq!(state.chat_messages[1].content, MISSING_KEY_MESSAGE);
        assert!(state.turn_rx.is_none());
        assert!(!state.is_chat_busy());
    }

    #[test]
    fn test_send_with_key_enters_sending() {
        let (_dir, mut state) = temp_state();
        state.vault.set_api_key("k").unwrap();
        state.chat_input = "hello".to_string();
        state.send_message();

        assert_eq!(state.chat_phase, ChatPhase::Sending);
        assert!(state.turn_rx.is_some());
        assert!(state.is_chat_busy());
        assert!(state.chat_input.is_empty());
        // A second send while busy is ignored.
        state.chat_input = "again".to_string();
        state.send_message();
        assert_eq!(state.chat_messages.len(), 1);
    }

    #[test]
    fn test_failure_outcome_becomes_system_message() {
        let (_dir, mut state) = temp_state();
        let (tx, rx) = std::sync::mpsc::channel();
        state.turn_rx = Some(rx);
        state.chat_phase = ChatPhase::Sending;
        tx.send(TurnOutcome::Failure("API key not valid".to_string()))
            .unwrap();

        state.poll_turn();
        assert_eq!(state.chat_phase, ChatPhase::Idle);
        assert!(state.turn_rx.is_none());
        let last = state.chat_messages.last().unwrap();
        assert_eq!(last.role, ChatRole::System);
        assert_eq!(last.content, "Error establishing link: API key not valid");
    }

    #[test]
    fn test_reply_outcome_reveals_stripped_text() {
        let (_dir, mut state) = temp_state();
        let (tx, rx) = std::sync::mpsc::channel();
        state.turn_rx = Some(rx);
        state.chat_phase = ChatPhase::Sending;
        tx.send(TurnOutcome::Reply("**Named.**\nFelt.".to_string()))
            .unwrap();

        state.poll_turn();
        assert!(state.reveal.is_some());
        assert!(state.is_chat_busy());

        state.advance_reveal(Instant::now() + Duration::from_secs(30));
        assert!(state.reveal.is_none());
        assert_eq!(state.chat_phase, ChatPhase::Idle);
        let last = state.chat_messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Agent);
        assert_eq!(last.content, "Named.\nFelt.");
    }

    #[test]
    fn test_persona_switch_announces_once() {
        let (_dir, mut state) = temp_state();
        state.set_persona(Persona::Bridge);
        state.set_persona(Persona::Bridge);
        assert_eq!(state.chat_messages.len(), 1);
        assert_eq!(
            state.chat_messages[0].content,
            "Interface switched to BRIDGE. Context loaded."
        );
    }

    #[test]
    fn test_journal_save_requires_title_and_body() {
        let (_dir, mut state) = temp_state();
        state.journal_body = "body".to_string();
        state.save_journal_entry();
        assert_eq!(
            state.journal_status.as_deref(),
            Some("Title and Body required.")
        );
        assert!(state.journal_entries.is_empty());
        assert_eq!(state.journal_revision, 0);
    }

    #[test]
    fn test_journal_save_prepends_and_bumps_revision() {
        let (_dir, mut state) = temp_state();
        state.journal_title = "Descent".to_string();
        state.journal_tags = "grief, loss".to_string();
        state.journal_body = "Down we go.".to_string();
        state.save_journal_entry();

        assert_eq!(state.journal_revision, 1);
        assert_eq!(state.journal_entries.len(), 1);
        assert_eq!(state.journal_entries[0].tags, vec!["grief", "loss"]);
        assert!(state.journal_title.is_empty());
        assert!(state.journal_status.is_none());
        assert_eq!(state.vault.load_journal().unwrap().len(), 1);
    }

    #[test]
    fn test_somatic_log_requires_region() {
        let (_dir, mut state) = temp_state();
        state.log_somatic();
        assert_eq!(
            state.somatic_status.as_deref(),
            Some("Select a region on the body map first.")
        );
        assert!(state.somatic_logs.is_empty());

        state.selected_region = Some("chest");
        state.somatic_intensity = 7;
        state.log_somatic();
        assert_eq!(state.somatic_logs.len(), 1);
        assert_eq!(
            state.somatic_status.as_deref(),
            Some("Logged: Intensity 7/10 in the chest.")
        );
    }

    #[test]
    fn test_burner_clears_only_nonempty_text() {
        let (_dir, mut state) = temp_state();
        state.burner_text = "  ".to_string();
        state.burn_catharsis();
        assert_eq!(state.burner_text, "  ");

        state.burner_text = "rage".to_string();
        state.burn_catharsis();
        assert!(state.burner_text.is_empty());
    }

    #[test]
    fn test_save_api_key_validates_and_announces() {
        let (_dir, mut state) = temp_state();
        state.api_key_input = "  ".to_string();
        state.save_api_key();
        assert_eq!(
            state.settings_status.as_deref(),
            Some("Please enter a valid API key.")
        );

        state.api_key_input = "AIza-x".to_string();
        state.settings_open = true;
        state.save_api_key();
        assert!(!state.settings_open);
        assert_eq!(state.vault.api_key().unwrap().as_deref(), Some("AIza-x"));
        assert_eq!(
            state.chat_messages.last().unwrap().content,
            KEY_STORED_MESSAGE
        );
    }

    #[test]
    fn test_drawn_archetype_feeds_session() {
        let (_dir, mut state) = temp_state();
        assert!(state.current_archetype.is_none());
        state.draw_archetype();
        let card = state.current_archetype.unwrap();
        assert!(agent::find_card(card.name).is_some());
    }

    #[test]
    fn test_lock_session_resets_breath() {
        let (_dir, mut state) = temp_state();
        state.screen = AppScreen::Foundry;
        for _ in 0..6 {
            state.breath.set_held(true);
            state.breath.set_held(false);
        }
        state.lock_session();
        assert_eq!(state.screen, AppScreen::Locked);
        assert!(!state.breath.is_complete());
    }
}

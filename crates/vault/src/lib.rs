//! Local persistent store for the Foundry.
//!
//! One JSON file per collection under the platform data directory, plus a
//! blob directory for audio recordings. Collections are kept newest-first:
//! saving prepends and rewrites the whole file. A missing file reads as an
//! empty collection; an unreadable or corrupt file is an error.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use shared::journal::{AudioEntry, JournalEntry, SomaticLogEntry};
use shared::settings::AppSettings;

const JOURNAL_FILE: &str = "chiron_journal.json";
const SOMATIC_FILE: &str = "somatic_logs.json";
const AUDIO_INDEX_FILE: &str = "audio_vault.json";
const AUDIO_DIR: &str = "audio_vault";
const API_KEY_FILE: &str = "gemini_api_key.json";
const SETTINGS_FILE: &str = "settings.json";

pub struct Vault {
    base: PathBuf,
}

impl Vault {
    /// Open the vault in the platform data directory, creating it on
    /// first use.
    pub fn open() -> Result<Self> {
        let dirs = ProjectDirs::from("com", "shadowfoundry", "ShadowFoundry")
            .context("Could not determine data directory")?;
        Self::with_base(dirs.data_dir())
    }

    /// Open the vault rooted at an explicit directory.
    pub fn with_base(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)
            .with_context(|| format!("Failed to create vault directory {}", base.display()))?;
        fs::create_dir_all(base.join(AUDIO_DIR))?;
        Ok(Self { base })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    // --- Journal ---

    pub fn load_journal(&self) -> Result<Vec<JournalEntry>> {
        self.read_collection(JOURNAL_FILE)
    }

    /// Prepend an entry so the newest is always first.
    pub fn save_journal_entry(&self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.load_journal()?;
        entries.insert(0, entry);
        self.write_collection(JOURNAL_FILE, &entries)
    }

    // --- Somatic logs ---

    pub fn load_somatic_logs(&self) -> Result<Vec<SomaticLogEntry>> {
        self.read_collection(SOMATIC_FILE)
    }

    pub fn save_somatic_log(&self, entry: SomaticLogEntry) -> Result<()> {
        let mut logs = self.load_somatic_logs()?;
        logs.insert(0, entry);
        self.write_collection(SOMATIC_FILE, &logs)
    }

    // --- Audio ---

    pub fn load_audio_entries(&self) -> Result<Vec<AudioEntry>> {
        self.read_collection(AUDIO_INDEX_FILE)
    }

    /// Write a finished WAV blob and index it.
    pub fn save_audio_recording(&self, wav_bytes: &[u8]) -> Result<AudioEntry> {
        let now = chrono::Utc::now();
        let entry = AudioEntry {
            id: now.timestamp_millis(),
            created_at: now,
            file_name: format!("{}.wav", now.timestamp_millis()),
        };
        let blob_path = self.base.join(AUDIO_DIR).join(&entry.file_name);
        fs::write(&blob_path, wav_bytes)
            .with_context(|| format!("Failed to write recording {}", blob_path.display()))?;

        let mut entries = self.load_audio_entries()?;
        entries.insert(0, entry.clone());
        self.write_collection(AUDIO_INDEX_FILE, &entries)?;
        tracing::info!(file = %entry.file_name, bytes = wav_bytes.len(), "saved recording");
        Ok(entry)
    }

    pub fn audio_path(&self, entry: &AudioEntry) -> PathBuf {
        self.base.join(AUDIO_DIR).join(&entry.file_name)
    }

    // --- Credential ---

    pub fn api_key(&self) -> Result<Option<String>> {
        let path = self.base.join(API_KEY_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let key: String = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt credential file {}", path.display()))?;
        Ok(Some(key))
    }

    pub fn set_api_key(&self, key: &str) -> Result<()> {
        let path = self.base.join(API_KEY_FILE);
        fs::write(&path, serde_json::to_string(key)?)?;
        tracing::info!("API key stored");
        Ok(())
    }

    // --- Settings ---

    pub fn load_settings(&self) -> AppSettings {
        let path = self.base.join(SETTINGS_FILE);
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(settings) = serde_json::from_str(&content) {
                return settings;
            }
            tracing::warn!(path = %path.display(), "unreadable settings, using defaults");
        }
        AppSettings::default()
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let path = self.base.join(SETTINGS_FILE);
        fs::write(&path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }

    // --- Internals ---

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.base.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Corrupt collection file {}", path.display()))
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.base.join(file);
        fs::write(&path, serde_json::to_string_pretty(items)?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::journal::JournalEntry;

    fn temp_vault() -> (tempfile::TempDir, Vault) {
        let dir = tempfile::tempdir().unwrap();
        let vault = Vault::with_base(dir.path()).unwrap();
        (dir, vault)
    }

    #[test]
    fn test_missing_collections_read_empty() {
        let (_dir, vault) = temp_vault();
        assert!(vault.load_journal().unwrap().is_empty());
        assert!(vault.load_somatic_logs().unwrap().is_empty());
        assert!(vault.load_audio_entries().unwrap().is_empty());
        assert!(vault.api_key().unwrap().is_none());
    }

    #[test]
    fn test_journal_entries_are_newest_first() {
        let (_dir, vault) = temp_vault();
        let mut first = JournalEntry::text("first", vec![], "a");
        first.id = 1;
        let mut second = JournalEntry::text("second", vec![], "b");
        second.id = 2;
        vault.save_journal_entry(first).unwrap();
        vault.save_journal_entry(second).unwrap();

        let entries = vault.load_journal().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "second");
        assert_eq!(entries[1].title, "first");
    }

    #[test]
    fn test_corrupt_collection_is_an_error() {
        let (dir, vault) = temp_vault();
        std::fs::write(dir.path().join("chiron_journal.json"), "not json").unwrap();
        assert!(vault.load_journal().is_err());
    }

    #[test]
    fn test_api_key_roundtrip() {
        let (_dir, vault) = temp_vault();
        vault.set_api_key("AIza-test").unwrap();
        assert_eq!(vault.api_key().unwrap().as_deref(), Some("AIza-test"));
    }

    #[test]
    fn test_audio_recording_writes_blob_and_index() {
        let (_dir, vault) = temp_vault();
        let entry = vault.save_audio_recording(b"RIFFdata").unwrap();
        let path = vault.audio_path(&entry);
        assert!(path.exists());
        assert_eq!(std::fs::read(path).unwrap(), b"RIFFdata");
        let index = vault.load_audio_entries().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].file_name, entry.file_name);
    }

    #[test]
    fn test_settings_default_when_missing() {
        let (_dir, vault) = temp_vault();
        let settings = vault.load_settings();
        assert_eq!(settings.gemini_model, "gemini-2.5-flash");
    }
}

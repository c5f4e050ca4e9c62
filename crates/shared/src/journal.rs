//! Core data model: journal entries, somatic logs, audio recordings,
//! and the tag frequency mapping behind the constellation view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed body-map regions for somatic logging. The stored identity is the
/// lowercase id string, exact-match.
pub const BODY_REGIONS: [&str; 7] = [
    "head", "throat", "chest", "stomach", "arms", "hands", "legs",
];

/// Kind of journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Text,
    Somatic,
}

/// A saved journal entry. Entries are immutable once written and are kept
/// newest-first in the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Epoch milliseconds at creation, doubles as the entry id.
    pub id: i64,
    pub kind: EntryKind,
    pub created_at: DateTime<Utc>,
    pub title: String,
    /// Raw comma-split tags. May contain the empty string when the user
    /// left the tag field blank.
    pub tags: Vec<String>,
    pub body: String,
}

impl JournalEntry {
    pub fn text(title: impl Into<String>, tags: Vec<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            kind: EntryKind::Text,
            created_at: now,
            title: title.into(),
            tags,
            body: body.into(),
        }
    }
}

/// A single body-sensation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomaticLogEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    /// One of [`BODY_REGIONS`].
    pub region: String,
    /// 0..=10
    pub intensity: u8,
}

impl SomaticLogEntry {
    pub fn new(region: impl Into<String>, intensity: u8) -> Self {
        let now = Utc::now();
        Self {
            id: now.timestamp_millis(),
            created_at: now,
            region: region.into(),
            intensity: intensity.min(10),
        }
    }
}

/// Index record for a stored audio recording. The WAV blob itself lives
/// next to the index under the vault's audio directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub file_name: String,
}

/// Split a raw tag field on commas and trim each piece. Mirrors how tags
/// are entered: a blank field yields a single empty tag, which list
/// rendering and the frequency map both know to skip.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.trim().split(',').map(|t| t.trim().to_string()).collect()
}

/// Count how many entries carry each non-empty tag. Tag identity is the
/// exact string, case-sensitive; no normalization.
pub fn compute_tag_frequencies(entries: &[JournalEntry]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        for tag in &entry.tags {
            if !tag.is_empty() {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
    }
    counts
}

//! Builds the per-turn system instruction from the persona prompt plus
//! session context.

use shared::journal::JournalEntry;

/// Append the session context clauses to a base prompt, in fixed order:
/// base, then the drawn archetype, then the newest journal entry. Somatic
/// logs and audio recordings are never consulted.
pub fn assemble_instruction(
    base: &str,
    archetype: Option<&str>,
    latest_entry: Option<&JournalEntry>,
) -> String {
    let mut instruction = base.to_string();

    if let Some(name) = archetype {
        instruction.push_str(&format!(
            "\nContext: The user recently drew the archetype card: {}. Reference this if relevant.",
            name
        ));
    }

    if let Some(entry) = latest_entry {
        // Char-prefix truncation at 100, ellipsis appended regardless of
        // the body's length.
        let preview: String = entry.body.chars().take(100).collect();
        instruction.push_str(&format!(
            "\nContext: The user's most recent journal entry is titled \"{}\". Body: \"{}...\".",
            entry.title, preview
        ));
    }

    instruction
}

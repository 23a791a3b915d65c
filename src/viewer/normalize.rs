//! Note text normalization.
//!
//! Source notes arrive with encoding noise: stray control characters from
//! EHR exports, tab-padded columns, mixed line endings. Normalization
//! absorbs that noise before display while keeping paragraph structure.

use regex::Regex;

/// Normalize raw note text for display.
///
/// Contract, in order:
/// 1. line endings unify to `\n`; other control characters become a space
/// 2. runs of 4+ horizontal whitespace become a paragraph break
/// 3. trailing horizontal whitespace before a line break is stripped
/// 4. the whole text is trimmed
///
/// Idempotent: normalizing twice yields the same text as normalizing once.
pub fn normalize_note_text(raw: &str) -> String {
    // Unify line endings first so the control-character pass can keep `\n`.
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");

    let printable: String = unified
        .chars()
        .map(|c| {
            if c == '\n' || c == '\t' {
                c
            } else if c.is_control() {
                ' '
            } else {
                c
            }
        })
        .collect();

    // Column padding in the source renders as a wide whitespace run; treat
    // 4+ horizontal characters as an intended paragraph break.
    let paragraph_runs = Regex::new(r"[ \t]{4,}").unwrap();
    let broken = paragraph_runs.replace_all(&printable, "\n\n");

    let trailing = Regex::new(r"[ \t]+\n").unwrap();
    let stripped = trailing.replace_all(&broken, "\n");

    stripped.trim().to_string()
}

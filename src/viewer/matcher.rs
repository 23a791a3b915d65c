//! Quote-to-note matching.
//!
//! A citation's quote is rarely byte-identical to the note it came from:
//! the summarizer collapses whitespace and the note itself may carry tab
//! runs or line breaks between the same words. Matching therefore works
//! word-by-word, tolerating any whitespace between words, and treats the
//! quote as literal text (never as pattern syntax).

use regex::{Regex, RegexBuilder};

/// A located occurrence of a quote inside a note body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteMatch {
    /// Byte offset of the match start in the note text.
    pub start: usize,
    /// Byte length of the matched substring. May differ from the quote's
    /// length when the note spells the whitespace differently.
    pub len: usize,
}

impl QuoteMatch {
    /// Byte offset one past the end of the match.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Build the case-insensitive, whitespace-tolerant pattern for a quote.
///
/// Returns `None` when the quote has no matchable words (empty or
/// whitespace-only) — callers treat that as a non-match, never an error.
fn quote_pattern(quote: &str) -> Option<Regex> {
    let words: Vec<String> = quote.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = words.join(r"\s+");
    // Escaped words contain no pattern syntax; build cannot fail on
    // metacharacters. The guard keeps malformed input a non-match anyway.
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

/// Locate the first occurrence of `quote` in `note_text`.
///
/// Whitespace runs between the quote's words match any whitespace in the
/// note; comparison is case-insensitive; everything else is literal.
pub fn match_quote(note_text: &str, quote: &str) -> Option<QuoteMatch> {
    if note_text.is_empty() {
        return None;
    }
    let re = quote_pattern(quote)?;
    re.find(note_text).map(|m| QuoteMatch {
        start: m.start(),
        len: m.len(),
    })
}

/// Locate every non-overlapping occurrence of `quote` in `note_text`,
/// in ascending offset order (each search resumes past the previous
/// match). Used by the action-evidence context, which highlights all
/// occurrences and scrolls to the first.
pub fn find_quote_occurrences(note_text: &str, quote: &str) -> Vec<QuoteMatch> {
    if note_text.is_empty() {
        return Vec::new();
    }
    let Some(re) = quote_pattern(quote) else {
        return Vec::new();
    };
    re.find_iter(note_text)
        .map(|m| QuoteMatch {
            start: m.start(),
            len: m.len(),
        })
        .collect()
}

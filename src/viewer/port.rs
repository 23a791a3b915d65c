//! Rendering port — the seam between viewer logic and the host UI.
//!
//! The session never touches a real presentation layer. Every visual
//! side effect (expansion, highlight markup, notices, scrolling) goes
//! through [`NoteView`], so the matching and state-machine logic runs
//! unchanged against a webview, a TUI, or the recording fake the tests
//! use.

use super::matcher::QuoteMatch;
use crate::models::NoteId;

/// Where a scroll request should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// A rendered note container, addressed by note id.
    Note(NoteId),
    /// A named summary section.
    Section(String),
    /// The top of the summary.
    SummaryTop,
}

/// Vertical placement of the scrolled-to element in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAlignment {
    /// Centered — used when revealing a highlighted passage.
    Center,
    /// Aligned to the viewport top — used when revealing a notice or a
    /// section heading.
    Start,
}

/// Host-side rendering operations the viewer session drives.
///
/// All methods are infallible: a host that cannot honor an operation
/// (note no longer rendered, scroll already in flight) ignores it.
pub trait NoteView {
    /// Whether a note with this id is rendered in the current view.
    fn contains_note(&self, note_id: NoteId) -> bool;

    /// The currently displayed text of a note.
    fn note_text(&self, note_id: NoteId) -> Option<String>;

    /// Natural (unclipped) content height of a note, in pixels.
    fn content_height(&self, note_id: NoteId) -> Option<u32>;

    /// Force a collapsed note into its expanded presentation.
    fn expand_note(&mut self, note_id: NoteId);

    /// Wrap the given spans of a note's displayed text in highlight markup.
    fn apply_highlight(&mut self, note_id: NoteId, spans: &[QuoteMatch]);

    /// Remove highlight markup from a note, leaving its text intact.
    fn clear_highlight(&mut self, note_id: NoteId);

    /// Show the dismissible "cited text could not be located" notice on a note.
    fn show_unmatched_notice(&mut self, note_id: NoteId);

    /// Remove any unmatched-text notice from a note.
    fn clear_notice(&mut self, note_id: NoteId);

    /// Smooth-scroll the viewport to a target.
    fn scroll_to(&mut self, target: ScrollTarget, alignment: ScrollAlignment);

    /// Briefly flash a summary section after returning to it.
    fn flash_section(&mut self, section_id: &str);
}

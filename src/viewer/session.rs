//! Per-view session state.
//!
//! One `ViewerSession` exists per open patient view and owns every piece
//! of transient presentation state: the highlight machine, note and card
//! collapse maps, and section navigation. Nothing lives in globals, so
//! navigating away is a plain `reset()` and tests construct state
//! directly.

use std::time::Instant;

use crate::config::ViewerConfig;
use crate::models::NoteId;

use super::collapse::{CardGroup, NoteCollapse};
use super::highlight::{ActiveHighlight, Generation, HighlightMachine};
use super::matcher::{find_quote_occurrences, match_quote, QuoteMatch};
use super::navigation::SectionTracker;
use super::port::{NoteView, ScrollAlignment, ScrollTarget};

/// Observer invoked on every citation activation, before any visual work.
pub type CitationCallback = Box<dyn FnMut(NoteId, Option<&str>, Option<&str>)>;

/// What a citation activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The quote was located; its spans are highlighted and the note is
    /// centered in the viewport.
    Highlighted {
        note_id: NoteId,
        spans: usize,
        generation: Generation,
    },
    /// The activation carried no quote; the note was revealed without
    /// text highlighting.
    Revealed { note_id: NoteId },
    /// The quote could not be located; the dismissible notice is showing.
    QuoteNotFound { note_id: NoteId },
    /// The citation references a note that is not in this view. Logged
    /// and otherwise ignored.
    NoteMissing { note_id: NoteId },
}

pub struct ViewerSession {
    config: ViewerConfig,
    highlight: HighlightMachine,
    notes: NoteCollapse,
    cards: CardGroup,
    sections: SectionTracker,
    /// The note currently showing an unmatched-quote notice, if any.
    notice_on: Option<NoteId>,
    on_citation: Option<CitationCallback>,
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        let highlight = HighlightMachine::new(config.highlight_dwell);
        let notes = NoteCollapse::new(config.collapse_threshold_px);
        let sections = SectionTracker::new(config.section_visibility);
        Self {
            config,
            highlight,
            notes,
            cards: CardGroup::new(),
            sections,
            notice_on: None,
            on_citation: None,
        }
    }

    /// Register the `(note_id, section_id, quote)` observer the display
    /// components contract expects.
    pub fn on_citation_activate(
        &mut self,
        callback: impl FnMut(NoteId, Option<&str>, Option<&str>) + 'static,
    ) {
        self.on_citation = Some(Box::new(callback));
    }

    // ── Citation activation ──────────────────────────────

    /// Activate a single citation: locate its quote in the target note,
    /// highlight the first occurrence and reveal it.
    pub fn activate_citation(
        &mut self,
        view: &mut dyn NoteView,
        note_id: NoteId,
        section_id: Option<&str>,
        quote: Option<&str>,
        now: Instant,
    ) -> ActivationOutcome {
        self.activate(view, note_id, section_id, quote, now, false)
    }

    /// Activate an action-evidence quote: highlight every occurrence in
    /// the target note and scroll to the first.
    pub fn activate_evidence(
        &mut self,
        view: &mut dyn NoteView,
        note_id: NoteId,
        section_id: Option<&str>,
        quote: &str,
        now: Instant,
    ) -> ActivationOutcome {
        self.activate(view, note_id, section_id, Some(quote), now, true)
    }

    fn activate(
        &mut self,
        view: &mut dyn NoteView,
        note_id: NoteId,
        section_id: Option<&str>,
        quote: Option<&str>,
        now: Instant,
        all_occurrences: bool,
    ) -> ActivationOutcome {
        if let Some(callback) = self.on_citation.as_mut() {
            callback(note_id, section_id, quote);
        }
        if let Some(section) = section_id {
            self.sections.remember_section(section);
        }

        if !view.contains_note(note_id) {
            tracing::warn!(note_id, "citation references a note not present in this view");
            return ActivationOutcome::NoteMissing { note_id };
        }

        // Supersede whatever was showing before touching the new target.
        self.clear_visuals(view);

        if let Some(height) = view.content_height(note_id) {
            if self.notes.overflows(height) && !self.notes.is_expanded(note_id, height) {
                self.notes.force_expand(note_id);
                view.expand_note(note_id);
            }
        }

        let Some(quote) = quote else {
            view.scroll_to(ScrollTarget::Note(note_id), ScrollAlignment::Center);
            return ActivationOutcome::Revealed { note_id };
        };

        let text = view.note_text(note_id).unwrap_or_default();
        let spans: Vec<QuoteMatch> = if all_occurrences {
            find_quote_occurrences(&text, quote)
        } else {
            match_quote(&text, quote).into_iter().collect()
        };

        if spans.is_empty() {
            tracing::debug!(note_id, quote, "cited text not located in note");
            view.show_unmatched_notice(note_id);
            self.notice_on = Some(note_id);
            view.scroll_to(ScrollTarget::Note(note_id), ScrollAlignment::Start);
            return ActivationOutcome::QuoteNotFound { note_id };
        }

        view.apply_highlight(note_id, &spans);
        view.scroll_to(ScrollTarget::Note(note_id), ScrollAlignment::Center);
        let generation = self.highlight.arm(note_id, quote, now);
        tracing::debug!(note_id, spans = spans.len(), generation, "highlight applied");
        ActivationOutcome::Highlighted {
            note_id,
            spans: spans.len(),
            generation,
        }
    }

    // ── Expiry ───────────────────────────────────────────

    /// Timer callback for a specific highlight generation. A stale
    /// generation (superseded before its timer fired) does nothing.
    /// Clearing never re-collapses the note.
    pub fn expire_highlight(&mut self, view: &mut dyn NoteView, generation: Generation) {
        if let Some(note_id) = self.highlight.expire(generation) {
            view.clear_highlight(note_id);
        }
    }

    /// Clock-driven variant: clear the active highlight if its deadline
    /// has passed.
    pub fn expire_due(&mut self, view: &mut dyn NoteView, now: Instant) {
        if let Some(note_id) = self.highlight.expire_due(now) {
            view.clear_highlight(note_id);
        }
    }

    /// Deadline of the active highlight, for hosts scheduling a wakeup.
    pub fn highlight_deadline(&self) -> Option<Instant> {
        self.highlight.deadline()
    }

    pub fn active_highlight(&self) -> Option<&ActiveHighlight> {
        self.highlight.active()
    }

    // ── Navigation ───────────────────────────────────────

    /// Feed one viewport-intersection sample.
    pub fn observe_section(&mut self, section_id: &str, visible_ratio: f32) {
        self.sections.observe(section_id, visible_ratio);
    }

    /// Quick-nav click: make a section active and scroll to it.
    pub fn select_section(&mut self, view: &mut dyn NoteView, section_id: &str) {
        self.sections.select(section_id);
        view.scroll_to(
            ScrollTarget::Section(section_id.to_string()),
            ScrollAlignment::Start,
        );
    }

    /// Return to the summary after reading a note: lands on the section
    /// the last citation jump started from, or the summary top.
    pub fn back_to_summary(&mut self, view: &mut dyn NoteView) {
        match self.sections.return_target() {
            ScrollTarget::Section(section) => {
                view.scroll_to(
                    ScrollTarget::Section(section.clone()),
                    ScrollAlignment::Center,
                );
                view.flash_section(&section);
            }
            target => view.scroll_to(target, ScrollAlignment::Start),
        }
    }

    // ── State access ─────────────────────────────────────

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn notes(&self) -> &NoteCollapse {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteCollapse {
        &mut self.notes
    }

    pub fn cards(&self) -> &CardGroup {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut CardGroup {
        &mut self.cards
    }

    pub fn sections(&self) -> &SectionTracker {
        &self.sections
    }

    // ── Teardown ─────────────────────────────────────────

    /// View unmount / navigation away: cancel any pending expiry, clear
    /// all visuals, and return every map to its initial state.
    pub fn reset(&mut self, view: &mut dyn NoteView) {
        self.clear_visuals(view);
        self.notes.reset();
        self.cards.reset();
        self.sections.reset();
    }

    /// Clear the active highlight and any notice, cancelling the pending
    /// deadline. Collapse state is left alone.
    fn clear_visuals(&mut self, view: &mut dyn NoteView) {
        if let Some(note_id) = self.highlight.reset() {
            view.clear_highlight(note_id);
        }
        if let Some(note_id) = self.notice_on.take() {
            view.clear_notice(note_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    struct FakeNote {
        text: String,
        height: u32,
    }

    /// Recording fake for the rendering port.
    #[derive(Default)]
    struct FakeView {
        notes: HashMap<NoteId, FakeNote>,
        highlighted: HashMap<NoteId, Vec<QuoteMatch>>,
        expanded: HashSet<NoteId>,
        notices: HashSet<NoteId>,
        scrolls: Vec<(ScrollTarget, ScrollAlignment)>,
        flashed: Vec<String>,
    }

    impl FakeView {
        fn with_note(mut self, note_id: NoteId, text: &str, height: u32) -> Self {
            self.notes.insert(
                note_id,
                FakeNote {
                    text: text.to_string(),
                    height,
                },
            );
            self
        }

        fn last_scroll(&self) -> &(ScrollTarget, ScrollAlignment) {
            self.scrolls.last().expect("no scroll recorded")
        }
    }

    impl NoteView for FakeView {
        fn contains_note(&self, note_id: NoteId) -> bool {
            self.notes.contains_key(&note_id)
        }

        fn note_text(&self, note_id: NoteId) -> Option<String> {
            self.notes.get(&note_id).map(|n| n.text.clone())
        }

        fn content_height(&self, note_id: NoteId) -> Option<u32> {
            self.notes.get(&note_id).map(|n| n.height)
        }

        fn expand_note(&mut self, note_id: NoteId) {
            self.expanded.insert(note_id);
        }

        fn apply_highlight(&mut self, note_id: NoteId, spans: &[QuoteMatch]) {
            self.highlighted.insert(note_id, spans.to_vec());
        }

        fn clear_highlight(&mut self, note_id: NoteId) {
            self.highlighted.remove(&note_id);
        }

        fn show_unmatched_notice(&mut self, note_id: NoteId) {
            self.notices.insert(note_id);
        }

        fn clear_notice(&mut self, note_id: NoteId) {
            self.notices.remove(&note_id);
        }

        fn scroll_to(&mut self, target: ScrollTarget, alignment: ScrollAlignment) {
            self.scrolls.push((target, alignment));
        }

        fn flash_section(&mut self, section_id: &str) {
            self.flashed.push(section_id.to_string());
        }
    }

    fn session() -> ViewerSession {
        ViewerSession::new(ViewerConfig::default())
    }

    const NOTE_TEXT: &str = "Patient   denies\tsmoking.\n\nFollow up in 2 weeks.";

    // ── Activation ──────────────────────────────────────

    #[test]
    fn activation_highlights_and_centers_note() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();

        let outcome =
            s.activate_citation(&mut view, 4, Some("discharge"), Some("denies smoking"), Instant::now());

        match outcome {
            ActivationOutcome::Highlighted { note_id, spans, .. } => {
                assert_eq!(note_id, 4);
                assert_eq!(spans, 1);
            }
            other => panic!("expected Highlighted, got {other:?}"),
        }
        let spans = &view.highlighted[&4];
        assert_eq!(spans[0].start, NOTE_TEXT.find("denies").unwrap());
        assert_eq!(
            view.last_scroll(),
            &(ScrollTarget::Note(4), ScrollAlignment::Center)
        );
    }

    #[test]
    fn overflowing_note_is_force_expanded() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 1200);
        let mut s = session();

        s.activate_citation(&mut view, 4, None, Some("denies smoking"), Instant::now());

        assert!(view.expanded.contains(&4));
        assert!(s.notes().is_expanded(4, 1200));
    }

    #[test]
    fn short_note_is_not_expanded() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 200);
        let mut s = session();

        s.activate_citation(&mut view, 4, None, Some("denies smoking"), Instant::now());

        assert!(!view.expanded.contains(&4));
    }

    #[test]
    fn unmatched_quote_shows_notice_without_panicking() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();

        let outcome = s.activate_citation(
            &mut view,
            4,
            None,
            Some("never present in note"),
            Instant::now(),
        );

        assert_eq!(outcome, ActivationOutcome::QuoteNotFound { note_id: 4 });
        assert!(view.notices.contains(&4));
        assert!(view.highlighted.is_empty());
        assert_eq!(
            view.last_scroll(),
            &(ScrollTarget::Note(4), ScrollAlignment::Start)
        );
        // No dwell armed for a notice.
        assert!(s.highlight_deadline().is_none());
    }

    #[test]
    fn metacharacter_quote_degrades_to_not_found() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();
        let outcome =
            s.activate_citation(&mut view, 4, None, Some("cost is $5 (approx.)"), Instant::now());
        assert_eq!(outcome, ActivationOutcome::QuoteNotFound { note_id: 4 });
    }

    #[test]
    fn missing_note_is_logged_and_ignored() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();

        let outcome =
            s.activate_citation(&mut view, 99, None, Some("denies smoking"), Instant::now());

        assert_eq!(outcome, ActivationOutcome::NoteMissing { note_id: 99 });
        assert!(view.scrolls.is_empty());
        assert!(view.highlighted.is_empty());
        assert!(view.notices.is_empty());
    }

    #[test]
    fn quoteless_activation_reveals_without_highlight() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();

        let outcome = s.activate_citation(&mut view, 4, Some("housing"), None, Instant::now());

        assert_eq!(outcome, ActivationOutcome::Revealed { note_id: 4 });
        assert!(view.highlighted.is_empty());
        assert_eq!(
            view.last_scroll(),
            &(ScrollTarget::Note(4), ScrollAlignment::Center)
        );
    }

    #[test]
    fn callback_receives_activation_arguments() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<(NoteId, Option<String>, Option<String>)>>> =
            Rc::default();
        let sink = seen.clone();

        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();
        s.on_citation_activate(move |note_id, section, quote| {
            sink.borrow_mut().push((
                note_id,
                section.map(str::to_string),
                quote.map(str::to_string),
            ));
        });

        s.activate_citation(
            &mut view,
            4,
            Some("discharge"),
            Some("denies smoking"),
            Instant::now(),
        );

        let calls = seen.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (
                4,
                Some("discharge".to_string()),
                Some("denies smoking".to_string())
            )
        );
    }

    // ── Supersession & expiry ───────────────────────────

    #[test]
    fn new_activation_supersedes_previous_highlight() {
        let mut view = FakeView::default()
            .with_note(4, NOTE_TEXT, 300)
            .with_note(9, "Lives alone in an SRO downtown.", 300);
        let mut s = session();
        let now = Instant::now();

        s.activate_citation(&mut view, 4, None, Some("denies smoking"), now);
        s.activate_citation(&mut view, 9, None, Some("lives alone"), now);

        assert!(!view.highlighted.contains_key(&4), "old highlight cleared");
        assert!(view.highlighted.contains_key(&9));
        assert_eq!(s.active_highlight().unwrap().note_id, 9);
    }

    #[test]
    fn stale_timer_does_not_clear_newer_highlight() {
        let mut view = FakeView::default()
            .with_note(4, NOTE_TEXT, 300)
            .with_note(9, "Lives alone in an SRO downtown.", 300);
        let mut s = session();
        let now = Instant::now();

        let first = s.activate_citation(&mut view, 4, None, Some("denies smoking"), now);
        let ActivationOutcome::Highlighted {
            generation: old_generation,
            ..
        } = first
        else {
            panic!("expected Highlighted");
        };

        // Second activation before the first dwell elapses.
        s.activate_citation(&mut view, 9, None, Some("lives alone"), now + Duration::from_secs(1));

        // The first highlight's 3s timer now fires — it must be a no-op.
        s.expire_highlight(&mut view, old_generation);
        assert!(
            view.highlighted.contains_key(&9),
            "stale timer cleared the newer highlight"
        );
    }

    #[test]
    fn expiry_clears_marking_but_not_expansion() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 1200);
        let mut s = session();
        let now = Instant::now();

        let outcome = s.activate_citation(&mut view, 4, None, Some("denies smoking"), now);
        let ActivationOutcome::Highlighted { generation, .. } = outcome else {
            panic!("expected Highlighted");
        };

        s.expire_highlight(&mut view, generation);

        assert!(!view.highlighted.contains_key(&4));
        assert!(view.expanded.contains(&4), "expiry must not re-collapse");
        assert!(s.notes().is_expanded(4, 1200));
    }

    #[test]
    fn clock_driven_expiry_waits_for_deadline() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();
        let now = Instant::now();

        s.activate_citation(&mut view, 4, None, Some("denies smoking"), now);

        s.expire_due(&mut view, now + Duration::from_secs(2));
        assert!(view.highlighted.contains_key(&4), "dwell not over yet");

        s.expire_due(&mut view, now + Duration::from_secs(3));
        assert!(!view.highlighted.contains_key(&4));
    }

    #[test]
    fn activation_clears_notice_from_previous_target() {
        let mut view = FakeView::default()
            .with_note(4, NOTE_TEXT, 300)
            .with_note(9, "Lives alone in an SRO downtown.", 300);
        let mut s = session();
        let now = Instant::now();

        s.activate_citation(&mut view, 4, None, Some("never present"), now);
        assert!(view.notices.contains(&4));

        s.activate_citation(&mut view, 9, None, Some("lives alone"), now);
        assert!(!view.notices.contains(&4), "stale notice must clear");
    }

    // ── Evidence (multi-occurrence) ─────────────────────

    #[test]
    fn evidence_highlights_every_occurrence() {
        let note = "fall risk noted. Reassessed: fall risk unchanged.";
        let mut view = FakeView::default().with_note(4, note, 300);
        let mut s = session();

        let outcome = s.activate_evidence(&mut view, 4, Some("needs"), "fall risk", Instant::now());

        match outcome {
            ActivationOutcome::Highlighted { spans, .. } => assert_eq!(spans, 2),
            other => panic!("expected Highlighted, got {other:?}"),
        }
        let spans = &view.highlighted[&4];
        assert_eq!(spans[0].start, 0, "first occurrence has the lowest offset");
        assert_eq!(
            view.last_scroll(),
            &(ScrollTarget::Note(4), ScrollAlignment::Center)
        );
    }

    #[test]
    fn evidence_not_found_uses_same_notice_policy() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();

        let outcome =
            s.activate_evidence(&mut view, 4, None, "never present in note", Instant::now());

        assert_eq!(outcome, ActivationOutcome::QuoteNotFound { note_id: 4 });
        assert!(view.notices.contains(&4));
    }

    // ── Navigation ──────────────────────────────────────

    #[test]
    fn back_to_summary_returns_to_remembered_section() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 300);
        let mut s = session();

        s.activate_citation(&mut view, 4, Some("discharge"), Some("denies smoking"), Instant::now());
        s.back_to_summary(&mut view);

        assert_eq!(
            view.last_scroll(),
            &(
                ScrollTarget::Section("discharge".to_string()),
                ScrollAlignment::Center
            )
        );
        assert_eq!(view.flashed, vec!["discharge".to_string()]);
    }

    #[test]
    fn back_to_summary_defaults_to_top() {
        let mut view = FakeView::default();
        let mut s = session();

        s.back_to_summary(&mut view);

        assert_eq!(
            view.last_scroll(),
            &(ScrollTarget::SummaryTop, ScrollAlignment::Start)
        );
        assert!(view.flashed.is_empty());
    }

    #[test]
    fn select_section_scrolls_and_activates() {
        let mut view = FakeView::default();
        let mut s = session();

        s.select_section(&mut view, "housing");

        assert_eq!(s.sections().active_section(), Some("housing"));
        assert_eq!(
            view.last_scroll(),
            &(
                ScrollTarget::Section("housing".to_string()),
                ScrollAlignment::Start
            )
        );
    }

    // ── Reset ───────────────────────────────────────────

    #[test]
    fn reset_clears_all_transient_state() {
        let mut view = FakeView::default().with_note(4, NOTE_TEXT, 1200);
        let mut s = session();
        let now = Instant::now();

        let outcome = s.activate_citation(&mut view, 4, Some("discharge"), Some("denies smoking"), now);
        let ActivationOutcome::Highlighted { generation, .. } = outcome else {
            panic!("expected Highlighted");
        };
        s.cards_mut().toggle("need-0");
        s.observe_section("discharge", 1.0);

        s.reset(&mut view);

        assert!(view.highlighted.is_empty());
        assert!(s.active_highlight().is_none());
        assert!(s.highlight_deadline().is_none());
        assert!(s.cards().is_empty());
        assert!(s.sections().active_section().is_none());
        assert!(!s.notes().is_expanded(4, 1200), "collapse map back to defaults");

        // A timer surviving navigation must find nothing to clear.
        s.expire_highlight(&mut view, generation);
        assert!(view.highlighted.is_empty());
    }
}

//! Collapse/expand presentation state.
//!
//! Two independent concerns share this module: notes that collapse when
//! their rendered height overflows a threshold, and summary cards that
//! collapse by default with a per-group "toggle all" control. The
//! aggregate "all expanded" indicator is derived from the member set on
//! demand rather than maintained as separate state.

use std::collections::HashMap;

use crate::models::NoteId;

/// Expanded/collapsed state for height-overflowing notes.
///
/// A note with no explicit override follows the default policy: expanded
/// when it fits under the threshold, collapsed when it overflows. Manual
/// toggles and highlight-driven expansion record overrides.
#[derive(Debug)]
pub struct NoteCollapse {
    threshold_px: u32,
    overrides: HashMap<NoteId, bool>,
}

impl NoteCollapse {
    pub fn new(threshold_px: u32) -> Self {
        Self {
            threshold_px,
            overrides: HashMap::new(),
        }
    }

    /// Whether content of this height overflows the collapse threshold
    /// (and therefore shows a manual toggle).
    pub fn overflows(&self, content_height: u32) -> bool {
        content_height > self.threshold_px
    }

    /// Whether a note is currently expanded.
    pub fn is_expanded(&self, note_id: NoteId, content_height: u32) -> bool {
        self.overrides
            .get(&note_id)
            .copied()
            .unwrap_or(!self.overflows(content_height))
    }

    /// Flip a note's state; returns the new state.
    pub fn toggle(&mut self, note_id: NoteId, content_height: u32) -> bool {
        let next = !self.is_expanded(note_id, content_height);
        self.overrides.insert(note_id, next);
        next
    }

    /// Force a note expanded (highlight targeting).
    pub fn force_expand(&mut self, note_id: NoteId) {
        self.overrides.insert(note_id, true);
    }

    /// Forget all overrides, returning every note to the default policy.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}

/// Expanded/collapsed state for a group of summary cards.
///
/// Cards default to collapsed. The aggregate is computed from the members
/// every time it is asked for, so cards registered after a "toggle all"
/// are accounted for automatically.
#[derive(Debug, Default)]
pub struct CardGroup {
    expanded: HashMap<String, bool>,
}

impl CardGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the group, collapsed, if not already present.
    pub fn register(&mut self, card_id: impl Into<String>) {
        self.expanded.entry(card_id.into()).or_insert(false);
    }

    pub fn is_expanded(&self, card_id: &str) -> bool {
        self.expanded.get(card_id).copied().unwrap_or(false)
    }

    /// Flip one card; unknown cards are registered first. Returns the new state.
    pub fn toggle(&mut self, card_id: &str) -> bool {
        let entry = self.expanded.entry(card_id.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Set every registered card to the same state.
    pub fn set_all(&mut self, expanded: bool) {
        for state in self.expanded.values_mut() {
            *state = expanded;
        }
    }

    /// Derived aggregate: true only when every registered card is expanded.
    pub fn all_expanded(&self) -> bool {
        !self.expanded.is_empty() && self.expanded.values().all(|&e| e)
    }

    /// The "toggle all" control: expand everything unless everything is
    /// already expanded, in which case collapse everything. Returns the
    /// state that was applied.
    pub fn toggle_all(&mut self) -> bool {
        let next = !self.all_expanded();
        self.set_all(next);
        next
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn reset(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── NoteCollapse ────────────────────────────────────

    #[test]
    fn short_notes_default_expanded() {
        let notes = NoteCollapse::new(500);
        assert!(!notes.overflows(300));
        assert!(notes.is_expanded(1, 300));
    }

    #[test]
    fn overflowing_notes_default_collapsed() {
        let notes = NoteCollapse::new(500);
        assert!(notes.overflows(501));
        assert!(!notes.is_expanded(1, 501));
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut notes = NoteCollapse::new(500);
        assert!(notes.toggle(1, 800), "collapsed note toggles open");
        assert!(notes.is_expanded(1, 800));
        assert!(!notes.toggle(1, 800));
        assert!(!notes.is_expanded(1, 800));
    }

    #[test]
    fn force_expand_overrides_overflow_default() {
        let mut notes = NoteCollapse::new(500);
        notes.force_expand(7);
        assert!(notes.is_expanded(7, 2000));
    }

    #[test]
    fn reset_restores_default_policy() {
        let mut notes = NoteCollapse::new(500);
        notes.force_expand(7);
        notes.reset();
        assert!(!notes.is_expanded(7, 2000));
    }

    // ── CardGroup ───────────────────────────────────────

    #[test]
    fn cards_default_collapsed() {
        let mut cards = CardGroup::new();
        cards.register("housing");
        assert!(!cards.is_expanded("housing"));
        assert!(!cards.is_expanded("never-registered"));
    }

    #[test]
    fn empty_group_is_not_all_expanded() {
        assert!(!CardGroup::new().all_expanded());
    }

    #[test]
    fn aggregate_follows_individual_toggles() {
        let mut cards = CardGroup::new();
        cards.register("need-0");
        cards.register("need-1");
        cards.toggle("need-0");
        assert!(!cards.all_expanded());
        cards.toggle("need-1");
        assert!(cards.all_expanded());
        cards.toggle("need-0");
        assert!(!cards.all_expanded());
    }

    #[test]
    fn toggle_all_expands_then_collapses() {
        let mut cards = CardGroup::new();
        cards.register("a");
        cards.register("b");
        assert!(cards.toggle_all());
        assert!(cards.all_expanded());
        assert!(!cards.toggle_all());
        assert!(!cards.is_expanded("a") && !cards.is_expanded("b"));
    }

    #[test]
    fn member_added_after_toggle_all_breaks_aggregate() {
        let mut cards = CardGroup::new();
        cards.register("a");
        cards.toggle_all();
        assert!(cards.all_expanded());

        // A card that appears later starts collapsed, so the derived
        // aggregate must stop reporting "all expanded" immediately.
        cards.register("late-arrival");
        assert!(!cards.all_expanded());

        // And the next toggle-all expands the newcomer too.
        assert!(cards.toggle_all());
        assert!(cards.is_expanded("late-arrival"));
    }

    #[test]
    fn toggle_unknown_card_registers_it() {
        let mut cards = CardGroup::new();
        assert!(cards.toggle("adhoc"));
        assert_eq!(cards.len(), 1);
        assert!(cards.all_expanded());
    }
}

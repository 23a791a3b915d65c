//! Highlight state machine.
//!
//! At most one note is highlighted at a time. Applying a highlight arms a
//! fixed dwell deadline; a newer activation supersedes the old one
//! outright and bumps a generation counter, so a timer armed for an
//! earlier highlight can never clear its successor.

use std::time::{Duration, Instant};

use crate::models::NoteId;

/// Monotonic identity of one applied highlight.
pub type Generation = u64;

/// The single active highlight target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveHighlight {
    pub note_id: NoteId,
    pub quote: String,
    pub deadline: Instant,
    pub generation: Generation,
}

/// `Idle` / `Highlighting` state with generation-guarded expiry.
#[derive(Debug)]
pub struct HighlightMachine {
    dwell: Duration,
    active: Option<ActiveHighlight>,
    next_generation: Generation,
}

impl HighlightMachine {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            active: None,
            next_generation: 0,
        }
    }

    /// Arm a highlight for `note_id`, superseding any active one.
    ///
    /// Returns the generation the caller hands to its expiry timer; only
    /// that generation can later clear this highlight.
    pub fn arm(&mut self, note_id: NoteId, quote: &str, now: Instant) -> Generation {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.active = Some(ActiveHighlight {
            note_id,
            quote: quote.to_string(),
            deadline: now + self.dwell,
            generation,
        });
        generation
    }

    /// The active highlight, if any.
    pub fn active(&self) -> Option<&ActiveHighlight> {
        self.active.as_ref()
    }

    /// Whether `note_id` is the currently highlighted note.
    pub fn is_highlighted(&self, note_id: NoteId) -> bool {
        self.active.as_ref().is_some_and(|h| h.note_id == note_id)
    }

    /// When the active highlight is due to clear.
    pub fn deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|h| h.deadline)
    }

    /// Expire a specific generation.
    ///
    /// Returns the note whose marking should be cleared when the
    /// generation matches the active highlight; stale generations (a
    /// timer that was superseded) are no-ops.
    pub fn expire(&mut self, generation: Generation) -> Option<NoteId> {
        if self
            .active
            .as_ref()
            .is_some_and(|h| h.generation == generation)
        {
            return self.active.take().map(|h| h.note_id);
        }
        None
    }

    /// Expire whatever is due at `now`. For hosts that poll a clock
    /// instead of scheduling one timer per generation.
    pub fn expire_due(&mut self, now: Instant) -> Option<NoteId> {
        if self.active.as_ref().is_some_and(|h| now >= h.deadline) {
            return self.active.take().map(|h| h.note_id);
        }
        None
    }

    /// Drop the active highlight and its pending deadline, returning the
    /// note that was highlighted.
    pub fn reset(&mut self) -> Option<NoteId> {
        self.active.take().map(|h| h.note_id)
    }
}

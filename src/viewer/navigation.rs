//! Section navigation state.
//!
//! Tracks which summary section is "active" for the quick-nav sidebar
//! (driven by viewport-intersection samples from the host) and remembers
//! the section a citation jump started from, so "back to summary" can
//! return there.

use super::port::ScrollTarget;

/// Per-view navigation state.
#[derive(Debug)]
pub struct SectionTracker {
    visibility_threshold: f32,
    active: Option<String>,
    last_summary_section: Option<String>,
}

impl SectionTracker {
    pub fn new(visibility_threshold: f32) -> Self {
        Self {
            visibility_threshold,
            active: None,
            last_summary_section: None,
        }
    }

    /// Feed one intersection sample from the host's visibility observer.
    ///
    /// A section at or above the visibility threshold becomes the active
    /// section; samples below the threshold leave the pointer untouched.
    /// Ordering relative to highlight transitions is irrelevant — this
    /// only moves a pointer.
    pub fn observe(&mut self, section_id: &str, visible_ratio: f32) {
        if visible_ratio >= self.visibility_threshold {
            self.active = Some(section_id.to_string());
        }
    }

    /// Directly select a section (quick-nav click).
    pub fn select(&mut self, section_id: &str) {
        self.active = Some(section_id.to_string());
    }

    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Remember where a citation jump started.
    pub fn remember_section(&mut self, section_id: &str) {
        self.last_summary_section = Some(section_id.to_string());
    }

    pub fn last_section(&self) -> Option<&str> {
        self.last_summary_section.as_deref()
    }

    /// Where "back to summary" should land: the remembered section, or
    /// the top of the summary when no jump has been recorded.
    pub fn return_target(&self) -> ScrollTarget {
        match &self.last_summary_section {
            Some(section) => ScrollTarget::Section(section.clone()),
            None => ScrollTarget::SummaryTop,
        }
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.last_summary_section = None;
    }
}

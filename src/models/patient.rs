use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::note::Note;
use super::summary::NoteSummary;

/// Identifier of a patient in the corpus.
pub type PatientId = u32;

/// One timestamped summarization run over a patient's notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub timestamp: NaiveDateTime,
    pub summary: NoteSummary,
}

/// A patient as stored in the corpus file: every note plus every
/// summary snapshot generated for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientEntry {
    pub patient_id: PatientId,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub snapshots: Vec<SummarySnapshot>,
}

/// What a patient view renders: one summary snapshot plus the ordered
/// note collection (newest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: PatientId,
    pub generated_at: NaiveDateTime,
    pub summary: NoteSummary,
    pub notes: Vec<Note>,
}

//! Patient record source.
//!
//! Loads the pre-computed summarization corpus from disk: one JSON file
//! holding every patient's notes plus their timestamped summary
//! snapshots. Records are immutable once loaded and held in memory for
//! the lifetime of the process; a patient view reads them exactly once.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::models::{PatientEntry, PatientId, PatientRecord};
use crate::viewer::normalize_note_text;

/// Errors from loading or querying the corpus. These surface as
/// page-level failures, unlike quote-match misses which are ordinary
/// viewer outcomes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read corpus at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Corpus is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("No data found for patient {0}")]
    UnknownPatient(PatientId),
    #[error("Patient {0} has no summary snapshots")]
    NoSummary(PatientId),
    #[error("Patient {patient_id} has no summary for timestamp {timestamp}")]
    UnknownTimestamp {
        patient_id: PatientId,
        timestamp: NaiveDateTime,
    },
}

/// In-memory corpus of patient records.
#[derive(Debug)]
pub struct PatientStore {
    patients: BTreeMap<PatientId, PatientEntry>,
}

impl PatientStore {
    /// Load the corpus file (a JSON array of patient entries).
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let entries: Vec<PatientEntry> = serde_json::from_str(&raw)?;
        let store = Self::from_entries(entries);
        tracing::info!(
            patients = store.patients.len(),
            path = %path.display(),
            "patient corpus loaded"
        );
        store.audit_citations();
        Ok(store)
    }

    /// Build a store from already-parsed entries (tests, embedding).
    pub fn from_entries(entries: Vec<PatientEntry>) -> Self {
        let patients = entries
            .into_iter()
            .map(|entry| (entry.patient_id, entry))
            .collect();
        Self { patients }
    }

    /// All patient ids in the corpus, ascending.
    pub fn patient_ids(&self) -> Vec<PatientId> {
        self.patients.keys().copied().collect()
    }

    /// Summary snapshot timestamps for one patient, newest first.
    pub fn timestamps(&self, patient_id: PatientId) -> Result<Vec<NaiveDateTime>, StoreError> {
        let entry = self.entry(patient_id)?;
        let mut stamps: Vec<NaiveDateTime> =
            entry.snapshots.iter().map(|s| s.timestamp).collect();
        stamps.sort_unstable_by(|a, b| b.cmp(a));
        Ok(stamps)
    }

    /// The record a patient view renders: the requested snapshot (or the
    /// newest when none is named) plus the notes, newest first.
    ///
    /// Note bodies are normalized here, once, so the displayed text and
    /// the text the quote matcher runs against are the same thing.
    pub fn record(
        &self,
        patient_id: PatientId,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<PatientRecord, StoreError> {
        let entry = self.entry(patient_id)?;

        let snapshot = match timestamp {
            Some(ts) => entry
                .snapshots
                .iter()
                .find(|s| s.timestamp == ts)
                .ok_or(StoreError::UnknownTimestamp {
                    patient_id,
                    timestamp: ts,
                })?,
            None => entry
                .snapshots
                .iter()
                .max_by_key(|s| s.timestamp)
                .ok_or(StoreError::NoSummary(patient_id))?,
        };

        let mut notes = entry.notes.clone();
        notes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        for note in &mut notes {
            note.note_text = normalize_note_text(&note.note_text);
        }

        Ok(PatientRecord {
            patient_id,
            generated_at: snapshot.timestamp,
            summary: snapshot.summary.clone(),
            notes,
        })
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn entry(&self, patient_id: PatientId) -> Result<&PatientEntry, StoreError> {
        self.patients
            .get(&patient_id)
            .ok_or(StoreError::UnknownPatient(patient_id))
    }

    /// Warn about citations that can never resolve to a highlight because
    /// their note id is absent from the patient's note set. The records
    /// are served unchanged — a dangling citation degrades to the
    /// missing-note path at view time.
    fn audit_citations(&self) {
        for entry in self.patients.values() {
            let note_ids: std::collections::HashSet<_> =
                entry.notes.iter().map(|n| n.note_id).collect();
            for snapshot in &entry.snapshots {
                for citation in snapshot.summary.citations() {
                    if !note_ids.contains(&citation.note_id) {
                        tracing::warn!(
                            patient_id = entry.patient_id,
                            note_id = citation.note_id,
                            "summary citation references a note missing from the record"
                        );
                    }
                }
            }
        }
    }
}

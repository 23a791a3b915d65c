use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier of a clinical note, unique within one patient's record.
pub type NoteId = u32;

/// One clinical note as loaded from the corpus. Immutable for the
/// lifetime of a patient view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub note_id: NoteId,
    pub timestamp: NaiveDateTime,
    pub note_text: String,
    #[serde(rename = "type")]
    pub note_type: String,
    pub clinical_service: String,
}

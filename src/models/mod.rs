pub mod enums;
pub mod note;
pub mod patient;
pub mod summary;

pub use enums::*;
pub use note::{Note, NoteId};
pub use patient::{PatientEntry, PatientId, PatientRecord, SummarySnapshot};
pub use summary::*;

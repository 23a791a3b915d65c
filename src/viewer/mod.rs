//! Citation-to-note highlighting core.
//!
//! The pieces, in the order an activation flows through them:
//! normalization absorbs encoding noise from the source note, the matcher
//! locates the cited quote, and the session applies the visual result
//! (expansion, highlight, scroll, or the not-found notice) through the
//! rendering port and arms the auto-clear dwell.

pub mod collapse;
pub mod highlight;
pub mod matcher;
pub mod navigation;
pub mod normalize;
pub mod port;
pub mod session;

pub use matcher::{find_quote_occurrences, match_quote, QuoteMatch};
pub use normalize::normalize_note_text;
pub use port::{NoteView, ScrollAlignment, ScrollTarget};
pub use session::{ActivationOutcome, CitationCallback, ViewerSession};

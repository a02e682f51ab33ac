//! Input validation for hugnin.
//!
//! All validators return NoteError::Validation on failure.

use crate::error::{NoteError, NoteResult};

/// Separator between tag labels in user input
pub const TAG_SEPARATOR: char = ',';

/// Validate the text of a note being created.
///
/// Only the empty string is rejected.
pub fn validate_note_value(value: &str) -> NoteResult<()> {
    if value.is_empty() {
        return Err(NoteError::validation("note", "note value must not be empty"));
    }
    Ok(())
}

/// Split a raw comma-separated tag string into trimmed labels.
///
/// Empty parts are kept, so `""` yields a single empty label and the note is
/// still stored once.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATOR)
        .map(|tag| tag.trim().to_string())
        .collect()
}

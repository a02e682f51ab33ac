//! Keyword search for hugnin.
//!
//! Search runs in memory over the full table: a row matches when the keyword
//! is a case-sensitive substring of its text or its tag.

use crate::models::Note;

/// Join positional words with single spaces, as the CLI receives note text and keywords.
pub fn join_words<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(|w| w.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether a note matches a keyword.
///
/// An empty keyword matches everything.
pub fn note_matches(note: &Note, keyword: &str) -> bool {
    note.value.contains(keyword) || note.tag.contains(keyword)
}

/// Keep the notes that match `keyword`, preserving their order.
pub fn filter_notes(notes: Vec<Note>, keyword: &str) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|note| note_matches(note, keyword))
        .collect()
}

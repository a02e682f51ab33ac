//! Storage abstraction for notes.
//!
//! [`NoteStore`] is the seam between the service layer and persistence. The
//! SQLite implementation lives in [`crate::database::Database`]; tests swap in
//! their own implementations.

use crate::error::NoteResult;
use crate::models::Note;

/// CRUD access to stored notes.
pub trait NoteStore {
    /// Insert one row per tag, all sharing `value`, atomically.
    ///
    /// An empty `tags` slice inserts nothing. Returns the number of rows
    /// inserted.
    fn write(&mut self, value: &str, tags: &[String]) -> NoteResult<usize>;

    /// Return the rows matching `filter`, in storage order.
    ///
    /// A non-empty `filter.value` must match the note text (SQL `LIKE`, no
    /// wildcards added). A non-empty `filter.tag` is a comma-separated list and
    /// the row's tag must equal one of its trimmed parts. The id is ignored.
    fn read(&self, filter: &Note) -> NoteResult<Vec<Note>>;

    /// Return the rows whose text or tag contains `keyword`.
    fn search(&self, keyword: &str) -> NoteResult<Vec<Note>>;

    /// Delete rows selected by `filter`.
    ///
    /// Precedence: the all-notes sentinel id, then a positive id, then a
    /// non-empty tag pattern. Anything else deletes nothing. Returns the
    /// number of rows removed.
    fn delete(&mut self, filter: &Note) -> NoteResult<usize>;
}

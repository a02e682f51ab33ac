//! Note service: input handling and presentation on top of a [`NoteStore`].

use std::io::Write;

use crate::config::OutputFormat;
use crate::error::NoteResult;
use crate::models::Note;
use crate::store::NoteStore;
use crate::table::render_table;
use crate::validation::{parse_tags, validate_note_value};

/// Validates user input, delegates to the store and renders results.
pub struct NoteService<S: NoteStore> {
    store: S,
    format: OutputFormat,
}

impl<S: NoteStore> NoteService<S> {
    /// Create a service rendering listings as tables
    pub fn new(store: S) -> Self {
        Self {
            store,
            format: OutputFormat::default(),
        }
    }

    /// Set the output format used by `view` and `search`
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Add a note, one row per comma-separated tag.
    ///
    /// Returns the number of rows inserted.
    pub fn add(&mut self, note: &Note) -> NoteResult<usize> {
        validate_note_value(&note.value)?;
        let tags = parse_tags(&note.tag);
        let inserted = self.store.write(&note.value, &tags)?;
        tracing::info!("Added note with {} tag row(s)", inserted);
        Ok(inserted)
    }

    /// Render the notes matching `filter` to `out`.
    pub fn view<W: Write>(&self, filter: &Note, out: &mut W) -> NoteResult<Vec<Note>> {
        if filter.is_unfiltered() {
            tracing::debug!("Viewing all notes");
        }
        let notes = self.store.read(filter)?;
        self.render(&notes, out)?;
        Ok(notes)
    }

    /// Render the notes whose text or tag contains `keyword` to `out`.
    pub fn search<W: Write>(&self, keyword: &str, out: &mut W) -> NoteResult<Vec<Note>> {
        let notes = self.store.search(keyword)?;
        tracing::debug!("Search for {:?} matched {} note(s)", keyword, notes.len());
        self.render(&notes, out)?;
        Ok(notes)
    }

    /// Delete the notes selected by `filter`. Returns the number removed.
    pub fn delete(&mut self, filter: &Note) -> NoteResult<usize> {
        self.store.delete(filter)
    }

    fn render<W: Write>(&self, notes: &[Note], out: &mut W) -> NoteResult<()> {
        match self.format {
            OutputFormat::Table => render_table(notes, out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, notes)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }
}

//! Data model for hugnin.
//!
//! There is a single entity, [`Note`]. The same type doubles as a query
//! template (a "filter"): empty fields mean "no constraint".

use serde::{Deserialize, Serialize};

/// Sentinel id meaning "every note". Only meaningful for deletes.
pub const ALL_NOTES_ID: i64 = -1;

/// A single row of the `notes` table.
///
/// A note created with several tags is stored as one row per tag, all
/// sharing the same `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Row id (0 when not yet persisted, or "any id" in a filter)
    pub id: i64,
    /// The note text
    #[serde(rename = "note")]
    pub value: String,
    /// Tag label (comma-separated labels when used as input or a filter)
    pub tag: String,
}

impl Note {
    /// Create an unsaved note with the given text and raw tag string
    pub fn new(value: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: 0,
            value: value.into(),
            tag: tag.into(),
        }
    }

    /// Filter matching every note, for delete-all
    pub fn all() -> Self {
        Self {
            id: ALL_NOTES_ID,
            ..Self::default()
        }
    }

    /// Filter on note text
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Filter on tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Filter on id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// True if this is the delete-all sentinel
    pub fn targets_all(&self) -> bool {
        self.id == ALL_NOTES_ID
    }

    /// True if no field constrains a query
    pub fn is_unfiltered(&self) -> bool {
        self.id == 0 && self.value.is_empty() && self.tag.is_empty()
    }
}

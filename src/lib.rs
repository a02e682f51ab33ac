//! hugnin - a personal note-taking tool backed by SQLite.
//!
//! This library provides:
//! - Data model (Note, used both as a record and as a query filter)
//! - Storage (the NoteStore trait and its SQLite implementation)
//! - Note service (validation, tag splitting, table/JSON rendering)
//! - Configuration and command-line handling
//!
//! A note added with several comma-separated tags is stored as one row per tag.

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod search;
pub mod service;
pub mod store;
pub mod table;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use database::Database;
pub use error::{NoteError, NoteResult};
pub use models::{Note, ALL_NOTES_ID};
pub use service::NoteService;
pub use store::NoteStore;

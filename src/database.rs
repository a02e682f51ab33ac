//! Database operations for hugnin.
//!
//! This module provides all data access using SQLite. The schema is a single
//! `notes` table; there are no migrations.
//!
//! Every user-supplied value is bound as a statement parameter.

use std::fs::OpenOptions;
use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, Row, ToSql};

use crate::error::{NoteError, NoteResult};
use crate::models::Note;
use crate::search;
use crate::store::NoteStore;
use crate::validation::parse_tags;

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE_FILE: &str = "sqlite-database.db";

/// Map a `notes` row to a Note. NULL columns read as empty strings.
fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        value: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        tag: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    })
}

/// Database wrapper for SQLite operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create the database file if needed and make sure the schema exists.
    ///
    /// An existing file is opened as-is, never truncated.
    pub fn init<P: AsRef<Path>>(db_path: P) -> NoteResult<Self> {
        let path = db_path.as_ref();

        if !path.exists() {
            OpenOptions::new().write(true).create(true).open(path)?;
            tracing::info!("{} created", path.display());
        }

        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_database()?;
        Ok(db)
    }

    /// Open an existing database.
    ///
    /// Fails with NoteError::NotInitialized if the file does not exist.
    pub fn open<P: AsRef<Path>>(db_path: P) -> NoteResult<Self> {
        let path = db_path.as_ref();
        if !path.exists() {
            return Err(NoteError::NotInitialized(path.to_path_buf()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!("Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> NoteResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_database()?;
        Ok(db)
    }

    /// Initialize database schema
    pub fn init_database(&self) -> NoteResult<()> {
        tracing::info!("Creating notes table...");
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                note TEXT,
                tags TEXT
            );
            "#,
        )?;
        tracing::info!("notes table ready");
        Ok(())
    }

    /// Get the underlying connection (for advanced operations)
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Get every row in storage order
    pub fn get_all_notes(&self) -> NoteResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, note, tags FROM notes ORDER BY id")?;
        let notes = stmt
            .query_map([], row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    /// Close the database connection
    pub fn close(self) -> NoteResult<()> {
        self.conn.close().map_err(|(_, e)| NoteError::Database(e))
    }
}

impl NoteStore for Database {
    fn write(&mut self, value: &str, tags: &[String]) -> NoteResult<usize> {
        if tags.is_empty() {
            tracing::debug!("No tags supplied, nothing to insert");
            return Ok(0);
        }

        tracing::debug!("Inserting {} note row(s)", tags.len());

        // Dropping an uncommitted transaction rolls it back
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO notes (note, tags) VALUES (?1, ?2)")?;
            for tag in tags {
                stmt.execute(params![value, tag])?;
            }
        }
        tx.commit()?;

        Ok(tags.len())
    }

    fn read(&self, filter: &Note) -> NoteResult<Vec<Note>> {
        let mut query = String::from("SELECT id, note, tags FROM notes");
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if !filter.value.is_empty() {
            conditions.push("note LIKE ?".to_string());
            params.push(Box::new(filter.value.clone()));
        }

        if !filter.tag.is_empty() {
            let tags = parse_tags(&filter.tag);
            let placeholders = vec!["?"; tags.len()].join(",");
            conditions.push(format!("tags IN ({})", placeholders));
            for tag in tags {
                params.push(Box::new(tag));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY id");

        tracing::debug!("Reading notes: {}", query);

        let mut stmt = self.conn.prepare(&query)?;
        let params_refs: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let notes = stmt
            .query_map(params_refs.as_slice(), row_to_note)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    fn search(&self, keyword: &str) -> NoteResult<Vec<Note>> {
        let notes = self.get_all_notes()?;
        Ok(search::filter_notes(notes, keyword))
    }

    fn delete(&mut self, filter: &Note) -> NoteResult<usize> {
        let removed = if filter.targets_all() {
            tracing::info!("Removing all notes");
            self.conn.execute("DELETE FROM notes", [])?
        } else if filter.id > 0 {
            tracing::info!("Removing note {}", filter.id);
            self.conn
                .execute("DELETE FROM notes WHERE id = ?1", params![filter.id])?
        } else if !filter.tag.is_empty() {
            tracing::info!("Removing notes with tag {:?}", filter.tag);
            self.conn
                .execute("DELETE FROM notes WHERE tags LIKE ?1", params![filter.tag])?
        } else {
            tracing::warn!("Delete called without id or tag, nothing removed");
            0
        };

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Rows (1,"note1","tag1"), (2,"note2","tag2"), (3,"note2","tag3")
    fn seeded() -> Database {
        let mut db = Database::new_in_memory().unwrap();
        db.write("note1", &["tag1".to_string()]).unwrap();
        db.write("note2", &["tag2".to_string(), "tag3".to_string()])
            .unwrap();
        db
    }

    fn note(id: i64, value: &str, tag: &str) -> Note {
        Note {
            id,
            value: value.to_string(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn test_create_database() {
        let db = Database::new_in_memory().unwrap();
        assert!(db.get_all_notes().unwrap().is_empty());
    }

    #[test]
    fn test_write_one_row_per_tag() {
        let mut db = Database::new_in_memory().unwrap();
        let inserted = db
            .write("shopping", &["a".to_string(), "b".to_string()])
            .unwrap();
        assert_eq!(inserted, 2);

        let notes = db.get_all_notes().unwrap();
        assert_eq!(
            notes,
            vec![note(1, "shopping", "a"), note(2, "shopping", "b")]
        );
    }

    #[test]
    fn test_write_without_tags_is_noop() {
        let mut db = Database::new_in_memory().unwrap();
        assert_eq!(db.write("lonely", &[]).unwrap(), 0);
        assert!(db.get_all_notes().unwrap().is_empty());
    }

    #[test]
    fn test_write_rolls_back_on_failure() {
        let mut db = Database::new_in_memory().unwrap();
        db.connection()
            .execute_batch(
                r#"
                CREATE TRIGGER reject_bad BEFORE INSERT ON notes
                WHEN NEW.tags = 'bad'
                BEGIN SELECT RAISE(ABORT, 'rejected'); END;
                "#,
            )
            .unwrap();

        let result = db.write("x", &["ok".to_string(), "bad".to_string()]);
        assert!(matches!(result, Err(NoteError::Database(_))));
        assert!(db.get_all_notes().unwrap().is_empty());
    }

    #[test]
    fn test_read_without_filter() {
        let db = seeded();
        let notes = db.read(&Note::default()).unwrap();
        assert_eq!(
            notes,
            vec![
                note(1, "note1", "tag1"),
                note(2, "note2", "tag2"),
                note(3, "note2", "tag3"),
            ]
        );
    }

    #[test]
    fn test_read_with_value_filter() {
        let db = seeded();
        let notes = db.read(&Note::default().with_value("note1")).unwrap();
        assert_eq!(notes, vec![note(1, "note1", "tag1")]);
    }

    #[test]
    fn test_read_value_filter_is_not_substring() {
        let db = seeded();
        assert!(db.read(&Note::default().with_value("note")).unwrap().is_empty());
        // Callers may embed wildcards themselves
        assert_eq!(db.read(&Note::default().with_value("note%")).unwrap().len(), 3);
    }

    #[test]
    fn test_read_with_tag_list() {
        let db = seeded();
        let notes = db.read(&Note::default().with_tag("tag1, tag2")).unwrap();
        assert_eq!(
            notes,
            vec![note(1, "note1", "tag1"), note(2, "note2", "tag2")]
        );
    }

    #[test]
    fn test_read_tag_filter_is_membership() {
        let db = seeded();
        assert!(db.read(&Note::default().with_tag("tag")).unwrap().is_empty());
    }

    #[test]
    fn test_read_with_value_and_tag() {
        let db = seeded();
        let notes = db
            .read(&Note::default().with_value("note2").with_tag("tag3"))
            .unwrap();
        assert_eq!(notes, vec![note(3, "note2", "tag3")]);

        let none = db
            .read(&Note::default().with_value("note1").with_tag("tag3"))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_read_treats_quotes_as_data() {
        let db = seeded();
        let notes = db
            .read(&Note::default().with_value("x' OR '1'='1"))
            .unwrap();
        assert!(notes.is_empty());
        let notes = db.read(&Note::default().with_tag("');DROP TABLE notes;--")).unwrap();
        assert!(notes.is_empty());
        assert_eq!(db.get_all_notes().unwrap().len(), 3);
    }

    #[test]
    fn test_search_value_and_tag() {
        let mut db = Database::new_in_memory().unwrap();
        db.write("testnote", &["tag1".to_string()]).unwrap();
        db.write("note2", &["tag2".to_string()]).unwrap();

        let both = db.search("tag").unwrap();
        assert_eq!(
            both,
            vec![note(1, "testnote", "tag1"), note(2, "note2", "tag2")]
        );

        let by_value = db.search("test").unwrap();
        assert_eq!(by_value, vec![note(1, "testnote", "tag1")]);

        assert!(db.search("missing").unwrap().is_empty());
    }

    #[test]
    fn test_delete_all() {
        let mut db = seeded();
        assert_eq!(db.delete(&Note::all()).unwrap(), 3);
        assert!(db.read(&Note::default()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_by_id() {
        let mut db = seeded();
        assert_eq!(db.delete(&Note::default().with_id(1)).unwrap(), 1);
        let ids: Vec<i64> = db.get_all_notes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_delete_by_id_takes_precedence_over_tag() {
        let mut db = seeded();
        let filter = Note::default().with_id(1).with_tag("tag2");
        assert_eq!(db.delete(&filter).unwrap(), 1);
        let ids: Vec<i64> = db.get_all_notes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_delete_by_tag() {
        let mut db = seeded();
        db.write("another", &["tag1".to_string()]).unwrap();

        assert_eq!(db.delete(&Note::default().with_tag("tag1")).unwrap(), 2);
        let remaining = db.get_all_notes().unwrap();
        assert!(remaining.iter().all(|n| n.tag != "tag1"));
        assert_eq!(remaining.len(), 2);
    }

    #[test]
    fn test_delete_by_tag_uses_like_matching() {
        let mut db = seeded();
        db.write("upper", &["TAG1".to_string()]).unwrap();
        db.write("other", &["misc".to_string()]).unwrap();

        // ASCII case-insensitive
        assert_eq!(db.delete(&Note::default().with_tag("tag1")).unwrap(), 2);

        // Wildcards typed by the caller are honoured
        assert_eq!(db.delete(&Note::default().with_tag("tag%")).unwrap(), 2);
        assert_eq!(db.get_all_notes().unwrap(), vec![note(5, "other", "misc")]);
    }

    #[test]
    fn test_delete_without_criteria_is_noop() {
        let mut db = seeded();
        assert_eq!(db.delete(&Note::default()).unwrap(), 0);
        assert_eq!(db.get_all_notes().unwrap().len(), 3);
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let db = Database::new_in_memory().unwrap();
        db.connection()
            .execute("INSERT INTO notes (note, tags) VALUES (NULL, NULL)", [])
            .unwrap();
        assert_eq!(db.get_all_notes().unwrap(), vec![note(1, "", "")]);
    }

    #[test]
    fn test_init_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.db");

        let mut db = Database::init(&path).unwrap();
        assert!(path.exists());
        db.write("persisted", &["t".to_string()]).unwrap();
        db.close().unwrap();

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_all_notes().unwrap(), vec![note(1, "persisted", "t")]);
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.db");

        let mut db = Database::init(&path).unwrap();
        db.write("keep me", &["t".to_string()]).unwrap();
        db.close().unwrap();

        let db = Database::init(&path).unwrap();
        assert_eq!(db.get_all_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_init_in_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope").join("notes.db");
        assert!(matches!(Database::init(&path), Err(NoteError::Io(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.db");

        let result = Database::open(&path);
        assert!(matches!(result, Err(NoteError::NotInitialized(p)) if p == path));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_without_table_reports_database_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.db");
        std::fs::File::create(&path).unwrap();

        let db = Database::open(&path).unwrap();
        assert!(matches!(
            db.read(&Note::default()),
            Err(NoteError::Database(_))
        ));
    }
}

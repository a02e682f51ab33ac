//! Command-line interface for hugnin.
//!
//! Arguments are parsed into a [`Cli`] value, turned into a per-invocation
//! [`Config`] and a filter [`Note`], and dispatched to the [`NoteService`].

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{Config, OutputFormat};
use crate::database::Database;
use crate::error::NoteResult;
use crate::models::Note;
use crate::search::join_words;
use crate::service::NoteService;

#[derive(Parser, Debug)]
#[command(name = "hugnin")]
#[command(author, version, about = "Take, tag, search and delete short notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for view and search: table or json
    #[arg(long, global = true, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file and notes table
    Init,

    /// Add a note
    Add {
        /// Note text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Comma-separated tags; one row is stored per tag
        #[arg(short, long, default_value = "")]
        tag: String,
    },

    /// List notes, optionally filtered
    View {
        /// Only notes whose text matches exactly
        #[arg(short, long, default_value = "")]
        note: String,

        /// Only notes with one of these comma-separated tags
        #[arg(short, long, default_value = "")]
        tags: String,
    },

    /// Find notes whose text or tag contains a keyword
    Search {
        /// Keyword (words are joined with spaces)
        keyword: Vec<String>,
    },

    /// Delete notes by id, by tag, or all of them
    Delete {
        /// Delete the note with this id
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        id: i64,

        /// Delete notes whose tag matches
        #[arg(short, long, default_value = "")]
        tags: String,

        /// Delete every note
        #[arg(short, long)]
        all: bool,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

impl Cli {
    /// Default log level when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Build the invocation config from defaults, the config file and flags
    pub fn config(&self) -> NoteResult<Config> {
        Ok(Config::load(self.config.as_deref())?
            .with_database_file(self.database.clone())
            .with_output_format(self.format))
    }
}

impl Command {
    /// The note or filter this command operates on
    pub fn to_note(&self) -> Note {
        match self {
            Command::Init | Command::Search { .. } => Note::default(),
            Command::Add { text, tag } => Note::new(join_words(text.as_slice()), tag.as_str()),
            Command::View { note, tags } => Note::default()
                .with_value(note.as_str())
                .with_tag(tags.as_str()),
            Command::Delete { id, tags, all } => {
                if *all {
                    Note::all()
                } else {
                    Note::default().with_id(*id).with_tag(tags.as_str())
                }
            }
        }
    }
}

fn open_service(config: &Config) -> NoteResult<NoteService<Database>> {
    let db = Database::open(config.database_file())?;
    Ok(NoteService::new(db).with_format(config.output_format()))
}

/// Execute a parsed command line, writing user-facing output to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> NoteResult<()> {
    let config = cli.config()?;
    let note = cli.command.to_note();

    match &cli.command {
        Command::Init => {
            let db = Database::init(config.database_file())?;
            db.close()?;
            writeln!(
                out,
                "Initialized database at {}",
                config.database_file().display()
            )?;
        }
        Command::Add { .. } => {
            let mut service = open_service(&config)?;
            service.add(&note)?;
        }
        Command::View { .. } => {
            let service = open_service(&config)?;
            service.view(&note, out)?;
        }
        Command::Search { keyword } => {
            let service = open_service(&config)?;
            service.search(&join_words(keyword.as_slice()), out)?;
        }
        Command::Delete { .. } => {
            let mut service = open_service(&config)?;
            let removed = service.delete(&note)?;
            writeln!(out, "Removed {} note(s)", removed)?;
        }
    }

    Ok(())
}

//! Configuration management for hugnin.
//!
//! A [`Config`] is built once per invocation and passed down explicitly.
//! Values come from built-in defaults, optionally overlaid by a JSON config
//! file, then by command-line overrides.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::database::DEFAULT_DATABASE_FILE;
use crate::error::{NoteError, NoteResult};

/// How listings are written to the output sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(NoteError::validation(
                "format",
                format!("unknown output format '{}', expected 'table' or 'json'", other),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn default_database_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_FILE)
}

/// Serialized configuration values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Path to the database file
    #[serde(default = "default_database_file")]
    pub database_file: PathBuf,
    /// Output format for view and search
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            output_format: OutputFormat::default(),
        }
    }
}

/// Per-invocation configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    data: ConfigData,
}

impl Config {
    /// Load configuration.
    ///
    /// Without a path the defaults are used. A path that does not exist is an
    /// error, since the user asked for it explicitly.
    pub fn load(config_file: Option<&Path>) -> NoteResult<Self> {
        let data = match config_file {
            None => ConfigData::default(),
            Some(path) => {
                if !path.exists() {
                    return Err(NoteError::config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                let content = fs::read_to_string(path)?;
                let data: ConfigData = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                data
            }
        };

        let config = Self { data };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> NoteResult<()> {
        if self.data.database_file.as_os_str().is_empty() {
            return Err(NoteError::config("database_file must not be empty"));
        }
        Ok(())
    }

    /// Override the database file
    pub fn with_database_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data.database_file = path;
        }
        self
    }

    /// Override the output format
    pub fn with_output_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.data.output_format = format;
        }
        self
    }

    /// Get the database file path
    pub fn database_file(&self) -> &Path {
        &self.data.database_file
    }

    /// Get the output format
    pub fn output_format(&self) -> OutputFormat {
        self.data.output_format
    }
}

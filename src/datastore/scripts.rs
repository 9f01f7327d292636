//! Schema script library.
//!
//! Schema files (`api.sql`, `client.sql`) are read from one directory opened
//! with capability-scoped access. Each [`ScriptLibrary::load`] re-reads the
//! file, so edits between provisioning calls are picked up.

use crate::datastore::domain::{SchemaScript, SchemaScriptKind};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::HashMap;
use thiserror::Error;

/// Default location of the schema files relative to the working directory.
pub const DEFAULT_SCHEMA_DIR: &str = "db-schema/mysql";

/// Source of schema scripts.
#[derive(Debug)]
pub struct ScriptLibrary {
    source: ScriptSource,
}

#[derive(Debug)]
enum ScriptSource {
    Directory { root: Utf8PathBuf, dir: Dir },
    Inline(HashMap<SchemaScriptKind, String>),
}

impl ScriptLibrary {
    /// Opens the schema directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Open`] when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> Result<Self, ScriptError> {
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| {
            ScriptError::Open {
                path: path.to_owned(),
                source,
            }
        })?;
        Ok(Self {
            source: ScriptSource::Directory {
                root: path.to_owned(),
                dir,
            },
        })
    }

    /// Creates a library holding the given scripts in memory.
    #[must_use]
    pub fn inline<I, S>(scripts: I) -> Self
    where
        I: IntoIterator<Item = (SchemaScriptKind, S)>,
        S: Into<String>,
    {
        Self {
            source: ScriptSource::Inline(
                scripts
                    .into_iter()
                    .map(|(kind, sql)| (kind, sql.into()))
                    .collect(),
            ),
        }
    }

    /// Reads the script of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Missing`] when the script does not exist and
    /// [`ScriptError::Read`] when it cannot be read.
    pub fn load(&self, kind: SchemaScriptKind) -> Result<SchemaScript, ScriptError> {
        match &self.source {
            ScriptSource::Directory { root, dir } => match dir.read_to_string(kind.file_name()) {
                Ok(sql) => Ok(SchemaScript::new(kind, sql)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    Err(ScriptError::Missing(root.join(kind.file_name())))
                }
                Err(source) => Err(ScriptError::Read {
                    path: root.join(kind.file_name()),
                    source,
                }),
            },
            ScriptSource::Inline(scripts) => scripts
                .get(&kind)
                .map(|sql| SchemaScript::new(kind, sql.as_str()))
                .ok_or_else(|| ScriptError::Missing(Utf8PathBuf::from(kind.file_name()))),
        }
    }
}

/// Errors raised while locating or reading schema scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The schema directory could not be opened.
    #[error("cannot open schema directory {path}: {source}")]
    Open {
        /// Directory that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The script file does not exist.
    #[error("schema script not found: {0}")]
    Missing(Utf8PathBuf),

    /// The script file exists but could not be read.
    #[error("cannot read schema script {path}: {source}")]
    Read {
        /// Script that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

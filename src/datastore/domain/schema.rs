//! Schema identifiers and schema creation scripts.

use super::DatastoreDomainError;
use std::fmt;

/// Maximum length of a `MySQL` schema identifier.
const MAX_SCHEMA_NAME_LENGTH: usize = 64;

/// Validated `MySQL` schema (database) name.
///
/// Schema names are interpolated into `CREATE DATABASE` and `USE`
/// statements, which cannot take bound parameters, so only
/// `[A-Za-z0-9_$]` is accepted. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaName(String);

impl SchemaName {
    /// Name of the shared API schema holding consumer credentials.
    pub const API: &'static str = "api";

    /// Creates a validated schema name.
    ///
    /// # Errors
    ///
    /// Returns [`DatastoreDomainError::EmptySchemaName`] when the value is
    /// empty, [`DatastoreDomainError::SchemaNameTooLong`] when it exceeds 64
    /// characters, or [`DatastoreDomainError::InvalidSchemaName`] when it
    /// contains other characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DatastoreDomainError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(DatastoreDomainError::EmptySchemaName);
        }
        if raw.len() > MAX_SCHEMA_NAME_LENGTH {
            return Err(DatastoreDomainError::SchemaNameTooLong(raw));
        }
        let is_valid = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
        if !is_valid {
            return Err(DatastoreDomainError::InvalidSchemaName(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the shared `api` schema name.
    #[must_use]
    pub fn api() -> Self {
        Self(Self::API.to_owned())
    }

    /// Returns the schema name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name wrapped in backticks for use as an SQL identifier.
    #[must_use]
    pub fn quoted(&self) -> String {
        format!("`{}`", self.0)
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which schema file a script was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaScriptKind {
    /// `api.sql`: creates the shared `api` schema, including its own
    /// `CREATE DATABASE`.
    Api,
    /// `client.sql`: tables for one client schema; the schema must be
    /// created and selected first.
    Client,
}

impl SchemaScriptKind {
    /// Returns the file name of the script inside the schema directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Api => "api.sql",
            Self::Client => "client.sql",
        }
    }

    /// Returns `true` when the script creates its own schema.
    #[must_use]
    pub const fn is_self_creating(self) -> bool {
        matches!(self, Self::Api)
    }
}

/// Contents of a schema file, executed as one multi-statement batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaScript {
    kind: SchemaScriptKind,
    sql: String,
}

impl SchemaScript {
    /// Creates a script of the given kind.
    #[must_use]
    pub fn new(kind: SchemaScriptKind, sql: impl Into<String>) -> Self {
        Self {
            kind,
            sql: sql.into(),
        }
    }

    /// Returns the script kind.
    #[must_use]
    pub const fn kind(&self) -> SchemaScriptKind {
        self.kind
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

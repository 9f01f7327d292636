//! Error types for relational domain validation.

use thiserror::Error;

/// Errors returned while constructing relational domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatastoreDomainError {
    /// The schema name is empty.
    #[error("schema name must not be empty")]
    EmptySchemaName,

    /// The schema name contains characters outside `[A-Za-z0-9_$]`.
    #[error(
        "schema name '{0}' contains invalid characters (only ASCII letters, digits, '_' and '$' allowed)"
    )]
    InvalidSchemaName(String),

    /// The schema name exceeds the 64-character `MySQL` identifier limit.
    #[error("schema name exceeds 64 character limit: {0}")]
    SchemaNameTooLong(String),
}


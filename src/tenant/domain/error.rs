//! Error types for tenant client validation.

use crate::coordination::domain::TreePathError;
use crate::datastore::domain::DatastoreDomainError;
use thiserror::Error;

/// Errors returned while validating a client descriptor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TenantDomainError {
    /// The client name cannot be used as a schema name.
    #[error("client name '{name}' is not a valid schema name: {source}")]
    InvalidClientName {
        /// Rejected client name.
        name: String,
        /// Validation failure.
        source: DatastoreDomainError,
    },

    /// A client name or setting key cannot be used as a tree node name.
    #[error("'{segment}' of client '{client}' is not a valid node name: {source}")]
    InvalidNodeName {
        /// Client the node belongs to.
        client: String,
        /// Rejected segment.
        segment: String,
        /// Validation failure.
        source: TreePathError,
    },

    /// The client names a database that is not configured.
    #[error("client '{client}' refers to unknown database '{database}'")]
    UnknownDatabase {
        /// Client that named the database.
        client: String,
        /// Requested database name.
        database: String,
    },

    /// The client names no database and none is configured.
    #[error("client '{0}' needs a database but none is configured")]
    NoDatabases(String),
}

//! Error types for cluster configuration.

use thiserror::Error;

/// Errors returned while building cluster configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClusterDomainError {
    /// Two database servers share the same logical name.
    #[error("database '{0}' is defined more than once")]
    DuplicateDatabase(String),
}

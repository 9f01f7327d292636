//! Database port: connection factory and provisioning session.

use crate::datastore::domain::{
    ConsumerRecord, ConsumerScope, DatabaseSettings, SchemaName, SchemaScript,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for database provisioning operations.
pub type DatastoreResult<T> = Result<T, DatastoreError>;

/// Opens provisioning sessions against database servers.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    /// Session type produced by this connector.
    type Session: ProvisioningSession;

    /// Connects to the server described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`DatastoreError::Unavailable`] when the server cannot be
    /// reached or rejects the credentials.
    async fn connect(&self, settings: &DatabaseSettings) -> DatastoreResult<Self::Session>;
}

/// Statements issued while provisioning one database server.
///
/// Existence checks and writes are separate calls; nothing here is atomic.
#[async_trait]
pub trait ProvisioningSession: Send + Sync {
    /// Returns `true` when a schema with exactly this name exists
    /// (case-sensitive).
    async fn schema_exists(&self, schema: &SchemaName) -> DatastoreResult<bool>;

    /// Runs a schema script.
    ///
    /// Scripts that do not create their own schema are preceded by
    /// `CREATE DATABASE` and `USE` for `schema`. A failing multi-statement
    /// batch may leave a partially created schema behind.
    async fn create_schema(
        &self,
        schema: &SchemaName,
        script: &SchemaScript,
    ) -> DatastoreResult<()>;

    /// Returns `true` when a consumer row exists for `(short_name, scope)`.
    async fn consumer_exists(
        &self,
        short_name: &str,
        scope: ConsumerScope,
    ) -> DatastoreResult<bool>;

    /// Inserts one consumer row.
    async fn insert_consumer(&self, record: &ConsumerRecord) -> DatastoreResult<()>;
}

/// Errors returned by database adapters.
#[derive(Debug, Clone, Error)]
pub enum DatastoreError {
    /// The server could not be reached or refused the connection.
    #[error("database unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DatastoreError {
    /// Wraps a connection error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

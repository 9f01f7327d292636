//! Conditional schema creation.

use crate::datastore::{
    domain::{DatabaseSettings, SchemaName, SchemaScriptKind},
    ports::{DatabaseConnector, DatastoreError, ProvisioningSession},
    scripts::{ScriptError, ScriptLibrary},
};
use std::sync::Arc;
use thiserror::Error;

/// Result of [`SchemaProvisioner::ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaOutcome {
    /// The schema was absent and the script ran.
    Created,
    /// The schema already existed; nothing ran.
    AlreadyPresent,
}

/// Errors raised while provisioning a schema.
#[derive(Debug, Error)]
pub enum SchemaProvisionError {
    /// Database connection or statement failed.
    #[error(transparent)]
    Datastore(#[from] DatastoreError),
    /// Schema script could not be loaded.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Creates schemas from schema scripts when they do not exist yet.
#[derive(Debug)]
pub struct SchemaProvisioner<D>
where
    D: DatabaseConnector,
{
    connector: Arc<D>,
    scripts: Arc<ScriptLibrary>,
}

impl<D> SchemaProvisioner<D>
where
    D: DatabaseConnector,
{
    /// Creates a provisioner.
    #[must_use]
    pub const fn new(connector: Arc<D>, scripts: Arc<ScriptLibrary>) -> Self {
        Self { connector, scripts }
    }

    /// Creates `schema` on the server described by `settings` by running
    /// the `kind` script, unless the schema already exists.
    ///
    /// The script is only read when it has to run. A failure part-way
    /// through the script leaves whatever it already created.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaProvisionError::Datastore`] when the server cannot be
    /// reached or a statement fails, and [`SchemaProvisionError::Script`]
    /// when the script cannot be loaded.
    pub async fn ensure_schema(
        &self,
        settings: &DatabaseSettings,
        schema: &SchemaName,
        kind: SchemaScriptKind,
    ) -> Result<SchemaOutcome, SchemaProvisionError> {
        let session = self.connector.connect(settings).await?;
        if session.schema_exists(schema).await? {
            tracing::info!(%schema, server = %settings.address(), "schema already present");
            return Ok(SchemaOutcome::AlreadyPresent);
        }

        let script = self.scripts.load(kind)?;
        session.create_schema(schema, &script).await?;
        tracing::info!(
            %schema,
            server = %settings.address(),
            script = kind.file_name(),
            "schema created"
        );
        Ok(SchemaOutcome::Created)
    }
}

//! Provisions each client, then publishes its binding and settings.

use crate::cluster::domain::DatabaseSettingsMap;
use crate::coordination::{
    domain::TreePath,
    ports::ConfigTree,
    services::{NodePublishError, NodePublisher},
};
use crate::datastore::{
    domain::{ConsumerOverrides, SchemaScriptKind},
    ports::{DatabaseConnector, DatastoreError},
    services::{
        CredentialIssuer, IssuedCredentials, SchemaOutcome, SchemaProvisionError,
        SchemaProvisioner,
    },
};
use crate::tenant::domain::{ClientBinding, ClientDescriptor, TenantDomainError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for client publishing.
#[derive(Debug, Error)]
pub enum ClientPublishError {
    /// Client descriptor validation failed.
    #[error(transparent)]
    Domain(#[from] TenantDomainError),
    /// Client schema provisioning failed.
    #[error(transparent)]
    Schema(#[from] SchemaProvisionError),
    /// Consumer credential registration failed.
    #[error(transparent)]
    Credentials(#[from] DatastoreError),
    /// Writing a tree node failed.
    #[error(transparent)]
    Publish(#[from] NodePublishError),
}

/// Result type for client publishing.
pub type ClientPublishResult<T> = Result<T, ClientPublishError>;

/// What was done for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientReport {
    /// Client name.
    pub client: String,
    /// Database the client was provisioned on.
    pub database: String,
    /// Outcome of the client schema check.
    pub schema: SchemaOutcome,
    /// Outcome of credential registration.
    pub credentials: IssuedCredentials,
    /// Client node holding the binding document.
    pub node: TreePath,
    /// Setting leaves written under the client node.
    pub leaves: Vec<TreePath>,
}

/// Provisions clients and publishes their configuration nodes.
#[derive(Debug)]
pub struct ClientPublisher<T, D, C>
where
    T: ConfigTree,
    D: DatabaseConnector,
    C: Clock + Send + Sync,
{
    publisher: NodePublisher<T>,
    provisioner: Arc<SchemaProvisioner<D>>,
    issuer: Arc<CredentialIssuer<D, C>>,
}

impl<T, D, C> ClientPublisher<T, D, C>
where
    T: ConfigTree,
    D: DatabaseConnector,
    C: Clock + Send + Sync,
{
    /// Creates a client publisher.
    #[must_use]
    pub const fn new(
        tree: Arc<T>,
        provisioner: Arc<SchemaProvisioner<D>>,
        issuer: Arc<CredentialIssuer<D, C>>,
    ) -> Self {
        Self {
            publisher: NodePublisher::new(tree),
            provisioner,
            issuer,
        }
    }

    /// Provisions and publishes every client in order under `node`.
    ///
    /// The first failure aborts the run; clients already handled keep their
    /// schemas, credentials, and nodes.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientPublishError`] raised by
    /// [`Self::publish_client`].
    pub async fn publish_all(
        &self,
        clients: &[ClientDescriptor],
        databases: &DatabaseSettingsMap,
        node: &TreePath,
        overrides: &ConsumerOverrides,
    ) -> ClientPublishResult<Vec<ClientReport>> {
        let mut reports = Vec::with_capacity(clients.len());
        for client in clients {
            reports.push(self.publish_client(client, databases, node, overrides).await?);
        }
        Ok(reports)
    }

    /// Provisions one client and publishes its nodes.
    ///
    /// Steps run in order: resolve the database, ensure the client schema
    /// from `client.sql`, register `js` and `all` credentials, write
    /// `{"DB_JNDI_NAME": <database>}` to `<node>/<client>`, then write one
    /// leaf per setting.
    ///
    /// # Errors
    ///
    /// Returns [`ClientPublishError::Domain`] when the client name, a setting
    /// key, or the database reference is invalid, and the matching variant
    /// when provisioning or publishing fails.
    pub async fn publish_client(
        &self,
        client: &ClientDescriptor,
        databases: &DatabaseSettingsMap,
        node: &TreePath,
        overrides: &ConsumerOverrides,
    ) -> ClientPublishResult<ClientReport> {
        let schema = client.schema_name()?;
        let client_node = client.node(node)?;
        let leaves = client.setting_leaves(&client_node)?;
        let (database, settings) = client.resolve_database(databases)?;
        tracing::info!(client = %client.name, database, "adding client");

        let schema_outcome = self
            .provisioner
            .ensure_schema(settings, &schema, SchemaScriptKind::Client)
            .await?;
        let credentials = self.issuer.issue(&client.name, settings, overrides).await?;

        let binding = ClientBinding {
            db_jndi_name: database.to_owned(),
        };
        self.publisher.publish_json(&client_node, &binding).await?;
        for (leaf, text) in &leaves {
            self.publisher.publish_text(leaf, text).await?;
        }
        tracing::info!(
            client = %client.name,
            node = %client_node,
            settings = leaves.len(),
            "client published"
        );

        Ok(ClientReport {
            client: client.name.clone(),
            database: database.to_owned(),
            schema: schema_outcome,
            credentials,
            node: client_node,
            leaves: leaves.into_iter().map(|(leaf, _)| leaf).collect(),
        })
    }
}

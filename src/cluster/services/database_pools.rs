//! Database pool publishing.

use super::ClusterPublishResult;
use crate::cluster::domain::{DatabasePool, DatabasePoolSet, DatabaseSettingsMap};
use crate::coordination::{domain::TreePath, ports::ConfigTree, services::NodePublisher};
use crate::datastore::{
    domain::{SchemaName, SchemaScriptKind},
    ports::DatabaseConnector,
    services::SchemaProvisioner,
};
use std::sync::Arc;

/// Publishes the database pool set after provisioning the shared `api`
/// schema on every server.
#[derive(Debug)]
pub struct DatabasePoolPublisher<T, D>
where
    T: ConfigTree,
    D: DatabaseConnector,
{
    publisher: NodePublisher<T>,
    provisioner: Arc<SchemaProvisioner<D>>,
}

impl<T, D> DatabasePoolPublisher<T, D>
where
    T: ConfigTree,
    D: DatabaseConnector,
{
    /// Creates a publisher.
    #[must_use]
    pub const fn new(tree: Arc<T>, provisioner: Arc<SchemaProvisioner<D>>) -> Self {
        Self {
            publisher: NodePublisher::new(tree),
            provisioner,
        }
    }

    /// Ensures the `api` schema exists on each database, then writes the
    /// pool set for all of them to `node` as one document.
    ///
    /// Databases are processed in manifest order and the first failure
    /// aborts the run before anything is published.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClusterPublishError::Schema`] when provisioning fails
    /// or [`super::ClusterPublishError::Publish`] when the write fails.
    pub async fn publish(
        &self,
        databases: &DatabaseSettingsMap,
        node: &TreePath,
    ) -> ClusterPublishResult<DatabasePoolSet> {
        let api = SchemaName::api();
        let mut dbs = Vec::with_capacity(databases.len());
        for (name, settings) in databases.iter() {
            self.provisioner
                .ensure_schema(settings, &api, SchemaScriptKind::Api)
                .await?;
            dbs.push(DatabasePool::for_database(name, settings));
        }

        let pools = DatabasePoolSet { dbs };
        self.publisher.publish_json(node, &pools).await?;
        tracing::info!(%node, databases = pools.dbs.len(), "database pools published");
        Ok(pools)
    }
}

//! Provisioning workflow: runs manifest-driven steps against injected
//! tree and database adapters.

use crate::cluster::{
    domain::{CachePool, DatabasePoolSet, extract_database_settings},
    services::{CachePoolPublisher, ClusterInspector, ClusterPublishError, DatabasePoolPublisher},
};
use crate::coordination::ports::ConfigTree;
use crate::datastore::{
    ports::DatabaseConnector,
    scripts::ScriptLibrary,
    services::{CredentialIssuer, SchemaProvisioner},
};
use crate::manifest::{ConfigError, Manifest};
use crate::tenant::services::{ClientPublishError, ClientPublisher, ClientReport};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// A provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Provision the `api` schema on every database and publish the pools.
    DatabasePools,
    /// Publish the memcached pool.
    CachePool,
    /// Provision and publish every client.
    Clients,
    /// Database pools, cache pool, then clients.
    All,
    /// Read back the published pool documents.
    Inspect,
}

impl Step {
    /// Returns `true` when the step runs schema scripts.
    #[must_use]
    pub const fn needs_schema_scripts(self) -> bool {
        matches!(self, Self::DatabasePools | Self::Clients | Self::All)
    }
}

/// Errors that abort a workflow run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The manifest lacks a required section.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Pool publishing or inspection failed.
    #[error(transparent)]
    Cluster(#[from] ClusterPublishError),
    /// Client provisioning or publishing failed.
    #[error(transparent)]
    Clients(#[from] ClientPublishError),
    /// A step that runs schema scripts was started without a script
    /// library.
    #[error("step {0:?} needs schema scripts but none were provided")]
    MissingScripts(Step),
}

/// Documents and outcomes produced by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowReport {
    /// Database pool set published or found.
    pub database_pools: Option<DatabasePoolSet>,
    /// Cache pool published or found.
    pub cache_pool: Option<CachePool>,
    /// Per-client outcomes.
    pub clients: Vec<ClientReport>,
}

/// Runs provisioning steps against one tree and one set of database
/// servers.
#[derive(Debug)]
pub struct Workflow<T, D, C>
where
    T: ConfigTree,
    D: DatabaseConnector,
    C: Clock + Send + Sync,
{
    tree: Arc<T>,
    connector: Arc<D>,
    clock: Arc<C>,
    scripts: Option<Arc<ScriptLibrary>>,
}

impl<T, D, C> Workflow<T, D, C>
where
    T: ConfigTree,
    D: DatabaseConnector,
    C: Clock + Send + Sync,
{
    /// Creates a workflow without schema scripts.
    #[must_use]
    pub const fn new(tree: Arc<T>, connector: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            tree,
            connector,
            clock,
            scripts: None,
        }
    }

    /// Sets the schema script library used by provisioning steps.
    #[must_use]
    pub fn with_scripts(mut self, scripts: Arc<ScriptLibrary>) -> Self {
        self.scripts = Some(scripts);
        self
    }

    /// Runs `step` using the sections and nodes of `manifest`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when a required manifest section or the
    /// script library is missing, or when any provisioning or publishing
    /// call fails. Side effects applied before the failure are kept.
    pub async fn run(
        &self,
        step: Step,
        manifest: &Manifest,
    ) -> Result<WorkflowReport, WorkflowError> {
        tracing::info!(?step, "running provisioning step");
        let mut report = WorkflowReport::default();
        match step {
            Step::DatabasePools => {
                report.database_pools = Some(self.publish_database_pools(manifest).await?);
            }
            Step::CachePool => {
                report.cache_pool = Some(self.publish_cache_pool(manifest).await?);
            }
            Step::Clients => {
                report.clients = self.publish_clients(manifest).await?;
            }
            Step::All => {
                report.database_pools = Some(self.publish_database_pools(manifest).await?);
                report.cache_pool = Some(self.publish_cache_pool(manifest).await?);
                report.clients = self.publish_clients(manifest).await?;
            }
            Step::Inspect => {
                let inspector = ClusterInspector::new(Arc::clone(&self.tree));
                report.database_pools =
                    inspector.read_database_pools(&manifest.nodes.dbcp).await?;
                report.cache_pool = inspector.read_cache_pool(&manifest.nodes.memcache).await?;
            }
        }
        Ok(report)
    }

    async fn publish_database_pools(
        &self,
        manifest: &Manifest,
    ) -> Result<DatabasePoolSet, WorkflowError> {
        let databases = extract_database_settings(manifest.database_servers()?)
            .map_err(ClusterPublishError::from)?;
        let publisher = DatabasePoolPublisher::new(
            Arc::clone(&self.tree),
            self.provisioner(Step::DatabasePools)?,
        );
        Ok(publisher.publish(&databases, &manifest.nodes.dbcp).await?)
    }

    async fn publish_cache_pool(&self, manifest: &Manifest) -> Result<CachePool, WorkflowError> {
        let publisher = CachePoolPublisher::new(Arc::clone(&self.tree));
        Ok(publisher
            .publish(manifest.cache_servers()?, &manifest.nodes.memcache)
            .await?)
    }

    async fn publish_clients(
        &self,
        manifest: &Manifest,
    ) -> Result<Vec<ClientReport>, WorkflowError> {
        let clients = manifest.client_descriptors()?;
        let databases = extract_database_settings(manifest.database_servers()?)
            .map_err(ClusterPublishError::from)?;
        let issuer = Arc::new(CredentialIssuer::new(
            Arc::clone(&self.connector),
            Arc::clone(&self.clock),
        ));
        let publisher = ClientPublisher::new(
            Arc::clone(&self.tree),
            self.provisioner(Step::Clients)?,
            issuer,
        );
        Ok(publisher
            .publish_all(
                clients,
                &databases,
                &manifest.nodes.clients,
                &manifest.consumer_overrides(),
            )
            .await?)
    }

    fn provisioner(&self, step: Step) -> Result<Arc<SchemaProvisioner<D>>, WorkflowError> {
        let scripts = self
            .scripts
            .as_ref()
            .ok_or(WorkflowError::MissingScripts(step))?;
        Ok(Arc::new(SchemaProvisioner::new(
            Arc::clone(&self.connector),
            Arc::clone(scripts),
        )))
    }
}

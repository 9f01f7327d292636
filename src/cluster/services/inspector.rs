//! Reads back published pool documents the way serving nodes consume them.

use super::ClusterPublishResult;
use crate::cluster::domain::{CachePool, DatabasePoolSet};
use crate::coordination::{domain::TreePath, ports::ConfigTree, services::NodePublisher};
use std::sync::Arc;

/// Decodes pool documents stored in the coordination tree.
#[derive(Debug)]
pub struct ClusterInspector<T>
where
    T: ConfigTree,
{
    reader: NodePublisher<T>,
}

impl<T> ClusterInspector<T>
where
    T: ConfigTree,
{
    /// Creates an inspector.
    #[must_use]
    pub const fn new(tree: Arc<T>) -> Self {
        Self {
            reader: NodePublisher::new(tree),
        }
    }

    /// Reads the database pool set at `node`.
    ///
    /// A missing node or empty data yields `None`. Logs a warning when no
    /// database pool is configured.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClusterPublishError::Publish`] when the read fails or
    /// the stored document is not a pool set.
    pub async fn read_database_pools(
        &self,
        node: &TreePath,
    ) -> ClusterPublishResult<Option<DatabasePoolSet>> {
        let pools = self.reader.read_json::<DatabasePoolSet>(node).await?;
        match &pools {
            Some(set) if !set.dbs.is_empty() => {
                tracing::info!(%node, databases = set.dbs.len(), "database pools found");
            }
            _ => tracing::warn!(%node, "no database pools configured"),
        }
        Ok(pools)
    }

    /// Reads the cache pool document at `node`.
    ///
    /// A missing node or empty data yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClusterPublishError::Publish`] when the read fails or
    /// the stored document is not a cache pool.
    pub async fn read_cache_pool(&self, node: &TreePath) -> ClusterPublishResult<Option<CachePool>> {
        let pool = self.reader.read_json::<CachePool>(node).await?;
        match &pool {
            Some(found) => tracing::info!(%node, servers = %found.servers, "cache pool found"),
            None => tracing::warn!(%node, "no cache pool configured"),
        }
        Ok(pool)
    }
}

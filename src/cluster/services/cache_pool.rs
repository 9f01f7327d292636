//! Memcached pool publishing.

use super::ClusterPublishResult;
use crate::cluster::domain::{CachePool, CacheServerDescriptor};
use crate::coordination::{domain::TreePath, ports::ConfigTree, services::NodePublisher};
use std::sync::Arc;

/// Publishes the memcached server list.
#[derive(Debug)]
pub struct CachePoolPublisher<T>
where
    T: ConfigTree,
{
    publisher: NodePublisher<T>,
}

impl<T> CachePoolPublisher<T>
where
    T: ConfigTree,
{
    /// Creates a publisher.
    #[must_use]
    pub const fn new(tree: Arc<T>) -> Self {
        Self {
            publisher: NodePublisher::new(tree),
        }
    }

    /// Writes the cache pool document for `servers` to `node`.
    ///
    /// # Errors
    ///
    /// Returns [`super::ClusterPublishError::Publish`] when the write fails.
    pub async fn publish(
        &self,
        servers: &[CacheServerDescriptor],
        node: &TreePath,
    ) -> ClusterPublishResult<CachePool> {
        let pool = CachePool::from_servers(servers);
        self.publisher.publish_json(node, &pool).await?;
        tracing::info!(%node, servers = %pool.servers, "cache pool published");
        Ok(pool)
    }
}

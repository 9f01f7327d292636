//! `ZooKeeper`-backed coordination tree.

use crate::coordination::{
    domain::TreePath,
    ports::{ConfigTree, ConfigTreeError, ConfigTreeResult},
};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use zookeeper_client as zk;

/// Coordination tree backed by a `ZooKeeper` ensemble.
///
/// Nodes are created persistent with open ACLs.
pub struct ZooKeeperConfigTree {
    client: zk::Client,
    connect_string: String,
}

impl ZooKeeperConfigTree {
    /// Connects to the ensemble named by `connect_string`
    /// (`host1:port1,host2:port2[/chroot]`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigTreeError::Unavailable`] when the session cannot be
    /// established within `timeout`.
    pub async fn connect(connect_string: &str, timeout: Duration) -> ConfigTreeResult<Self> {
        let client = tokio::time::timeout(timeout, zk::Client::connect(connect_string))
            .await
            .map_err(ConfigTreeError::unavailable)?
            .map_err(ConfigTreeError::unavailable)?;
        tracing::info!(ensemble = connect_string, "connected to coordination service");
        Ok(Self {
            client,
            connect_string: connect_string.to_owned(),
        })
    }
}

impl fmt::Debug for ZooKeeperConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZooKeeperConfigTree")
            .field("connect_string", &self.connect_string)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ConfigTree for ZooKeeperConfigTree {
    async fn ensure_path(&self, path: &TreePath) -> ConfigTreeResult<()> {
        let options = zk::CreateMode::Persistent.with_acls(zk::Acls::anyone_all());
        for node in path.lineage() {
            match self.client.create(node.as_str(), &[], &options).await {
                Ok(_) | Err(zk::Error::NodeExists) => {}
                Err(err) => return Err(ConfigTreeError::backend(err)),
            }
        }
        Ok(())
    }

    async fn set_data(&self, path: &TreePath, data: &[u8]) -> ConfigTreeResult<()> {
        match self.client.set_data(path.as_str(), data, None).await {
            Ok(_) => Ok(()),
            Err(zk::Error::NoNode) => Err(ConfigTreeError::NoNode(path.clone())),
            Err(err) => Err(ConfigTreeError::backend(err)),
        }
    }

    async fn get_data(&self, path: &TreePath) -> ConfigTreeResult<Option<Vec<u8>>> {
        match self.client.get_data(path.as_str()).await {
            Ok((data, _stat)) => Ok(Some(data)),
            Err(zk::Error::NoNode) => Ok(None),
            Err(err) => Err(ConfigTreeError::backend(err)),
        }
    }
}
